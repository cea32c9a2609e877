#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure enemy spawning system for Rampart.
//!
//! Watches the session clock and requests one enemy spawn each time the
//! configured interval elapses. The system holds only its own schedule; the
//! world decides whether a spawn actually happens.

use std::time::Duration;

use rampart_core::{Command, Event};

/// Tuning parameters for the spawning cadence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    spawn_interval: Duration,
}

impl Config {
    /// Creates a configuration with the provided spawn interval.
    #[must_use]
    pub const fn new(spawn_interval: Duration) -> Self {
        Self { spawn_interval }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

/// Emits spawn commands on a fixed session-clock schedule.
#[derive(Debug)]
pub struct Spawning {
    spawn_interval: Duration,
    next_spawn_at: Duration,
}

impl Spawning {
    /// Creates a spawning system from the provided configuration.
    ///
    /// The first spawn is requested on the first tick whose clock reaches the
    /// interval.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            spawn_interval: config.spawn_interval,
            next_spawn_at: config.spawn_interval,
        }
    }

    /// Reacts to world events, appending spawn commands to `out`.
    ///
    /// At most one spawn is requested per tick regardless of how far the
    /// clock jumped: a long stall skips spawns rather than queueing a burst.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if let Event::TimeAdvanced { now, .. } = event {
                if *now >= self.next_spawn_at {
                    out.push(Command::SpawnEnemy);
                    self.next_spawn_at = now.saturating_add(self.spawn_interval);
                }
            }
        }
    }
}

impl Default for Spawning {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
