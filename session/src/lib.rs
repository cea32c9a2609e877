#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session orchestration for Rampart.
//!
//! Wires the authoritative world together with the pure systems and drives
//! them in a fixed per-tick order:
//!
//! 1. advance the clock, then let the spawning system request enemies;
//! 2. advance every enemy, including ones spawned this tick;
//! 3. select targets and fire ready turrets;
//! 4. advance every bullet, including ones fired this tick.
//!
//! The order is the determinism contract: reordering the phases changes
//! which enemies turrets can see and how far fresh bullets travel.

use std::time::Duration;

use rampart_combat::TurretCombat;
use rampart_core::{Command, Event, LevelLayout, TurretTarget};
use rampart_spawning::Spawning;
use rampart_targeting::TurretTargeting;
use rampart_world::{apply, query, World};

/// Parameters a host supplies when starting a session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    /// Level the session plays out on.
    pub layout: LevelLayout,
    /// Interval between consecutive enemy spawns.
    pub spawn_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            layout: LevelLayout::default(),
            spawn_interval: Duration::from_secs(2),
        }
    }
}

/// Owns the world, the systems, and the per-tick scratch buffers.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    spawning: Spawning,
    targeting: TurretTargeting,
    combat: TurretCombat,
    events: Vec<Event>,
    commands: Vec<Command>,
    targets: Vec<TurretTarget>,
}

impl Simulation {
    /// Creates a simulation from the provided configuration.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureLevel {
                layout: config.layout,
            },
            &mut events,
        );

        Self {
            world,
            spawning: Spawning::new(rampart_spawning::Config::new(config.spawn_interval)),
            targeting: TurretTargeting::new(),
            combat: TurretCombat::new(),
            events,
            commands: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Provides read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Runs one fixed-order tick, returning every event it produced.
    ///
    /// The returned slice is valid until the next call that mutates the
    /// session.
    pub fn tick(&mut self, dt: Duration) -> &[Event] {
        self.events.clear();

        // Phase 1: clock, then spawning.
        apply(&mut self.world, Command::Tick { dt }, &mut self.events);
        self.spawning.handle(&self.events, &mut self.commands);
        self.drain_commands();

        // Phase 2: enemy motion covers enemies spawned a moment ago.
        apply(
            &mut self.world,
            Command::AdvanceEnemies { dt },
            &mut self.events,
        );

        // Phase 3: target selection over post-move positions, then fire.
        let turrets = query::turret_view(&self.world);
        let enemies = query::enemy_view(&self.world);
        self.targeting.handle(&turrets, &enemies, &mut self.targets);
        self.combat.handle(&turrets, &self.targets, &mut self.commands);
        self.drain_commands();

        // Phase 4: bullet motion covers bullets fired a moment ago.
        apply(
            &mut self.world,
            Command::AdvanceBullets { dt },
            &mut self.events,
        );

        &self.events
    }

    /// Attempts to place a turret on the cell containing a world position.
    ///
    /// Returns whether the placement succeeded; the rejection reason, if
    /// any, is available in [`Simulation::events`].
    pub fn place_turret_at(&mut self, x: f32, y: f32) -> bool {
        let Some(cell) = query::grid(&self.world).cell_at(x, y) else {
            return false;
        };

        let start = self.events.len();
        apply(
            &mut self.world,
            Command::PlaceTurret { cell },
            &mut self.events,
        );
        self.events[start..]
            .iter()
            .any(|event| matches!(event, Event::TurretPlaced { .. }))
    }

    /// Events produced since the start of the current tick.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    fn drain_commands(&mut self) {
        for command in self.commands.drain(..) {
            apply(&mut self.world, command, &mut self.events);
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
