//! End-to-end scenarios driven through the public session surface.

use std::time::Duration;

use rampart_core::{Event, LevelLayout, WorldPoint};
use rampart_session::{SessionConfig, Simulation};
use rampart_world::query;

const TICK: Duration = Duration::from_secs(2);

/// An open four-by-four level with a straight horizontal path, used when the
/// geometry under test needs to be obvious at a glance.
fn straight_level() -> SessionConfig {
    SessionConfig {
        layout: LevelLayout::new(
            4,
            4,
            64.0,
            vec![WorldPoint::new(0.0, 64.0), WorldPoint::new(256.0, 64.0)],
            Vec::new(),
        ),
        spawn_interval: TICK,
    }
}

fn spawn_count(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|event| matches!(event, Event::EnemySpawned { .. }))
        .count()
}

#[test]
fn each_interval_tick_spawns_one_enemy_and_advances_the_rest() {
    let mut simulation = Simulation::default();

    assert_eq!(spawn_count(simulation.tick(TICK)), 1);
    assert_eq!(spawn_count(simulation.tick(TICK)), 1);
    assert_eq!(spawn_count(simulation.tick(TICK)), 1);

    // Ten-second traversal, two-second ticks: each enemy gains 0.2 progress
    // per tick, including its spawn tick.
    let enemies = query::enemy_view(simulation.world()).into_vec();
    let progress: Vec<f32> = enemies.iter().map(|enemy| enemy.progress).collect();
    assert_eq!(progress, vec![0.6, 0.4, 0.2]);
}

#[test]
fn sub_interval_ticks_spawn_nothing() {
    let mut simulation = Simulation::default();

    let events = simulation.tick(Duration::from_millis(500)).to_vec();
    assert_eq!(spawn_count(&events), 0);
    assert!(query::enemy_view(simulation.world()).into_vec().is_empty());
}

#[test]
fn a_turret_beside_the_path_fires_at_the_passing_enemy() {
    let mut simulation = Simulation::new(straight_level());
    assert!(simulation.place_turret_at(96.0, 96.0));

    // First interval tick: spawn, advance to x = 51.2, select, fire. The
    // two-second tick then outlives the bullet's 300 ms lifespan, so the
    // same event batch also records the expiry.
    let events = simulation.tick(TICK).to_vec();

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BulletFired { .. })));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BulletExpired { .. })));
    assert!(query::bullet_view(simulation.world()).into_vec().is_empty());
}

#[test]
fn bullets_outlive_short_ticks_before_expiring() {
    let mut simulation = Simulation::new(SessionConfig {
        spawn_interval: Duration::from_millis(100),
        ..straight_level()
    });
    assert!(simulation.place_turret_at(96.0, 96.0));

    let mut fired = false;
    for _ in 0..40 {
        fired = simulation
            .tick(Duration::from_millis(100))
            .iter()
            .any(|event| matches!(event, Event::BulletFired { .. }));
        if fired {
            break;
        }
    }
    assert!(fired, "a bullet fires within four seconds");

    // 100 ms consumed in the firing tick leaves 200 ms of flight.
    assert_eq!(query::bullet_view(simulation.world()).into_vec().len(), 1);
    let _ = simulation.tick(Duration::from_millis(100));
    assert_eq!(query::bullet_view(simulation.world()).into_vec().len(), 1);
    let events = simulation.tick(Duration::from_millis(100)).to_vec();
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::BulletExpired { .. })));
    assert!(query::bullet_view(simulation.world()).into_vec().is_empty());
}

#[test]
fn placement_reports_success_and_failure() {
    let mut simulation = Simulation::default();

    assert!(simulation.place_turret_at(32.0, 32.0));
    // Same cell again: occupied.
    assert!(!simulation.place_turret_at(40.0, 40.0));
    // Corridor cell under the path entrance: blocked.
    assert!(!simulation.place_turret_at(96.0, 32.0));
    // Off the playfield entirely.
    assert!(!simulation.place_turret_at(-5.0, 10.0));
    assert!(!simulation.place_turret_at(10_000.0, 10.0));

    assert_eq!(query::turret_view(simulation.world()).into_vec().len(), 1);
}

#[test]
fn identical_inputs_replay_to_identical_event_logs() {
    let run = || {
        let mut simulation = Simulation::new(straight_level());
        let mut log = Vec::new();
        assert!(simulation.place_turret_at(96.0, 96.0));
        log.extend_from_slice(simulation.events());
        for _ in 0..20 {
            log.extend_from_slice(simulation.tick(Duration::from_millis(250)));
        }
        log
    };

    assert_eq!(run(), run());
}

#[test]
fn enemies_that_finish_the_path_exit_and_free_their_slots() {
    let mut simulation = Simulation::new(SessionConfig {
        // One spawn, then let the lane drain for the ten-second traversal.
        spawn_interval: Duration::from_secs(100),
        ..straight_level()
    });

    let mut exited = 0;
    for _ in 0..55 {
        for event in simulation.tick(TICK) {
            if matches!(event, Event::EnemyExited { .. }) {
                exited += 1;
            }
        }
    }

    assert_eq!(exited, 1);
    assert!(query::enemy_view(simulation.world()).into_vec().is_empty());
}
