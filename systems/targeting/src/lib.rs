#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure target selection system for Rampart turrets.
//!
//! For every turret the system scans the enemy view and picks the nearest
//! enemy whose center lies within the turret's range. Selection is
//! deterministic: distances compare squared, the range boundary is inclusive,
//! and an exact distance tie goes to the lower enemy id. The system never
//! decides whether the turret may fire; that is the combat system's call.

use rampart_core::{EnemySnapshot, EnemyView, TurretTarget, TurretView};

/// Selects, per turret, the nearest in-range enemy.
#[derive(Debug, Default)]
pub struct TurretTargeting {}

impl TurretTargeting {
    /// Creates a new targeting system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes target assignments for the provided views.
    ///
    /// `out` is cleared first; turrets with no enemy in range contribute no
    /// assignment. Assignments come out in turret slot order because the
    /// view is id-sorted.
    pub fn handle(
        &mut self,
        turrets: &TurretView,
        enemies: &EnemyView,
        out: &mut Vec<TurretTarget>,
    ) {
        out.clear();

        for turret in turrets.iter() {
            let range_squared = turret.kind.range() * turret.kind.range();
            let mut nearest: Option<(f32, &EnemySnapshot)> = None;

            for enemy in enemies.iter() {
                let distance_squared = turret.position.distance_squared(enemy.position);
                if distance_squared > range_squared {
                    continue;
                }
                // Strict `<` keeps the first (lowest-id) enemy on exact ties.
                let closer = match nearest {
                    None => true,
                    Some((best, _)) => distance_squared < best,
                };
                if closer {
                    nearest = Some((distance_squared, enemy));
                }
            }

            if let Some((_, enemy)) = nearest {
                out.push(TurretTarget {
                    turret: turret.id,
                    enemy: enemy.id,
                    turret_position: turret.position,
                    enemy_position: enemy.position,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TurretTargeting;
    use rampart_core::{
        CellCoord, EnemyId, EnemySnapshot, EnemyView, TurretId, TurretKind, TurretSnapshot,
        TurretTarget, TurretView, WorldPoint,
    };
    use std::time::Duration;

    fn turret(id: u32, x: f32, y: f32) -> TurretSnapshot {
        TurretSnapshot {
            id: TurretId::new(id),
            kind: TurretKind::Basic,
            cell: CellCoord::new(0, 0),
            position: WorldPoint::new(x, y),
            ready_in: Duration::ZERO,
        }
    }

    fn enemy(id: u32, x: f32, y: f32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position: WorldPoint::new(x, y),
            progress: 0.0,
        }
    }

    #[test]
    fn picks_the_nearest_enemy_within_range() {
        let turrets = TurretView::from_snapshots(vec![turret(0, 0.0, 0.0)]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(0, 90.0, 0.0),
            enemy(1, 30.0, 0.0),
            enemy(2, 60.0, 0.0),
        ]);
        let mut out = Vec::new();

        TurretTargeting::new().handle(&turrets, &enemies, &mut out);

        assert_eq!(
            out,
            vec![TurretTarget {
                turret: TurretId::new(0),
                enemy: EnemyId::new(1),
                turret_position: WorldPoint::new(0.0, 0.0),
                enemy_position: WorldPoint::new(30.0, 0.0),
            }]
        );
    }

    #[test]
    fn enemies_beyond_range_are_invisible_to_the_turret() {
        let turrets = TurretView::from_snapshots(vec![turret(0, 0.0, 0.0)]);
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 100.1, 0.0)]);
        let mut out = Vec::new();

        TurretTargeting::new().handle(&turrets, &enemies, &mut out);

        assert!(out.is_empty());
    }

    #[test]
    fn the_range_boundary_is_inclusive() {
        let turrets = TurretView::from_snapshots(vec![turret(0, 0.0, 0.0)]);
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 100.0, 0.0)]);
        let mut out = Vec::new();

        TurretTargeting::new().handle(&turrets, &enemies, &mut out);

        assert_eq!(out.len(), 1);
    }

    #[test]
    fn exact_distance_ties_go_to_the_lower_enemy_id() {
        let turrets = TurretView::from_snapshots(vec![turret(0, 0.0, 0.0)]);
        let enemies = EnemyView::from_snapshots(vec![
            enemy(4, 50.0, 0.0),
            enemy(2, -50.0, 0.0),
        ]);
        let mut out = Vec::new();

        TurretTargeting::new().handle(&turrets, &enemies, &mut out);

        assert_eq!(out[0].enemy, EnemyId::new(2));
    }

    #[test]
    fn every_turret_gets_an_independent_assignment() {
        let turrets = TurretView::from_snapshots(vec![
            turret(0, 0.0, 0.0),
            turret(1, 1000.0, 0.0),
            turret(2, 200.0, 0.0),
        ]);
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 150.0, 0.0)]);
        let mut out = Vec::new();

        TurretTargeting::new().handle(&turrets, &enemies, &mut out);

        // Only the turret at x = 200 is within a hundred units of the enemy.
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].turret, TurretId::new(2));
    }

    #[test]
    fn stale_assignments_are_cleared_on_every_pass() {
        let turrets = TurretView::from_snapshots(vec![turret(0, 0.0, 0.0)]);
        let mut out = Vec::new();

        let mut targeting = TurretTargeting::new();
        targeting.handle(
            &turrets,
            &EnemyView::from_snapshots(vec![enemy(0, 10.0, 0.0)]),
            &mut out,
        );
        assert_eq!(out.len(), 1);

        targeting.handle(&turrets, &EnemyView::from_snapshots(Vec::new()), &mut out);
        assert!(out.is_empty());
    }
}
