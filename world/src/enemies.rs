//! Pooled enemies that follow the path from entry to exit.

use std::time::Duration;

use rampart_core::{EnemyId, WorldPoint};

use crate::{path::Path, pool::Pooled};

/// Pooled path follower: Inactive -> Following -> Inactive.
///
/// Position derives entirely from the normalized progress value, so the
/// follower can never desynchronize from the path geometry.
#[derive(Debug)]
pub(crate) struct Enemy {
    id: EnemyId,
    active: bool,
    visible: bool,
    progress: f32,
    position: WorldPoint,
}

impl Enemy {
    /// Creates an inactive enemy bound to the provided pool slot.
    pub(crate) fn idle(id: EnemyId) -> Self {
        Self {
            id,
            active: false,
            visible: false,
            progress: 0.0,
            position: WorldPoint::new(0.0, 0.0),
        }
    }

    /// Identifier of the enemy's pool slot.
    pub(crate) fn id(&self) -> EnemyId {
        self.id
    }

    /// Whether the enemy should be presented; mirrors activity.
    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }

    /// Fraction of the total path length traversed.
    pub(crate) fn progress(&self) -> f32 {
        self.progress
    }

    /// Last resolved path position.
    pub(crate) fn position(&self) -> WorldPoint {
        self.position
    }

    /// Activates a just-acquired enemy at the head of the path.
    pub(crate) fn start_on_path(&mut self, path: &Path) {
        self.progress = 0.0;
        self.position = path.point_at(0.0);
        self.active = true;
        self.visible = true;
    }

    /// Advances the enemy along the path.
    ///
    /// Progress is monotonically non-decreasing while active; traversal
    /// speed is distance-independent, expressed as the reciprocal of the
    /// configured end-to-end travel time. Returns `true` on the update that
    /// first reaches the end of the path, which is the sole exit from the
    /// Following state; the caller then releases the slot.
    pub(crate) fn advance(&mut self, dt: Duration, traversal: Duration, path: &Path) -> bool {
        let total = traversal.as_secs_f32();
        if total > 0.0 {
            self.progress += dt.as_secs_f32() / total;
        } else {
            self.progress = 1.0;
        }
        self.position = path.point_at(self.progress);
        self.progress >= 1.0
    }
}

impl Pooled for Enemy {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.visible = false;
        // Reset so the next activation starts the path from scratch.
        self.progress = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::{Enemy, Pooled};
    use crate::path::Path;
    use rampart_core::{EnemyId, WorldPoint};
    use std::time::Duration;

    fn straight_path() -> Path {
        Path::from_waypoints(&[WorldPoint::new(0.0, 0.0), WorldPoint::new(100.0, 0.0)])
    }

    #[test]
    fn start_on_path_resolves_the_first_waypoint() {
        let path = straight_path();
        let mut enemy = Enemy::idle(EnemyId::new(0));

        enemy.start_on_path(&path);

        assert!(enemy.is_active());
        assert_eq!(enemy.progress(), 0.0);
        assert_eq!(enemy.position(), WorldPoint::new(0.0, 0.0));
    }

    #[test]
    fn progress_is_monotonic_and_finishes_exactly_once() {
        let path = straight_path();
        let traversal = Duration::from_secs(10);
        let mut enemy = Enemy::idle(EnemyId::new(0));
        enemy.start_on_path(&path);

        let mut last = 0.0;
        let mut finishes = 0;
        for _ in 0..8 {
            if enemy.advance(Duration::from_secs(2), traversal, &path) {
                finishes += 1;
                enemy.deactivate();
                break;
            }
            assert!(enemy.progress() >= last);
            last = enemy.progress();
        }

        assert_eq!(finishes, 1);
        assert!(!enemy.is_active());
        assert_eq!(enemy.progress(), 0.0, "progress resets for reuse");
    }

    #[test]
    fn position_follows_the_path_midway() {
        let path = straight_path();
        let mut enemy = Enemy::idle(EnemyId::new(0));
        enemy.start_on_path(&path);

        let finished = enemy.advance(Duration::from_secs(5), Duration::from_secs(10), &path);

        assert!(!finished);
        assert_eq!(enemy.progress(), 0.5);
        assert_eq!(enemy.position(), WorldPoint::new(50.0, 0.0));
    }

    #[test]
    fn zero_traversal_time_completes_immediately() {
        let path = straight_path();
        let mut enemy = Enemy::idle(EnemyId::new(0));
        enemy.start_on_path(&path);

        assert!(enemy.advance(Duration::from_millis(16), Duration::ZERO, &path));
    }
}
