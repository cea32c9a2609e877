//! Pooled projectiles with a direction and a time-to-live.

use std::time::Duration;

use rampart_core::{BulletId, WorldPoint};

use crate::pool::Pooled;

/// Pooled projectile: Inactive -> Flying -> Inactive.
#[derive(Debug)]
pub(crate) struct Bullet {
    id: BulletId,
    active: bool,
    visible: bool,
    position: WorldPoint,
    heading: f32,
    direction: (f32, f32),
    speed: f32,
    remaining: Duration,
}

impl Bullet {
    /// Creates an inactive bullet bound to the provided pool slot.
    pub(crate) fn idle(id: BulletId) -> Self {
        Self {
            id,
            active: false,
            visible: false,
            position: WorldPoint::new(0.0, 0.0),
            heading: 0.0,
            direction: (1.0, 0.0),
            speed: 0.0,
            remaining: Duration::ZERO,
        }
    }

    /// Identifier of the bullet's pool slot.
    pub(crate) fn id(&self) -> BulletId {
        self.id
    }

    /// Whether the bullet should be presented; mirrors activity.
    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current position of the bullet.
    pub(crate) fn position(&self) -> WorldPoint {
        self.position
    }

    /// Flight direction expressed in radians.
    pub(crate) fn heading(&self) -> f32 {
        self.heading
    }

    /// Activates a just-acquired bullet at the muzzle position.
    pub(crate) fn fire(
        &mut self,
        origin: WorldPoint,
        heading: f32,
        speed: f32,
        lifespan: Duration,
    ) {
        self.position = origin;
        self.heading = heading;
        self.direction = (heading.cos(), heading.sin());
        self.speed = speed;
        self.remaining = lifespan;
        self.active = true;
        self.visible = true;
    }

    /// Moves the bullet and burns lifespan.
    ///
    /// The lifespan decreases before the motion step so a bullet still
    /// travels on its final update. Returns `true` once the lifespan is
    /// exhausted; the caller then releases the slot.
    pub(crate) fn advance(&mut self, dt: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(dt);
        let step = self.speed * dt.as_secs_f32();
        self.position = WorldPoint::new(
            self.position.x() + self.direction.0 * step,
            self.position.y() + self.direction.1 * step,
        );
        self.remaining.is_zero()
    }
}

impl Pooled for Bullet {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.visible = false;
        self.remaining = Duration::ZERO;
    }
}
