//! Pooled grid-placed turrets with cooldown-gated firing.

use std::time::Duration;

use rampart_core::{CellCoord, TurretId, TurretKind, WorldPoint};

use crate::pool::Pooled;

/// Pooled turret: Placed -> Cooldown <-> Ready.
///
/// The world position is derived once at placement from the cell center and
/// never changes; readiness is a pure comparison against the session clock.
#[derive(Debug)]
pub(crate) struct Turret {
    id: TurretId,
    active: bool,
    visible: bool,
    kind: TurretKind,
    cell: CellCoord,
    position: WorldPoint,
    next_fire_at: Duration,
}

impl Turret {
    /// Creates an inactive turret bound to the provided pool slot.
    pub(crate) fn idle(id: TurretId) -> Self {
        Self {
            id,
            active: false,
            visible: false,
            kind: TurretKind::Basic,
            cell: CellCoord::new(0, 0),
            position: WorldPoint::new(0.0, 0.0),
            next_fire_at: Duration::ZERO,
        }
    }

    /// Identifier of the turret's pool slot.
    pub(crate) fn id(&self) -> TurretId {
        self.id
    }

    /// Whether the turret should be presented; mirrors activity.
    pub(crate) fn is_visible(&self) -> bool {
        self.visible
    }

    /// Kind of turret occupying the slot.
    pub(crate) fn kind(&self) -> TurretKind {
        self.kind
    }

    /// Grid cell occupied by the turret.
    pub(crate) fn cell(&self) -> CellCoord {
        self.cell
    }

    /// World position derived at placement.
    pub(crate) fn position(&self) -> WorldPoint {
        self.position
    }

    /// Activates a just-acquired turret on the provided cell.
    ///
    /// The turret starts ready: the first target check may fire immediately.
    pub(crate) fn place(&mut self, kind: TurretKind, cell: CellCoord, position: WorldPoint) {
        self.kind = kind;
        self.cell = cell;
        self.position = position;
        self.next_fire_at = Duration::ZERO;
        self.active = true;
        self.visible = true;
    }

    /// Time remaining until the turret may fire again; zero means ready.
    pub(crate) fn ready_in(&self, now: Duration) -> Duration {
        self.next_fire_at.saturating_sub(now)
    }

    /// Consumes the cooldown for a fire attempt made at `now`.
    ///
    /// Called even when the bullet pool drops the shot, so a saturated pool
    /// cannot stall the fire cadence indefinitely.
    pub(crate) fn note_fired(&mut self, now: Duration) {
        self.next_fire_at = now.saturating_add(self.kind.cooldown());
    }
}

impl Pooled for Turret {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.visible = false;
        self.next_fire_at = Duration::ZERO;
    }
}
