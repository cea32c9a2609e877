#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Rampart simulation.
//!
//! This crate defines the message surface that connects hosts, the
//! authoritative world, and pure systems. Hosts submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Rebuilds the grid, path, and entity pools from the provided layout.
    ConfigureLevel {
        /// Level description the world should adopt.
        layout: LevelLayout,
    },
    /// Advances the monotonic session clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that one enemy enter the path at its starting point.
    SpawnEnemy,
    /// Advances every active enemy along the path.
    AdvanceEnemies {
        /// Duration of simulated time covered by the advancement.
        dt: Duration,
    },
    /// Requests placement of a turret on the provided grid cell.
    PlaceTurret {
        /// Cell that should hold the turret.
        cell: CellCoord,
    },
    /// Requests that a ready turret fire a bullet toward an enemy.
    FireBullet {
        /// Identifier of the turret attempting the shot.
        turret: TurretId,
        /// Identifier of the enemy being aimed at.
        target: EnemyId,
    },
    /// Advances every active bullet and expires spent ones.
    AdvanceBullets {
        /// Duration of simulated time covered by the advancement.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the session clock advanced.
    TimeAdvanced {
        /// Total simulated time elapsed since the session started.
        now: Duration,
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that an enemy entered the path.
    EnemySpawned {
        /// Identifier assigned to the enemy for this activation.
        enemy: EnemyId,
        /// Position resolved at the head of the path.
        position: WorldPoint,
    },
    /// Reports that a spawn request found no free enemy slot.
    ///
    /// Backpressure, not an error: the spawn is skipped, never queued.
    SpawnDropped,
    /// Confirms that an enemy traversed the full path and left the session.
    EnemyExited {
        /// Identifier of the enemy that completed the path.
        enemy: EnemyId,
    },
    /// Confirms that a turret was placed on the grid.
    TurretPlaced {
        /// Identifier assigned to the turret for this activation.
        turret: TurretId,
        /// Cell now occupied by the turret.
        cell: CellCoord,
        /// World position derived from the cell center.
        position: WorldPoint,
    },
    /// Reports that a turret placement request was rejected.
    TurretPlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a turret fired a bullet.
    BulletFired {
        /// Identifier assigned to the bullet for this activation.
        bullet: BulletId,
        /// Turret that fired the shot.
        turret: TurretId,
        /// Enemy the shot was aimed at when it left the barrel.
        target: EnemyId,
        /// Muzzle position of the shot.
        origin: WorldPoint,
        /// Flight direction expressed in radians.
        heading: f32,
    },
    /// Reports that a ready turret found no free bullet slot.
    ///
    /// The shot is dropped but the turret's cooldown is still consumed so a
    /// saturated bullet pool cannot stall fire cadence indefinitely.
    ShotDropped {
        /// Turret whose shot was dropped.
        turret: TurretId,
    },
    /// Confirms that a bullet exhausted its lifespan.
    BulletExpired {
        /// Identifier of the bullet that expired.
        bullet: BulletId,
    },
}

/// Unique identifier assigned to an enemy.
///
/// Identifiers are pool slot indices, so ascending id order is the stable
/// slot order used for iteration and targeting tie-breaks. A slot that is
/// released and re-acquired reuses its identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a turret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurretId(u32);

impl TurretId {
    /// Creates a new turret identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BulletId(u32);

impl BulletId {
    /// Creates a new bullet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Continuous position expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new world position from explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Computes the squared Euclidean distance to another position.
    ///
    /// Squared distances order identically to true distances, which is all
    /// range checks and nearest-candidate comparisons need.
    #[must_use]
    pub fn distance_squared(self, other: WorldPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

/// Types of turrets that can be constructed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurretKind {
    /// Basic turret with default attack parameters.
    Basic,
}

impl TurretKind {
    /// Returns the turret's maximum targeting distance in world units.
    #[must_use]
    pub const fn range(self) -> f32 {
        match self {
            Self::Basic => 100.0,
        }
    }

    /// Minimum interval the turret must wait between consecutive shots.
    ///
    /// The cooldown is consumed only by an actual fire attempt: a tick with
    /// no target in range leaves the turret ready.
    #[must_use]
    pub const fn cooldown(self) -> Duration {
        match self {
            Self::Basic => Duration::from_secs(1),
        }
    }

    /// Flight speed of this turret's bullets in world units per second.
    #[must_use]
    pub const fn bullet_speed(self) -> f32 {
        match self {
            Self::Basic => 600.0,
        }
    }

    /// Time a fired bullet stays in flight before forced expiry.
    #[must_use]
    pub const fn bullet_lifespan(self) -> Duration {
        match self {
            Self::Basic => Duration::from_millis(300),
        }
    }
}

/// Reasons a turret placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies beyond the configured grid bounds.
    OutOfBounds,
    /// The requested cell is part of the enemy path corridor.
    Blocked,
    /// The requested cell already holds a turret.
    Occupied,
    /// Every turret pool slot is already active.
    PoolExhausted,
}

/// Static description of a level: grid dimensions, path, and corridor.
///
/// Constructed once per session; the world derives its grid and path from it
/// and never mutates it afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    columns: u32,
    rows: u32,
    cell_length: f32,
    waypoints: Vec<WorldPoint>,
    corridor: Vec<CellCoord>,
}

impl LevelLayout {
    /// Creates a new level layout from explicit parts.
    #[must_use]
    pub const fn new(
        columns: u32,
        rows: u32,
        cell_length: f32,
        waypoints: Vec<WorldPoint>,
        corridor: Vec<CellCoord>,
    ) -> Self {
        Self {
            columns,
            rows,
            cell_length,
            waypoints,
            corridor,
        }
    }

    /// Number of cell columns laid out in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows laid out in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell in world units.
    #[must_use]
    pub const fn cell_length(&self) -> f32 {
        self.cell_length
    }

    /// Ordered waypoints of the enemy path.
    #[must_use]
    pub fn waypoints(&self) -> &[WorldPoint] {
        &self.waypoints
    }

    /// Cells permanently blocked because the path corridor crosses them.
    #[must_use]
    pub fn corridor(&self) -> &[CellCoord] {
        &self.corridor
    }
}

impl Default for LevelLayout {
    /// The original level: a 640x512 playfield of 64-unit cells whose path
    /// enters above the second column, crosses the third row, and exits
    /// below the eighth column.
    fn default() -> Self {
        let waypoints = vec![
            WorldPoint::new(96.0, -32.0),
            WorldPoint::new(96.0, 164.0),
            WorldPoint::new(480.0, 164.0),
            WorldPoint::new(480.0, 544.0),
        ];

        let mut corridor = Vec::new();
        for row in 0..=2 {
            corridor.push(CellCoord::new(1, row));
        }
        for column in 2..=7 {
            corridor.push(CellCoord::new(column, 2));
        }
        for row in 3..8 {
            corridor.push(CellCoord::new(7, row));
        }

        Self::new(10, 8, 64.0, waypoints, corridor)
    }
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier of the enemy's pool slot.
    pub id: EnemyId,
    /// Position resolved from the path on the most recent update.
    pub position: WorldPoint,
    /// Fraction of the total path length traversed, in `[0, 1)`.
    pub progress: f32,
}

/// Read-only snapshot describing all active enemies.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in ascending slot order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Borrows the underlying id-sorted snapshots.
    #[must_use]
    pub fn as_slice(&self) -> &[EnemySnapshot] {
        &self.snapshots
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single turret used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurretSnapshot {
    /// Identifier of the turret's pool slot.
    pub id: TurretId,
    /// Kind of turret that was placed.
    pub kind: TurretKind,
    /// Grid cell occupied by the turret.
    pub cell: CellCoord,
    /// World position derived once at placement from the cell center.
    pub position: WorldPoint,
    /// Time remaining until the turret may fire again; zero means ready.
    pub ready_in: Duration,
}

/// Read-only snapshot describing all active turrets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurretView {
    snapshots: Vec<TurretSnapshot>,
}

impl TurretView {
    /// Creates a new turret view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TurretSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in ascending slot order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &TurretSnapshot> {
        self.snapshots.iter()
    }

    /// Borrows the underlying id-sorted snapshots.
    #[must_use]
    pub fn as_slice(&self) -> &[TurretSnapshot] {
        &self.snapshots
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TurretSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single bullet used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Identifier of the bullet's pool slot.
    pub id: BulletId,
    /// Current position of the bullet.
    pub position: WorldPoint,
    /// Flight direction expressed in radians.
    pub heading: f32,
}

/// Read-only snapshot describing all active bullets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BulletView {
    snapshots: Vec<BulletSnapshot>,
}

impl BulletView {
    /// Creates a new bullet view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BulletSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in ascending slot order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &BulletSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<BulletSnapshot> {
        self.snapshots
    }
}

/// Target assignment computed by the targeting system for one turret.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurretTarget {
    /// Turret the assignment belongs to.
    pub turret: TurretId,
    /// Nearest enemy within the turret's range.
    pub enemy: EnemyId,
    /// World position of the turret at selection time.
    pub turret_position: WorldPoint,
    /// World position of the enemy at selection time.
    pub enemy_position: WorldPoint,
}
