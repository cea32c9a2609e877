#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Rampart.
//!
//! The world owns the occupancy grid, the enemy path, and the three entity
//! pools. All mutation flows through [`apply`]; reads happen through the
//! [`query`] module. Everything is single-threaded and deterministic: the
//! orchestrator's fixed per-tick command order is the invariant that keeps
//! turret targeting, enemy motion, and bullet flight consistent.

mod bullets;
mod enemies;
mod grid;
mod path;
mod pool;
mod turrets;

pub use grid::{CellState, Grid};
pub use path::Path;

use std::time::Duration;

use rampart_core::{
    BulletId, CellCoord, Command, EnemyId, Event, LevelLayout, PlacementError, TurretId, TurretKind,
};

use crate::{
    bullets::Bullet,
    enemies::Enemy,
    pool::{ObjectPool, Pooled},
    turrets::Turret,
};

const ENEMY_POOL_CAPACITY: usize = 32;
const TURRET_POOL_CAPACITY: usize = 16;
const BULLET_POOL_CAPACITY: usize = 64;

/// Time an enemy needs to traverse the full path end to end.
const ENEMY_TRAVERSAL: Duration = Duration::from_secs(10);

/// Represents the authoritative Rampart world state.
#[derive(Debug)]
pub struct World {
    clock: Duration,
    grid: Grid,
    path: Path,
    enemies: ObjectPool<Enemy>,
    turrets: ObjectPool<Turret>,
    bullets: ObjectPool<Bullet>,
}

impl World {
    /// Creates a new world configured with the default level layout.
    #[must_use]
    pub fn new() -> Self {
        Self::from_layout(&LevelLayout::default())
    }

    fn from_layout(layout: &LevelLayout) -> Self {
        Self {
            clock: Duration::ZERO,
            grid: Grid::from_layout(layout),
            path: Path::from_waypoints(layout.waypoints()),
            enemies: ObjectPool::with_capacity(ENEMY_POOL_CAPACITY, |index| {
                Enemy::idle(EnemyId::new(index))
            }),
            turrets: ObjectPool::with_capacity(TURRET_POOL_CAPACITY, |index| {
                Turret::idle(TurretId::new(index))
            }),
            bullets: ObjectPool::with_capacity(BULLET_POOL_CAPACITY, |index| {
                Bullet::idle(BulletId::new(index))
            }),
        }
    }

    fn spawn_enemy(&mut self, out_events: &mut Vec<Event>) {
        let path = &self.path;
        match self.enemies.acquire() {
            Some(enemy) => {
                enemy.start_on_path(path);
                out_events.push(Event::EnemySpawned {
                    enemy: enemy.id(),
                    position: enemy.position(),
                });
            }
            None => out_events.push(Event::SpawnDropped),
        }
    }

    fn advance_enemies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let path = &self.path;
        let mut finished: Vec<EnemyId> = Vec::new();
        for enemy in self.enemies.iter_mut() {
            if !enemy.is_active() {
                continue;
            }
            if enemy.advance(dt, ENEMY_TRAVERSAL, path) {
                finished.push(enemy.id());
            }
        }

        for enemy in finished {
            self.enemies.release(enemy.get() as usize);
            out_events.push(Event::EnemyExited { enemy });
        }
    }

    fn place_turret(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.grid.ensure_free(cell) {
            out_events.push(Event::TurretPlacementRejected { cell, reason });
            return;
        }

        let position = self.grid.cell_center(cell);
        let placed = match self.turrets.acquire() {
            Some(turret) => {
                turret.place(TurretKind::Basic, cell, position);
                Some(turret.id())
            }
            None => None,
        };

        let Some(turret) = placed else {
            out_events.push(Event::TurretPlacementRejected {
                cell,
                reason: PlacementError::PoolExhausted,
            });
            return;
        };

        match self.grid.occupy(cell) {
            Ok(()) => out_events.push(Event::TurretPlaced {
                turret,
                cell,
                position,
            }),
            Err(reason) => {
                self.turrets.release(turret.get() as usize);
                out_events.push(Event::TurretPlacementRejected { cell, reason });
            }
        }
    }

    fn fire_bullet(&mut self, turret_id: TurretId, target: EnemyId, out_events: &mut Vec<Event>) {
        // A stale assignment (enemy already exited) costs the turret nothing.
        let target_position = match self.enemies.get(target.get() as usize) {
            Some(enemy) if enemy.is_active() => enemy.position(),
            _ => return,
        };

        let now = self.clock;
        let Some(turret) = self.turrets.get_mut(turret_id.get() as usize) else {
            return;
        };
        if !turret.is_active() || !turret.ready_in(now).is_zero() {
            return;
        }

        let origin = turret.position();
        let kind = turret.kind();
        turret.note_fired(now);

        let heading = (target_position.y() - origin.y()).atan2(target_position.x() - origin.x());
        match self.bullets.acquire() {
            Some(bullet) => {
                bullet.fire(origin, heading, kind.bullet_speed(), kind.bullet_lifespan());
                out_events.push(Event::BulletFired {
                    bullet: bullet.id(),
                    turret: turret_id,
                    target,
                    origin,
                    heading,
                });
            }
            None => out_events.push(Event::ShotDropped { turret: turret_id }),
        }
    }

    fn advance_bullets(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let mut expired: Vec<BulletId> = Vec::new();
        for bullet in self.bullets.iter_mut() {
            if !bullet.is_active() {
                continue;
            }
            if bullet.advance(dt) {
                expired.push(bullet.id());
            }
        }

        for bullet in expired {
            self.bullets.release(bullet.get() as usize);
            out_events.push(Event::BulletExpired { bullet });
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureLevel { layout } => {
            *world = World::from_layout(&layout);
        }
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced {
                now: world.clock,
                dt,
            });
        }
        Command::SpawnEnemy => world.spawn_enemy(out_events),
        Command::AdvanceEnemies { dt } => world.advance_enemies(dt, out_events),
        Command::PlaceTurret { cell } => world.place_turret(cell, out_events),
        Command::FireBullet { turret, target } => world.fire_bullet(turret, target, out_events),
        Command::AdvanceBullets { dt } => world.advance_bullets(dt, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use rampart_core::{
        BulletSnapshot, BulletView, EnemySnapshot, EnemyView, TurretSnapshot, TurretView,
    };

    use super::{Grid, Path, World};

    /// Total simulated time elapsed since the session started.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Provides read-only access to the occupancy grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Provides read-only access to the enemy path.
    #[must_use]
    pub fn path(world: &World) -> &Path {
        &world.path
    }

    /// Captures a read-only view of the visible enemies in slot order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter_active()
                .filter(|enemy| enemy.is_visible())
                .map(|enemy| EnemySnapshot {
                    id: enemy.id(),
                    position: enemy.position(),
                    progress: enemy.progress(),
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the visible turrets in slot order.
    #[must_use]
    pub fn turret_view(world: &World) -> TurretView {
        TurretView::from_snapshots(
            world
                .turrets
                .iter_active()
                .filter(|turret| turret.is_visible())
                .map(|turret| TurretSnapshot {
                    id: turret.id(),
                    kind: turret.kind(),
                    cell: turret.cell(),
                    position: turret.position(),
                    ready_in: turret.ready_in(world.clock),
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the visible bullets in slot order.
    #[must_use]
    pub fn bullet_view(world: &World) -> BulletView {
        BulletView::from_snapshots(
            world
                .bullets
                .iter_active()
                .filter(|bullet| bullet.is_visible())
                .map(|bullet| BulletSnapshot {
                    id: bullet.id(),
                    position: bullet.position(),
                    heading: bullet.heading(),
                })
                .collect(),
        )
    }
}
