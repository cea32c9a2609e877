#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Rampart adapters.
//!
//! Converts the authoritative world into a backend-neutral [`Scene`] that
//! any presentation layer can draw. Building a scene is a pure read; no
//! adapter ever mutates the world through this crate.

use anyhow::Result as AnyResult;
use glam::Vec2;
use rampart_core::{BulletId, CellCoord, EnemyId, TurretId, TurretKind};
use rampart_world::{query, CellState, World};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Palette applied to the playfield when no backend overrides it.
pub mod palette {
    use super::Color;

    /// Fill for cells that may receive a turret.
    pub const FREE_CELL: Color = Color::from_rgb_u8(34, 51, 34);
    /// Fill for corridor cells under the enemy path.
    pub const BLOCKED_CELL: Color = Color::from_rgb_u8(68, 56, 34);
    /// Fill for cells holding a turret.
    pub const OCCUPIED_CELL: Color = Color::from_rgb_u8(51, 68, 85);
    /// Stroke for the enemy path polyline.
    pub const PATH: Color = Color::from_rgb_u8(221, 221, 170);
    /// Fill for enemy markers.
    pub const ENEMY: Color = Color::from_rgb_u8(204, 68, 68);
    /// Fill for turret markers.
    pub const TURRET: Color = Color::from_rgb_u8(102, 153, 204);
    /// Fill for bullet markers.
    pub const BULLET: Color = Color::from_rgb_u8(255, 238, 136);
}

/// One grid cell with its resolved world-space rectangle and fill color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCell {
    /// Grid coordinates of the cell.
    pub cell: CellCoord,
    /// Top-left corner of the cell in world units.
    pub origin: Vec2,
    /// Fill color derived from the cell's occupancy state.
    pub fill: Color,
}

/// One enemy marker positioned along the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneEnemy {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Center of the marker in world units.
    pub center: Vec2,
    /// Fraction of the path already traversed.
    pub progress: f32,
}

/// One turret marker centered on its cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTurret {
    /// Identifier of the turret.
    pub id: TurretId,
    /// Kind of turret placed.
    pub kind: TurretKind,
    /// Center of the marker in world units.
    pub center: Vec2,
    /// Whether the turret may fire right now.
    pub ready: bool,
}

/// One bullet marker in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneBullet {
    /// Identifier of the bullet.
    pub id: BulletId,
    /// Center of the marker in world units.
    pub center: Vec2,
    /// Flight direction expressed in radians.
    pub heading: f32,
}

/// Backend-neutral description of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Simulated time the scene was captured at.
    pub clock: Duration,
    /// Side length of a square grid cell in world units.
    pub cell_length: f32,
    /// Every grid cell with its resolved fill.
    pub cells: Vec<SceneCell>,
    /// Enemy path rendered as a world-space polyline.
    pub path: Vec<Vec2>,
    /// Active enemies in ascending id order.
    pub enemies: Vec<SceneEnemy>,
    /// Active turrets in ascending id order.
    pub turrets: Vec<SceneTurret>,
    /// Active bullets in ascending id order.
    pub bullets: Vec<SceneBullet>,
}

/// Captures a scene from the current world state.
#[must_use]
pub fn build_scene(world: &World) -> Scene {
    let grid = query::grid(world);
    let cell_length = grid.cell_length();

    let mut cells = Vec::with_capacity((grid.columns() * grid.rows()) as usize);
    for row in 0..grid.rows() {
        for column in 0..grid.columns() {
            let cell = CellCoord::new(column, row);
            let fill = match grid.state(cell) {
                Some(CellState::Blocked) => palette::BLOCKED_CELL,
                Some(CellState::Occupied) => palette::OCCUPIED_CELL,
                _ => palette::FREE_CELL,
            };
            cells.push(SceneCell {
                cell,
                origin: Vec2::new(column as f32 * cell_length, row as f32 * cell_length),
                fill,
            });
        }
    }

    let path = query::path(world)
        .waypoints()
        .iter()
        .map(|point| Vec2::new(point.x(), point.y()))
        .collect();

    let enemies = query::enemy_view(world)
        .iter()
        .map(|enemy| SceneEnemy {
            id: enemy.id,
            center: Vec2::new(enemy.position.x(), enemy.position.y()),
            progress: enemy.progress,
        })
        .collect();

    let turrets = query::turret_view(world)
        .iter()
        .map(|turret| SceneTurret {
            id: turret.id,
            kind: turret.kind,
            center: Vec2::new(turret.position.x(), turret.position.y()),
            ready: turret.ready_in.is_zero(),
        })
        .collect();

    let bullets = query::bullet_view(world)
        .iter()
        .map(|bullet| SceneBullet {
            id: bullet.id,
            center: Vec2::new(bullet.position.x(), bullet.position.y()),
            heading: bullet.heading,
        })
        .collect();

    Scene {
        clock: query::clock(world),
        cell_length,
        cells,
        path,
        enemies,
        turrets,
        bullets,
    }
}

/// Presentation seam implemented by concrete backends.
pub trait RenderingBackend {
    /// Presents one captured scene.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}
