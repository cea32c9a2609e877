#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs headless Rampart sessions.
//!
//! Drives a fixed number of ticks over a built-in or file-provided level,
//! logs every world event at debug level, and prints a closing summary.
//! With `--render` the final frame is drawn as ASCII through the shared
//! rendering contract.

mod level_file;

use std::{path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::Parser;
use rampart_core::{CellCoord, Event};
use rampart_rendering::{build_scene, RenderingBackend, Scene};
use rampart_session::{Simulation, SessionConfig};
use rampart_world::query;

/// Headless Rampart simulation runner.
#[derive(Debug, Parser)]
#[command(name = "rampart")]
struct Args {
    /// Number of fixed ticks to simulate.
    #[arg(long, default_value_t = 100)]
    ticks: u32,

    /// Simulated milliseconds per tick.
    #[arg(long = "dt-ms", default_value_t = 100)]
    dt_ms: u64,

    /// TOML level file overriding the built-in layout.
    #[arg(long)]
    level: Option<PathBuf>,

    /// Turret placements as COLxROW cell coordinates, repeatable.
    #[arg(long = "turret", value_name = "COLxROW")]
    turrets: Vec<String>,

    /// Print the final frame as ASCII art.
    #[arg(long)]
    render: bool,
}

/// Entry point for the Rampart command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.level {
        Some(path) => level_file::load(path)
            .with_context(|| format!("loading level file {}", path.display()))?,
        None => SessionConfig::default(),
    };
    let mut simulation = Simulation::new(config);

    for spec in &args.turrets {
        let cell = parse_cell(spec)?;
        let center = query::grid(simulation.world()).cell_center(cell);
        if simulation.place_turret_at(center.x(), center.y()) {
            log::info!("placed turret at {spec}");
        } else {
            log::warn!("turret placement at {spec} rejected");
        }
    }

    let dt = Duration::from_millis(args.dt_ms);
    let mut tally = Tally::default();
    for _ in 0..args.ticks {
        for event in simulation.tick(dt) {
            log::debug!("{event:?}");
            tally.record(event);
        }
    }

    println!(
        "simulated {:.1}s across {} ticks",
        query::clock(simulation.world()).as_secs_f32(),
        args.ticks,
    );
    println!(
        "enemies: {} spawned, {} exited, {} drops; bullets: {} fired, {} expired, {} drops",
        tally.spawned, tally.exited, tally.spawn_drops, tally.fired, tally.expired, tally.shot_drops,
    );

    if args.render {
        let mut backend = AsciiBackend;
        backend.present(&build_scene(simulation.world()))?;
    }

    Ok(())
}

/// Running totals of the interesting world events.
#[derive(Debug, Default)]
struct Tally {
    spawned: u32,
    exited: u32,
    spawn_drops: u32,
    fired: u32,
    expired: u32,
    shot_drops: u32,
}

impl Tally {
    fn record(&mut self, event: &Event) {
        match event {
            Event::EnemySpawned { .. } => self.spawned += 1,
            Event::EnemyExited { .. } => self.exited += 1,
            Event::SpawnDropped => self.spawn_drops += 1,
            Event::BulletFired { .. } => self.fired += 1,
            Event::BulletExpired { .. } => self.expired += 1,
            Event::ShotDropped { .. } => self.shot_drops += 1,
            _ => {}
        }
    }
}

fn parse_cell(spec: &str) -> Result<CellCoord> {
    let Some((column, row)) = spec.split_once('x') else {
        bail!("turret spec {spec:?} is not of the form COLxROW");
    };
    let column: u32 = column
        .parse()
        .with_context(|| format!("turret spec {spec:?} has a bad column"))?;
    let row: u32 = row
        .parse()
        .with_context(|| format!("turret spec {spec:?} has a bad row"))?;
    Ok(CellCoord::new(column, row))
}

/// Draws scenes as one ASCII character per grid cell.
struct AsciiBackend;

impl RenderingBackend for AsciiBackend {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        let columns = scene
            .cells
            .iter()
            .map(|cell| cell.cell.column() + 1)
            .max()
            .unwrap_or(0) as usize;
        let rows = scene
            .cells
            .iter()
            .map(|cell| cell.cell.row() + 1)
            .max()
            .unwrap_or(0) as usize;
        if columns == 0 || rows == 0 {
            return Ok(());
        }

        let mut frame = vec![vec!['.'; columns]; rows];
        for cell in &scene.cells {
            let glyph = match cell.fill {
                fill if fill == rampart_rendering::palette::BLOCKED_CELL => '#',
                fill if fill == rampart_rendering::palette::OCCUPIED_CELL => 'T',
                _ => '.',
            };
            frame[cell.cell.row() as usize][cell.cell.column() as usize] = glyph;
        }

        let stamp = |frame: &mut Vec<Vec<char>>, x: f32, y: f32, glyph: char| {
            if x < 0.0 || y < 0.0 {
                return;
            }
            let column = (x / scene.cell_length) as usize;
            let row = (y / scene.cell_length) as usize;
            if row < rows && column < columns {
                frame[row][column] = glyph;
            }
        };
        for enemy in &scene.enemies {
            stamp(&mut frame, enemy.center.x, enemy.center.y, 'e');
        }
        for bullet in &scene.bullets {
            stamp(&mut frame, bullet.center.x, bullet.center.y, '*');
        }

        for row in frame {
            let line: String = row.into_iter().collect();
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_cell, Tally};
    use rampart_core::{CellCoord, EnemyId, Event};

    #[test]
    fn turret_specs_parse_as_column_by_row() {
        assert_eq!(parse_cell("3x4").unwrap(), CellCoord::new(3, 4));
        assert_eq!(parse_cell("0x0").unwrap(), CellCoord::new(0, 0));
        assert!(parse_cell("3,4").is_err());
        assert!(parse_cell("x4").is_err());
        assert!(parse_cell("3x").is_err());
    }

    #[test]
    fn the_tally_counts_lifecycle_events() {
        let mut tally = Tally::default();
        tally.record(&Event::SpawnDropped);
        tally.record(&Event::EnemyExited {
            enemy: EnemyId::new(0),
        });
        tally.record(&Event::EnemyExited {
            enemy: EnemyId::new(1),
        });

        assert_eq!(tally.spawn_drops, 1);
        assert_eq!(tally.exited, 2);
        assert_eq!(tally.spawned, 0);
    }
}
