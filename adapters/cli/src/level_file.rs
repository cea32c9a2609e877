//! TOML level files accepted by the command-line runner.

use std::{fs, path::Path, time::Duration};

use rampart_core::{CellCoord, LevelLayout, WorldPoint};
use rampart_session::SessionConfig;
use serde::Deserialize;
use thiserror::Error;

/// Reasons a level file cannot be turned into a session configuration.
#[derive(Debug, Error)]
pub(crate) enum LevelFileError {
    /// The file could not be read from disk.
    #[error("failed to read level file")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML or is missing required fields.
    #[error("failed to parse level file")]
    Parse(#[from] toml::de::Error),
    /// A path needs at least a start and an end.
    #[error("level file must list at least two waypoints")]
    TooFewWaypoints,
    /// A grid with zero columns or rows has nowhere to place turrets.
    #[error("grid dimensions must be non-zero")]
    EmptyGrid,
    /// Cell geometry degenerates at zero or negative side lengths.
    #[error("cell_length must be positive")]
    NonPositiveCellLength,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelFile {
    columns: u32,
    rows: u32,
    cell_length: f32,
    waypoints: Vec<[f32; 2]>,
    #[serde(default)]
    corridor: Vec<[u32; 2]>,
    #[serde(default)]
    spawn_interval_ms: Option<u64>,
}

/// Loads a session configuration from the level file at `path`.
pub(crate) fn load(path: &Path) -> Result<SessionConfig, LevelFileError> {
    parse(&fs::read_to_string(path)?)
}

fn parse(text: &str) -> Result<SessionConfig, LevelFileError> {
    let file: LevelFile = toml::from_str(text)?;
    if file.columns == 0 || file.rows == 0 {
        return Err(LevelFileError::EmptyGrid);
    }
    if file.cell_length <= 0.0 {
        return Err(LevelFileError::NonPositiveCellLength);
    }
    if file.waypoints.len() < 2 {
        return Err(LevelFileError::TooFewWaypoints);
    }

    let waypoints = file
        .waypoints
        .iter()
        .map(|[x, y]| WorldPoint::new(*x, *y))
        .collect();
    let corridor = file
        .corridor
        .iter()
        .map(|[column, row]| CellCoord::new(*column, *row))
        .collect();
    let spawn_interval = file
        .spawn_interval_ms
        .map(Duration::from_millis)
        .unwrap_or(SessionConfig::default().spawn_interval);

    Ok(SessionConfig {
        layout: LevelLayout::new(
            file.columns,
            file.rows,
            file.cell_length,
            waypoints,
            corridor,
        ),
        spawn_interval,
    })
}
