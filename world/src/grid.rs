//! Fixed-size occupancy map over discrete grid cells.

use rampart_core::{CellCoord, LevelLayout, PlacementError, WorldPoint};

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// The cell may receive a turret.
    Free,
    /// The cell is part of the enemy path corridor; immutable for the session.
    Blocked,
    /// The cell holds a turret.
    Occupied,
}

/// Dense occupancy map answering whether a turret may occupy a cell.
///
/// Created once per session from a [`LevelLayout`]; mutated only by turret
/// placement; never resized.
#[derive(Clone, Debug)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cell_length: f32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Builds a grid from a level layout, blocking every corridor cell.
    #[must_use]
    pub(crate) fn from_layout(layout: &LevelLayout) -> Self {
        let capacity_u64 = u64::from(layout.columns()) * u64::from(layout.rows());
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        let mut grid = Self {
            columns: layout.columns(),
            rows: layout.rows(),
            cell_length: layout.cell_length(),
            cells: vec![CellState::Free; capacity],
        };

        for cell in layout.corridor() {
            if let Some(index) = grid.index(*cell) {
                grid.cells[index] = CellState::Blocked;
            }
        }

        grid
    }

    /// Number of cell columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell in world units.
    #[must_use]
    pub const fn cell_length(&self) -> f32 {
        self.cell_length
    }

    /// Returns the state of the provided cell, or `None` when out of bounds.
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> Option<CellState> {
        self.index(cell).map(|index| self.cells[index])
    }

    /// Reports whether a turret may occupy the provided cell.
    ///
    /// Out-of-bounds coordinates are rejected here rather than causing
    /// undefined access further down.
    #[must_use]
    pub fn is_free(&self, cell: CellCoord) -> bool {
        self.state(cell) == Some(CellState::Free)
    }

    /// Classifies why the provided cell cannot receive a turret.
    pub fn ensure_free(&self, cell: CellCoord) -> Result<(), PlacementError> {
        match self.state(cell) {
            None => Err(PlacementError::OutOfBounds),
            Some(CellState::Blocked) => Err(PlacementError::Blocked),
            Some(CellState::Occupied) => Err(PlacementError::Occupied),
            Some(CellState::Free) => Ok(()),
        }
    }

    /// Marks the provided cell as occupied by a turret.
    ///
    /// Precondition: [`Grid::is_free`] holds. Rejected calls mutate nothing.
    pub fn occupy(&mut self, cell: CellCoord) -> Result<(), PlacementError> {
        self.ensure_free(cell)?;
        if let Some(index) = self.index(cell) {
            self.cells[index] = CellState::Occupied;
        }
        Ok(())
    }

    /// World position of the center of the provided cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> WorldPoint {
        let half = self.cell_length / 2.0;
        WorldPoint::new(
            cell.column() as f32 * self.cell_length + half,
            cell.row() as f32 * self.cell_length + half,
        )
    }

    /// Maps a world position to the cell containing it.
    ///
    /// Negative and out-of-range coordinates yield `None`.
    #[must_use]
    pub fn cell_at(&self, x: f32, y: f32) -> Option<CellCoord> {
        if self.cell_length <= 0.0 || x < 0.0 || y < 0.0 {
            return None;
        }

        let column = (x / self.cell_length) as u32;
        let row = (y / self.cell_length) as u32;
        if column < self.columns && row < self.rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}
