//! The 5×5 board of arrow cells.
//!
//! The grid owns all 25 cells in a flat row-major array. Neighbors are
//! computed from coordinates, so adjacency is fixed and symmetric for the
//! grid's lifetime and only a cell's direction ever changes.
//!
//! Cell directions are written only by the chain engine (and by
//! `reset_to_initial`); adapters get read-only access.

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::error::GameError;
use super::position::{Position, CELL_COUNT, GRID_SIZE};

/// A single board cell: a fixed position plus its current direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub position: Position,
    pub direction: Direction,
}

impl Cell {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.direction.is_empty()
    }
}

/// The game board.
///
/// ## Initial state
///
/// Every cell is `Empty` except the center `(2,2)`, which points `Up` and
/// acts as the permanent chain root.
///
/// ```
/// use arrow_chain::core::{Direction, Grid};
///
/// let grid = Grid::new();
/// assert_eq!(grid.cell_at(2, 2).unwrap().direction, Direction::Up);
/// assert_eq!(grid.non_empty_count(), 1);
/// ```
///
/// Serialized as the 25 cell directions in row-major order; positions are
/// implied by the slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[Direction; CELL_COUNT]", into = "[Direction; CELL_COUNT]")]
pub struct Grid {
    cells: [Cell; CELL_COUNT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[Direction; CELL_COUNT]> for Grid {
    fn from(directions: [Direction; CELL_COUNT]) -> Self {
        Self::from_directions(directions)
    }
}

impl From<Grid> for [Direction; CELL_COUNT] {
    fn from(grid: Grid) -> Self {
        grid.directions()
    }
}

impl Grid {
    /// Create a grid in the initial state.
    #[must_use]
    pub fn new() -> Self {
        let mut grid = Self::from_directions([Direction::Empty; CELL_COUNT]);
        grid.reset_to_initial();
        grid
    }

    /// Build a grid from row-major cell directions.
    #[must_use]
    pub fn from_directions(directions: [Direction; CELL_COUNT]) -> Self {
        let mut cells = [Cell {
            position: Position::CENTER,
            direction: Direction::Empty,
        }; CELL_COUNT];
        for (position, direction) in Position::all().zip(directions) {
            cells[position.index()] = Cell { position, direction };
        }
        Self { cells }
    }

    /// Clear every cell, then point the center up.
    pub fn reset_to_initial(&mut self) {
        for cell in &mut self.cells {
            cell.direction = Direction::Empty;
        }
        self.cells[Position::CENTER.index()].direction = Direction::Up;
    }

    /// Cell at raw coordinates.
    pub fn cell_at(&self, x: i64, y: i64) -> Result<&Cell, GameError> {
        Ok(self.cell(Position::new(x, y)?))
    }

    /// Cell at a checked position.
    #[must_use]
    pub fn cell(&self, position: Position) -> &Cell {
        &self.cells[position.index()]
    }

    #[must_use]
    pub fn direction(&self, position: Position) -> Direction {
        self.cell(position).direction
    }

    /// Adjacent cell in `direction`, or `None` at the boundary.
    ///
    /// `Empty` is not a direction of travel; it yields `None`.
    #[must_use]
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<&Cell> {
        position.step(direction).map(|p| self.cell(p))
    }

    /// All 25 cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Number of cells holding an arrow.
    #[must_use]
    pub fn non_empty_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Directions of all cells in row-major order.
    #[must_use]
    pub fn directions(&self) -> [Direction; CELL_COUNT] {
        self.cells.map(|c| c.direction)
    }

    /// Compact binary encoding of the cell directions.
    ///
    /// Two grids are in the same state iff their snapshots are equal.
    pub fn snapshot_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(&self.directions())
    }

    pub(crate) fn set_direction(&mut self, position: Position, direction: Direction) {
        self.cells[position.index()].direction = direction;
    }

    /// Rotate a cell one step clockwise, returning the new direction.
    pub(crate) fn rotate(&mut self, position: Position) -> Direction {
        let cell = &mut self.cells[position.index()];
        cell.direction = cell.direction.rotated();
        cell.direction
    }
}

impl std::fmt::Display for Grid {
    /// Five board rows; `.` marks an empty cell.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(GRID_SIZE) {
            let line: Vec<&str> = row
                .iter()
                .map(|c| if c.is_empty() { "." } else { c.direction.glyph() })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
