//! Move representation and the legality predicate.
//!
//! A move places an arrow on an empty cell so that it points into an
//! existing arrow, extending a chain back toward the root. Legality is a
//! pure function of the current grid and is never cached: it changes as
//! neighbors fill in.

use serde::{Deserialize, Serialize};

use crate::core::{Direction, Grid, Position};

/// A candidate placement: target cell plus the direction to place.
///
/// ```
/// use arrow_chain::core::{Direction, Grid, Position};
/// use arrow_chain::rules::Move;
///
/// let grid = Grid::new();
/// let mv = Move::new(Position::new(2, 1).unwrap(), Direction::Down);
/// assert!(mv.is_legal(&grid));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub direction: Direction,
}

impl Move {
    #[must_use]
    pub const fn new(position: Position, direction: Direction) -> Self {
        Self { position, direction }
    }

    /// Check this move against the current grid.
    #[must_use]
    pub fn is_legal(&self, grid: &Grid) -> bool {
        is_legal_move(grid, self.position, self.direction)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.position, self.direction)
    }
}

/// Legality predicate.
///
/// A move is legal iff:
/// - the target cell is empty,
/// - the target has a neighbor in `direction` (not at the edge),
/// - that neighbor holds an arrow.
///
/// `Empty` is never a legal direction to place.
#[must_use]
pub fn is_legal_move(grid: &Grid, position: Position, direction: Direction) -> bool {
    chain_target(grid, position, direction).is_some()
}

/// The cell the chain starts on if the move is legal.
pub(crate) fn chain_target(grid: &Grid, position: Position, direction: Direction) -> Option<Position> {
    if !grid.cell(position).is_empty() {
        return None;
    }
    grid.neighbor(position, direction)
        .filter(|neighbor| !neighbor.is_empty())
        .map(|neighbor| neighbor.position)
}

/// Every position where placing `direction` is legal, in row-major order.
///
/// This is the highlight set an adapter paints for the selected direction.
#[must_use]
pub fn legal_targets(grid: &Grid, direction: Direction) -> Vec<Position> {
    Position::all()
        .filter(|&p| is_legal_move(grid, p, direction))
        .collect()
}
