//! Lattice coordinates.
//!
//! A `Position` is always inside the 5×5 lattice: the only constructors are
//! checked and fail with `GameError::OutOfRange`. Cells are numbered in
//! row-major order, `index = y * 5 + x`.
//!
//! ```
//! use arrow_chain::core::{Direction, Position};
//!
//! let p = Position::new(2, 1).unwrap();
//! assert_eq!(p.index(), 7);
//! assert_eq!(p.step(Direction::Down), Some(Position::new(2, 2).unwrap()));
//! assert_eq!(Position::new(0, 0).unwrap().step(Direction::Up), None);
//! assert!(Position::new(5, 0).is_err());
//! ```

use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::error::GameError;

/// Side length of the lattice.
pub const GRID_SIZE: usize = 5;

/// Number of cells in the lattice.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// A coordinate `(x, y)` in `[0, 5) × [0, 5)`.
///
/// Deserialization goes through `Position::new`, so out-of-range input is
/// rejected instead of producing an unchecked position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPosition", into = "RawPosition")]
pub struct Position {
    x: u8,
    y: u8,
}

/// Wire form of a `Position`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct RawPosition {
    x: i64,
    y: i64,
}

impl TryFrom<RawPosition> for Position {
    type Error = GameError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(raw.x, raw.y)
    }
}

impl From<Position> for RawPosition {
    fn from(position: Position) -> Self {
        RawPosition {
            x: position.x as i64,
            y: position.y as i64,
        }
    }
}

impl Position {
    /// The permanent chain root at the center of the grid.
    pub const CENTER: Position = Position { x: 2, y: 2 };

    /// Create a position, rejecting coordinates outside the lattice.
    pub fn new(x: i64, y: i64) -> Result<Self, GameError> {
        let size = GRID_SIZE as i64;
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Ok(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            Err(GameError::OutOfRange { x, y })
        }
    }

    /// Position for a row-major cell number.
    pub fn from_index(index: usize) -> Result<Self, GameError> {
        if index >= CELL_COUNT {
            return Err(GameError::OutOfRange {
                x: (index % GRID_SIZE) as i64,
                y: (index / GRID_SIZE) as i64,
            });
        }
        Ok(Self {
            x: (index % GRID_SIZE) as u8,
            y: (index / GRID_SIZE) as u8,
        })
    }

    #[must_use]
    pub const fn x(self) -> usize {
        self.x as usize
    }

    #[must_use]
    pub const fn y(self) -> usize {
        self.y as usize
    }

    /// Row-major cell number.
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * GRID_SIZE + self.x as usize
    }

    /// Adjacent position in `direction`, or `None` at the lattice edge.
    ///
    /// `Empty` has no neighbor and always yields `None`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset()?;
        Position::new(self.x as i64 + dx as i64, self.y as i64 + dy as i64).ok()
    }

    /// Iterate every lattice position in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(|i| Position {
            x: (i % GRID_SIZE) as u8,
            y: (i / GRID_SIZE) as u8,
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
