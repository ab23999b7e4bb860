//! Arrow directions.
//!
//! A cell holds one of the four arrow directions or `Empty`. Rotation
//! cycles the arrows clockwise: Up → Right → Down → Left → Up.
//!
//! ```
//! use arrow_chain::core::Direction;
//!
//! assert_eq!(Direction::Up.rotated(), Direction::Right);
//! assert_eq!(Direction::Left.rotated(), Direction::Up);
//! assert_eq!(Direction::Empty.rotated(), Direction::Empty);
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Direction state of a cell.
///
/// `Empty` is the "no arrow placed" sentinel. It is never a propagation
/// direction and rotation never produces it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
    #[default]
    Empty,
}

impl Direction {
    /// The four arrow directions in rotation order.
    pub const ARROWS: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Next direction in the clockwise cycle. `Empty` stays `Empty`.
    #[must_use]
    pub const fn rotated(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Empty => Direction::Empty,
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Direction::Empty)
    }

    /// Unit offset `(dx, dy)` for this direction, y growing downward.
    ///
    /// Returns `None` for `Empty`.
    #[must_use]
    pub const fn offset(self) -> Option<(i8, i8)> {
        match self {
            Direction::Up => Some((0, -1)),
            Direction::Right => Some((1, 0)),
            Direction::Down => Some((0, 1)),
            Direction::Left => Some((-1, 0)),
            Direction::Empty => None,
        }
    }

    /// Arrow glyph shown on the board. Empty cells render blank.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Right => "→",
            Direction::Down => "↓",
            Direction::Left => "←",
            Direction::Empty => "",
        }
    }

    /// Upper-case keyword used by the command stream.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Right => "RIGHT",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Empty => "EMPTY",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Error for a direction token that is not one of the four arrows.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction `{0}` (expected UP, RIGHT, DOWN or LEFT)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parses an arrow direction. `Empty` is not accepted: it cannot be placed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UP" | "U" => Ok(Direction::Up),
            "RIGHT" | "R" => Ok(Direction::Right),
            "DOWN" | "D" => Ok(Direction::Down),
            "LEFT" | "L" => Ok(Direction::Left),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}
