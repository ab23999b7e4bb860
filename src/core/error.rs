//! Error taxonomy for the engine.
//!
//! - `OutOfRange`: a coordinate outside the lattice. Caller error, rejected
//!   at the boundary and never clamped.
//! - `IllegalMove`: the legality predicate failed. Expected from user input;
//!   callers usually treat it as a plain "not accepted".
//! - `InvalidTransition`: the chain engine was driven in the wrong state
//!   (submit while propagating, step while idle).
//! - `ReplayDiverged`: a recorded move was not accepted while rebuilding the
//!   grid from history.
//!
//! Every failing operation is side-effect free: a rejected submission never
//! partially mutates the grid.

use thiserror::Error;

use super::direction::Direction;
use super::position::Position;

/// Errors produced by the grid, the chain engine and history replay.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("coordinate ({x}, {y}) is outside the grid")]
    OutOfRange { x: i64, y: i64 },

    #[error("illegal move: {direction} at {position}")]
    IllegalMove {
        position: Position,
        direction: Direction,
    },

    #[error("cannot {operation} while {state}")]
    InvalidTransition {
        operation: &'static str,
        state: &'static str,
    },

    #[error("replayed move #{index} was rejected")]
    ReplayDiverged { index: usize },
}

impl GameError {
    /// True for errors that are an ordinary outcome of user input rather
    /// than adapter misuse.
    #[must_use]
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, GameError::IllegalMove { .. })
    }
}
