//! Move history and replay.
//!
//! History is the ordered log of accepted moves. Grid state is never undone
//! incrementally: undo drops the last move and rebuilds the grid by
//! replaying the rest from the initial state, each chain run to completion
//! before the next move is submitted.

mod ledger;

pub use ledger::{replay, History};
