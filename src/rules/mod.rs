//! Move legality and the chain reaction engine.
//!
//! - `legality`: `Move`, the pure legality predicate and highlight targets
//! - `engine`: `ChainEngine`, the Idle/Propagating state machine

pub mod legality;
pub mod engine;

pub use legality::{is_legal_move, legal_targets, Move};
pub use engine::{ChainEngine, ChainState, StepOutcome};
