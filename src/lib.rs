//! # arrow-chain
//!
//! A deterministic puzzle engine: arrows on a 5×5 grid, where placing a new
//! arrow starts a chain reaction that rotates downstream arrows one tick at
//! a time until the chain runs off the grid or into an empty cell.
//!
//! ## Design Principles
//!
//! 1. **No ambient state**: `ArrowGame` holds the grid, engine, history and
//!    selector; hosts call its entry points explicitly.
//!
//! 2. **One chain at a time**: the engine rejects submissions while a chain
//!    is propagating, so no interleaving is possible.
//!
//! 3. **Replay is the only undo**: the grid at any idle moment equals the
//!    replay of the move history from the initial grid.
//!
//! ## Modules
//!
//! - `core`: directions, positions, grid, errors, configuration, RNG
//! - `rules`: move legality and the chain engine
//! - `history`: accepted-move log and replay
//! - `game`: game facade, tick scheduler, random player
//! - `command`: textual command stream

pub mod core;
pub mod rules;
pub mod history;
pub mod game;
pub mod command;

// Re-export commonly used types
pub use crate::core::{Cell, Direction, EngineConfig, GameError, GameRng, Grid, Position};

pub use crate::rules::{is_legal_move, legal_targets, ChainEngine, ChainState, Move, StepOutcome};

pub use crate::history::History;

pub use crate::game::{
    ArrowGame, DirectionCounts, InputEvent, InputOutcome, RandomPlayer, RenderFrame,
    Scheduler, TickReport,
};

pub use crate::command::{parse_line, Command, CommandError, CommandRunner, RunSummary};
