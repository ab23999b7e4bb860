//! Game facade, scheduling and random play.
//!
//! `ArrowGame` bundles the grid, the chain engine, the history and the
//! direction selector behind three entry points (`on_input`,
//! `on_chain_tick`, `on_render_tick`). `Scheduler` calls the tick entry
//! points from elapsed time; `RandomPlayer` generates legal input.

mod arrow_game;
mod random;
mod scheduler;

pub use arrow_game::{ArrowGame, DirectionCounts, InputEvent, InputOutcome, RenderFrame};
pub use random::RandomPlayer;
pub use scheduler::{PeriodicTrigger, Scheduler, TickReport};
