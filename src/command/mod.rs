//! Textual command stream for scripted play and verification.
//!
//! Commands: `PLACE x y DIR`, `SELECT DIR`, `CLICK x y`, `TICK [n]`,
//! `SETTLE`, `UNDO`, `RESET`, `STATE`, `HISTORY`, `COUNTS`, `LEGAL [DIR]`.

mod parser;
mod runner;

pub use parser::{parse_line, Command, CommandError};
pub use runner::{CommandRunner, RunSummary};
