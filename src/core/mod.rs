//! Core types: directions, positions, the grid, errors, configuration, RNG.

pub mod direction;
pub mod position;
pub mod grid;
pub mod error;
pub mod config;
pub mod rng;

pub use direction::{Direction, ParseDirectionError};
pub use position::{Position, CELL_COUNT, GRID_SIZE};
pub use grid::{Cell, Grid};
pub use error::GameError;
pub use config::EngineConfig;
pub use rng::GameRng;
