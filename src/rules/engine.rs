//! The chain reaction state machine.
//!
//! ## States
//!
//! - `Idle`: no chain running; `submit` is accepted if the move is legal.
//! - `Propagating { active }`: a chain is running; `step` rotates `active`.
//!
//! ## Transitions
//!
//! - `submit` (Idle only): place the arrow, make the cell it points at the
//!   active cell, enter `Propagating`.
//! - `step` (Propagating only): rotate the active cell clockwise, then look
//!   at the neighbor it now points to. Off-grid or empty ends the chain;
//!   otherwise that neighbor becomes the active cell for the next tick.
//!
//! One cell is rotated per step, so a chain of length N takes N steps. At
//! most one chain runs at a time: `submit` is rejected while propagating.
//!
//! A chain always terminates. Every visit rotates the visited cell, so a
//! cell visited forever would eventually point at each of its four
//! neighbors, and every one of those would have to be filled and visited
//! forever too. That spreads to a filled cell touching an edge or an empty
//! cell, which ends the chain.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{Direction, GameError, Grid, Position};

use super::legality::{chain_target, Move};

/// Engine state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainState {
    #[default]
    Idle,
    Propagating { active: Position },
}

impl ChainState {
    fn name(self) -> &'static str {
        match self {
            ChainState::Idle => "idle",
            ChainState::Propagating { .. } => "propagating",
        }
    }
}

/// Result of a single propagation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The chain moves on to `next`, which is rotated on the following step.
    Continued {
        rotated: Position,
        direction: Direction,
        next: Position,
    },
    /// The rotated cell points off-grid or at an empty cell. Engine is idle.
    Terminated {
        rotated: Position,
        direction: Direction,
    },
}

impl StepOutcome {
    /// The cell rotated during this step.
    #[must_use]
    pub fn rotated(&self) -> Position {
        match *self {
            StepOutcome::Continued { rotated, .. } | StepOutcome::Terminated { rotated, .. } => rotated,
        }
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        matches!(self, StepOutcome::Terminated { .. })
    }
}

/// Chain engine.
///
/// The engine does not own the grid; it is handed the grid on every call and
/// is the only component that writes cell directions during play.
///
/// ```
/// use arrow_chain::core::{Direction, Grid, Position};
/// use arrow_chain::rules::{ChainEngine, Move};
///
/// let mut grid = Grid::new();
/// let mut engine = ChainEngine::new();
///
/// let mv = Move::new(Position::new(2, 1).unwrap(), Direction::Down);
/// assert!(engine.submit(&mut grid, mv));
/// assert_eq!(engine.active_cell(), Some(Position::CENTER));
///
/// let ticks = engine.run_to_idle(&mut grid);
/// assert_eq!(ticks, 1);
/// assert_eq!(grid.direction(Position::CENTER), Direction::Right);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEngine {
    state: ChainState,
    /// Cells rotated by the current (or last finished) chain, in order.
    trail: SmallVec<[Position; 8]>,
}

impl ChainEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> ChainState {
        self.state
    }

    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        matches!(self.state, ChainState::Propagating { .. })
    }

    /// The cell that the next step will rotate.
    #[must_use]
    pub fn active_cell(&self) -> Option<Position> {
        match self.state {
            ChainState::Idle => None,
            ChainState::Propagating { active } => Some(active),
        }
    }

    /// Cells rotated by the current chain so far (or by the last chain once idle).
    #[must_use]
    pub fn trail(&self) -> &[Position] {
        &self.trail
    }

    /// Submit a move, reporting why it was rejected.
    ///
    /// Rejections never touch the grid.
    pub fn try_submit(&mut self, grid: &mut Grid, mv: Move) -> Result<(), GameError> {
        if self.is_in_progress() {
            return Err(GameError::InvalidTransition {
                operation: "submit",
                state: self.state.name(),
            });
        }

        let active = chain_target(grid, mv.position, mv.direction).ok_or(GameError::IllegalMove {
            position: mv.position,
            direction: mv.direction,
        })?;

        grid.set_direction(mv.position, mv.direction);
        self.state = ChainState::Propagating { active };
        self.trail.clear();

        debug!(position = %mv.position, direction = %mv.direction, %active, "move accepted");
        Ok(())
    }

    /// Submit a move. Returns whether it was accepted.
    pub fn submit(&mut self, grid: &mut Grid, mv: Move) -> bool {
        match self.try_submit(grid, mv) {
            Ok(()) => true,
            Err(err) => {
                trace!(%mv, %err, "move rejected");
                false
            }
        }
    }

    /// Advance the chain by one cell.
    pub fn step(&mut self, grid: &mut Grid) -> Result<StepOutcome, GameError> {
        let ChainState::Propagating { active } = self.state else {
            return Err(GameError::InvalidTransition {
                operation: "step",
                state: self.state.name(),
            });
        };

        let direction = grid.rotate(active);
        self.trail.push(active);

        match grid.neighbor(active, direction) {
            Some(next) if !next.is_empty() => {
                let next = next.position;
                self.state = ChainState::Propagating { active: next };
                debug!(rotated = %active, %direction, %next, "chain continued");
                Ok(StepOutcome::Continued {
                    rotated: active,
                    direction,
                    next,
                })
            }
            _ => {
                self.state = ChainState::Idle;
                debug!(rotated = %active, %direction, length = self.trail.len(), "chain terminated");
                Ok(StepOutcome::Terminated {
                    rotated: active,
                    direction,
                })
            }
        }
    }

    /// Step until idle. Returns the number of steps taken.
    pub fn run_to_idle(&mut self, grid: &mut Grid) -> usize {
        let mut ticks = 0;
        while self.is_in_progress() {
            if self.step(grid).is_err() {
                break;
            }
            ticks += 1;
        }
        ticks
    }
}
