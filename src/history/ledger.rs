//! The accepted-move log.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{GameError, Grid};
use crate::rules::{ChainEngine, Move};

/// Rebuild `grid` from the initial state by replaying `moves` in order.
///
/// Each move is submitted to a fresh engine and its chain is driven to idle
/// before the next move is submitted. Returns the (idle) engine used.
///
/// A move that is rejected during replay yields `ReplayDiverged` with its
/// index; the grid is left as replayed up to that point.
pub fn replay<I>(moves: I, grid: &mut Grid) -> Result<ChainEngine, GameError>
where
    I: IntoIterator<Item = Move>,
{
    grid.reset_to_initial();
    let mut engine = ChainEngine::new();
    let mut replayed = 0;
    let mut ticks = 0;

    for (index, mv) in moves.into_iter().enumerate() {
        if !engine.submit(grid, mv) {
            warn!(index, %mv, "replay diverged");
            return Err(GameError::ReplayDiverged { index });
        }
        ticks += engine.run_to_idle(grid);
        replayed += 1;
    }

    info!(replayed, ticks, "replay complete");
    Ok(engine)
}

/// Ordered log of accepted moves.
///
/// Append-only during play, truncated from the end on undo, cleared on
/// reset. Backed by `im::Vector` so cloning a game is cheap.
///
/// ## Invariant
///
/// Whenever the engine is idle, the grid equals the result of replaying
/// the history from the initial grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vector<Move>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted move.
    ///
    /// Only call this after the engine accepted the move.
    pub fn record(&mut self, mv: Move) {
        self.entries.push_back(mv);
    }

    /// Recorded moves in submission order.
    pub fn entries(&self) -> impl Iterator<Item = &Move> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Move> {
        self.entries.last()
    }

    /// Rebuild `grid` from this history.
    pub fn replay_onto(&self, grid: &mut Grid) -> Result<ChainEngine, GameError> {
        replay(self.entries.iter().copied(), grid)
    }

    /// Drop the last move and rebuild `grid` from the remaining ones.
    ///
    /// Returns `Ok(None)` without touching anything when the history is
    /// empty. Otherwise returns the fresh idle engine the replay ran on, which
    /// replaces whatever engine (and live chain) the caller had.
    ///
    /// The rebuild runs on a scratch grid. If it diverges, both the history
    /// and `grid` are left exactly as they were.
    pub fn undo_last(&mut self, grid: &mut Grid) -> Result<Option<ChainEngine>, GameError> {
        let mut remaining = self.entries.clone();
        let Some(undone) = remaining.pop_back() else {
            return Ok(None);
        };

        let mut rebuilt = Grid::new();
        let engine = replay(remaining.iter().copied(), &mut rebuilt)?;

        self.entries = remaining;
        *grid = rebuilt;
        info!(%undone, remaining = self.entries.len(), "undid last move");
        Ok(Some(engine))
    }

    /// Clear the history and reset `grid` to the initial state.
    pub fn reset_all(&mut self, grid: &mut Grid) {
        self.entries.clear();
        grid.reset_to_initial();
        info!("history reset");
    }
}
