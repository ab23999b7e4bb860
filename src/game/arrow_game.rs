//! The game facade driven by the input, chain and render entry points.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::core::{Cell, Direction, GameError, Grid, Position};
use crate::history::History;
use crate::rules::{legal_targets, ChainEngine, Move, StepOutcome};

/// Events produced by the input adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pick the direction that cell clicks will place.
    Select(Direction),
    /// Place the selected direction on a cell.
    Click(Position),
    /// Place an explicit move, ignoring the selector.
    Place(Move),
    Undo,
    Reset,
}

/// What an input event did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Selected(Direction),
    Accepted(Move),
    /// The placement was not accepted (illegal, or a chain is running).
    Rejected(GameError),
    Undone(Move),
    NothingToUndo,
    Reset,
}

/// Number of cells pointing in each arrow direction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirectionCounts {
    counts: FxHashMap<Direction, usize>,
}

impl DirectionCounts {
    /// Count the arrows currently on `grid`.
    #[must_use]
    pub fn count(grid: &Grid) -> Self {
        let mut counts = FxHashMap::default();
        for cell in grid.cells().filter(|c| !c.is_empty()) {
            *counts.entry(cell.direction).or_insert(0) += 1;
        }
        Self { counts }
    }

    #[must_use]
    pub fn get(&self, direction: Direction) -> usize {
        self.counts.get(&direction).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl std::fmt::Display for DirectionCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "up={} right={} down={} left={}",
            self.get(Direction::Up),
            self.get(Direction::Right),
            self.get(Direction::Down),
            self.get(Direction::Left)
        )
    }
}

/// Read-only view of the game for one render tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderFrame {
    /// All 25 cells in row-major order.
    pub cells: Vec<Cell>,
    /// Legal targets for the selected direction. Empty while a chain runs.
    pub highlighted: Vec<Position>,
    pub counts: DirectionCounts,
    pub selected: Direction,
    pub active: Option<Position>,
    pub in_progress: bool,
}

impl RenderFrame {
    #[must_use]
    pub fn is_highlighted(&self, position: Position) -> bool {
        self.highlighted.contains(&position)
    }
}

/// Grid, chain engine, move history and direction selector in one place.
///
/// Adapters call three entry points:
/// - `on_input` for user actions,
/// - `on_chain_tick` once per chain period,
/// - `on_render_tick` as often as they like (it never mutates).
///
/// ```
/// use arrow_chain::core::{Direction, Position};
/// use arrow_chain::game::{ArrowGame, InputEvent};
///
/// let mut game = ArrowGame::new();
/// game.on_input(InputEvent::Select(Direction::Down)).unwrap();
/// game.on_input(InputEvent::Click(Position::new(2, 1).unwrap())).unwrap();
/// assert!(game.engine().is_in_progress());
///
/// game.on_chain_tick();
/// assert!(!game.engine().is_in_progress());
/// assert_eq!(game.grid().direction(Position::CENTER), Direction::Right);
/// ```
#[derive(Clone, Debug)]
pub struct ArrowGame {
    grid: Grid,
    engine: ChainEngine,
    history: History,
    selected: Direction,
}

impl Default for ArrowGame {
    fn default() -> Self {
        Self::new()
    }
}

impl ArrowGame {
    /// New game: initial grid, idle engine, empty history, `Up` selected.
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            engine: ChainEngine::new(),
            history: History::new(),
            selected: Direction::Up,
        }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn engine(&self) -> &ChainEngine {
        &self.engine
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn selected(&self) -> Direction {
        self.selected
    }

    /// Handle one input event.
    ///
    /// Rejected placements come back as `InputOutcome::Rejected`; only a
    /// replay failure during undo is an `Err`.
    pub fn on_input(&mut self, event: InputEvent) -> Result<InputOutcome, GameError> {
        match event {
            InputEvent::Select(direction) => {
                if !direction.is_empty() {
                    self.selected = direction;
                }
                Ok(InputOutcome::Selected(self.selected))
            }
            InputEvent::Click(position) => Ok(self.place_outcome(Move::new(position, self.selected))),
            InputEvent::Place(mv) => Ok(self.place_outcome(mv)),
            InputEvent::Undo => Ok(match self.undo()? {
                Some(mv) => InputOutcome::Undone(mv),
                None => InputOutcome::NothingToUndo,
            }),
            InputEvent::Reset => {
                self.reset();
                Ok(InputOutcome::Reset)
            }
        }
    }

    /// Advance a running chain by one step. No-op while idle.
    pub fn on_chain_tick(&mut self) -> Option<StepOutcome> {
        if !self.engine.is_in_progress() {
            return None;
        }
        self.engine.step(&mut self.grid).ok()
    }

    /// Build the view for this render tick.
    #[must_use]
    pub fn on_render_tick(&self) -> RenderFrame {
        let in_progress = self.engine.is_in_progress();
        let highlighted = if in_progress {
            Vec::new()
        } else {
            legal_targets(&self.grid, self.selected)
        };
        trace!(in_progress, highlighted = highlighted.len(), "render tick");

        RenderFrame {
            cells: self.grid.cells().copied().collect(),
            highlighted,
            counts: DirectionCounts::count(&self.grid),
            selected: self.selected,
            active: self.engine.active_cell(),
            in_progress,
        }
    }

    /// Submit a move and record it if accepted.
    pub fn place(&mut self, mv: Move) -> Result<(), GameError> {
        self.engine.try_submit(&mut self.grid, mv)?;
        self.history.record(mv);
        Ok(())
    }

    fn place_outcome(&mut self, mv: Move) -> InputOutcome {
        match self.place(mv) {
            Ok(()) => InputOutcome::Accepted(mv),
            Err(err) => {
                trace!(%mv, %err, "placement rejected");
                InputOutcome::Rejected(err)
            }
        }
    }

    /// Run the current chain to completion. Returns the number of steps.
    pub fn settle(&mut self) -> usize {
        self.engine.run_to_idle(&mut self.grid)
    }

    /// Undo the last move by replaying the rest of the history.
    ///
    /// A running chain is discarded. Returns the undone move, or `None` if
    /// there was nothing to undo.
    pub fn undo(&mut self) -> Result<Option<Move>, GameError> {
        let Some(&undone) = self.history.last() else {
            return Ok(None);
        };
        if let Some(engine) = self.history.undo_last(&mut self.grid)? {
            self.engine = engine;
        }
        debug!(%undone, "undo applied");
        Ok(Some(undone))
    }

    /// Clear history and return to the initial grid with an idle engine.
    pub fn reset(&mut self) {
        self.history.reset_all(&mut self.grid);
        self.engine = ChainEngine::new();
        info!("game reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i64, y: i64) -> Position {
        Position::new(x, y).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = ArrowGame::new();
        assert_eq!(game.selected(), Direction::Up);
        assert_eq!(game.grid(), &Grid::new());
        assert!(game.history().is_empty());
        assert!(!game.engine().is_in_progress());
    }

    #[test]
    fn test_click_places_selected_direction() {
        let mut game = ArrowGame::new();
        game.on_input(InputEvent::Select(Direction::Right)).unwrap();

        let outcome = game.on_input(InputEvent::Click(pos(1, 2))).unwrap();

        assert_eq!(outcome, InputOutcome::Accepted(Move::new(pos(1, 2), Direction::Right)));
        assert_eq!(game.grid().direction(pos(1, 2)), Direction::Right);
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_select_empty_keeps_previous() {
        let mut game = ArrowGame::new();
        let outcome = game.on_input(InputEvent::Select(Direction::Empty)).unwrap();
        assert_eq!(outcome, InputOutcome::Selected(Direction::Up));
    }

    #[test]
    fn test_rejected_moves_are_not_recorded() {
        let mut game = ArrowGame::new();

        let outcome = game.on_input(InputEvent::Click(pos(0, 0))).unwrap();
        assert!(matches!(outcome, InputOutcome::Rejected(GameError::IllegalMove { .. })));

        game.on_input(InputEvent::Place(Move::new(pos(2, 1), Direction::Down))).unwrap();
        let outcome = game
            .on_input(InputEvent::Place(Move::new(pos(2, 3), Direction::Up)))
            .unwrap();
        assert!(matches!(outcome, InputOutcome::Rejected(GameError::InvalidTransition { .. })));

        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_chain_tick_when_idle_is_noop() {
        let mut game = ArrowGame::new();
        assert_eq!(game.on_chain_tick(), None);
        assert_eq!(game.grid(), &Grid::new());
    }

    #[test]
    fn test_render_frame_idle() {
        let mut game = ArrowGame::new();
        game.on_input(InputEvent::Select(Direction::Down)).unwrap();

        let frame = game.on_render_tick();

        assert_eq!(frame.cells.len(), 25);
        assert_eq!(frame.highlighted, vec![pos(2, 1)]);
        assert!(frame.is_highlighted(pos(2, 1)));
        assert_eq!(frame.counts.get(Direction::Up), 1);
        assert_eq!(frame.counts.total(), 1);
        assert!(!frame.in_progress);
        assert_eq!(frame.active, None);
    }

    #[test]
    fn test_render_frame_hides_highlights_mid_chain() {
        let mut game = ArrowGame::new();
        game.place(Move::new(pos(2, 1), Direction::Down)).unwrap();

        let frame = game.on_render_tick();

        assert!(frame.in_progress);
        assert!(frame.highlighted.is_empty());
        assert_eq!(frame.active, Some(Position::CENTER));
    }

    #[test]
    fn test_render_does_not_mutate() {
        let mut game = ArrowGame::new();
        game.place(Move::new(pos(2, 1), Direction::Down)).unwrap();
        let before = game.grid().clone();

        for _ in 0..10 {
            let _ = game.on_render_tick();
        }

        assert_eq!(game.grid(), &before);
        assert!(game.engine().is_in_progress());
    }

    #[test]
    fn test_undo_discards_running_chain() {
        let mut game = ArrowGame::new();
        game.place(Move::new(pos(2, 1), Direction::Down)).unwrap();
        game.settle();
        let after_first = game.grid().clone();

        game.place(Move::new(pos(1, 2), Direction::Right)).unwrap();
        assert!(game.engine().is_in_progress());

        let outcome = game.on_input(InputEvent::Undo).unwrap();

        assert_eq!(outcome, InputOutcome::Undone(Move::new(pos(1, 2), Direction::Right)));
        assert!(!game.engine().is_in_progress());
        assert_eq!(game.grid(), &after_first);
    }

    #[test]
    fn test_undo_with_empty_history() {
        let mut game = ArrowGame::new();
        assert_eq!(game.on_input(InputEvent::Undo).unwrap(), InputOutcome::NothingToUndo);
    }

    #[test]
    fn test_reset() {
        let mut game = ArrowGame::new();
        game.place(Move::new(pos(2, 1), Direction::Down)).unwrap();

        assert_eq!(game.on_input(InputEvent::Reset).unwrap(), InputOutcome::Reset);
        assert_eq!(game.grid(), &Grid::new());
        assert!(game.history().is_empty());
        assert!(!game.engine().is_in_progress());
    }

    #[test]
    fn test_direction_counts() {
        let mut game = ArrowGame::new();
        game.place(Move::new(pos(2, 1), Direction::Down)).unwrap();
        game.settle();

        let counts = DirectionCounts::count(game.grid());
        assert_eq!(counts.get(Direction::Down), 1);
        assert_eq!(counts.get(Direction::Right), 1);
        assert_eq!(counts.get(Direction::Up), 0);
        assert_eq!(counts.to_string(), "up=0 right=1 down=1 left=0");
    }
}
