//! Virtual-time scheduling of chain and render ticks.
//!
//! The core has no timers. A `Scheduler` owns a millisecond clock and two
//! periodic triggers; the host advances the clock and the scheduler fires
//! whatever fell due, in time order. Input is not scheduled: the host calls
//! `ArrowGame::on_input` whenever the user acts.

use tracing::trace;

use crate::core::EngineConfig;

use super::arrow_game::{ArrowGame, RenderFrame};

/// A trigger that fires every `period_ms`, first at `period_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodicTrigger {
    period_ms: u64,
    next_due_ms: u64,
    /// Set once the trigger has fired at `u64::MAX`.
    exhausted: bool,
}

impl PeriodicTrigger {
    /// A zero period is treated as 1 ms.
    #[must_use]
    pub fn new(period_ms: u64) -> Self {
        let period_ms = period_ms.max(1);
        Self {
            period_ms,
            next_due_ms: period_ms,
            exhausted: false,
        }
    }

    #[must_use]
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    #[must_use]
    pub fn next_due_ms(&self) -> u64 {
        self.next_due_ms
    }

    /// Next firing time, or `None` once the clock has run out.
    #[must_use]
    pub fn due(&self) -> Option<u64> {
        (!self.exhausted).then_some(self.next_due_ms)
    }

    fn fire(&mut self) {
        self.exhausted = self.next_due_ms == u64::MAX;
        self.next_due_ms = self.next_due_ms.saturating_add(self.period_ms);
    }
}

/// What one `advance` call fired.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    pub chain_ticks: usize,
    pub render_ticks: usize,
    /// Frame from the last render tick fired, if any.
    pub last_frame: Option<RenderFrame>,
}

/// Drives an `ArrowGame` from elapsed time.
///
/// ```
/// use arrow_chain::core::{Direction, EngineConfig, Position};
/// use arrow_chain::game::{ArrowGame, Scheduler};
/// use arrow_chain::rules::Move;
///
/// let mut game = ArrowGame::new();
/// let mut scheduler = Scheduler::new(&EngineConfig::default());
///
/// game.place(Move::new(Position::new(2, 1).unwrap(), Direction::Down)).unwrap();
/// let report = scheduler.advance(&mut game, 1000);
/// assert_eq!(report.chain_ticks, 1);
/// assert!(!game.engine().is_in_progress());
/// ```
#[derive(Clone, Debug)]
pub struct Scheduler {
    now_ms: u64,
    chain: PeriodicTrigger,
    render: PeriodicTrigger,
}

impl Scheduler {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            now_ms: 0,
            chain: PeriodicTrigger::new(config.chain_tick_ms),
            render: PeriodicTrigger::new(config.render_tick_ms),
        }
    }

    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Advance the clock, firing every due trigger in time order.
    ///
    /// When both triggers fall due at the same instant the chain tick fires
    /// first, so the frame shows the post-step state.
    pub fn advance(&mut self, game: &mut ArrowGame, elapsed_ms: u64) -> TickReport {
        let target = self.now_ms.saturating_add(elapsed_ms);
        let mut report = TickReport::default();

        loop {
            let chain_due = self.chain.due();
            let render_due = self.render.due();
            let Some(next) = chain_due.into_iter().chain(render_due).min() else {
                break;
            };
            if next > target {
                break;
            }
            self.now_ms = next;

            if chain_due == Some(next) {
                game.on_chain_tick();
                self.chain.fire();
                report.chain_ticks += 1;
            }
            if render_due == Some(next) {
                report.last_frame = Some(game.on_render_tick());
                self.render.fire();
                report.render_ticks += 1;
            }
        }

        self.now_ms = target;
        trace!(
            now_ms = self.now_ms,
            chain_ticks = report.chain_ticks,
            render_ticks = report.render_ticks,
            "scheduler advanced"
        );
        report
    }
}
