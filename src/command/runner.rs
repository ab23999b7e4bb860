//! Executes parsed commands against an `ArrowGame`.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::core::GameError;
use crate::game::{ArrowGame, InputEvent, InputOutcome};
use crate::rules::legal_targets;

use super::parser::{parse_line, Command};

/// Totals for one run over a command stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands executed.
    pub commands: usize,
    /// Lines that failed to parse or execute.
    pub errors: usize,
}

/// Drives a game from textual commands.
///
/// ```
/// use arrow_chain::command::{Command, CommandRunner};
///
/// let mut runner = CommandRunner::new();
/// assert_eq!(runner.execute("PLACE 2 1 DOWN".parse().unwrap()).unwrap(), "ok");
/// assert_eq!(runner.execute(Command::Tick(1)).unwrap(), "idle");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CommandRunner {
    game: ArrowGame,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_game(game: ArrowGame) -> Self {
        Self { game }
    }

    #[must_use]
    pub fn game(&self) -> &ArrowGame {
        &self.game
    }

    /// Execute one command and return its output text (possibly multi-line,
    /// without a trailing newline).
    pub fn execute(&mut self, command: Command) -> Result<String, GameError> {
        debug!(command = command.keyword(), "executing");
        let output = match command {
            Command::Place(mv) => self.input(InputEvent::Place(mv))?,
            Command::Click(position) => self.input(InputEvent::Click(position))?,
            Command::Select(direction) => self.input(InputEvent::Select(direction))?,
            Command::Undo => self.input(InputEvent::Undo)?,
            Command::Reset => self.input(InputEvent::Reset)?,
            Command::Tick(n) => {
                for _ in 0..n {
                    if self.game.on_chain_tick().is_none() {
                        break;
                    }
                }
                self.status()
            }
            Command::Settle => format!("settled after {} ticks", self.game.settle()),
            Command::State => format!("{}{}", self.game.grid(), self.status()),
            Command::History => {
                if self.game.history().is_empty() {
                    "(empty)".to_string()
                } else {
                    self.game
                        .history()
                        .entries()
                        .enumerate()
                        .map(|(i, mv)| format!("#{} {}", i + 1, mv))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            Command::Counts => self.game.on_render_tick().counts.to_string(),
            Command::Legal(direction) => {
                let direction = direction.unwrap_or(self.game.selected());
                let targets = if self.game.engine().is_in_progress() {
                    Vec::new()
                } else {
                    legal_targets(self.game.grid(), direction)
                };
                if targets.is_empty() {
                    "none".to_string()
                } else {
                    targets
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" ")
                }
            }
        };
        Ok(output)
    }

    /// Run a whole stream, writing one output block per command.
    ///
    /// Parse and execution errors are written as `error: line N: ...` and do
    /// not stop the stream.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> std::io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            let result = match parse_line(&line) {
                Ok(None) => continue,
                Ok(Some(command)) => self.execute(command).map_err(|e| e.to_string()),
                Err(err) => Err(err.to_string()),
            };

            match result {
                Ok(text) => {
                    summary.commands += 1;
                    writeln!(output, "{text}")?;
                }
                Err(message) => {
                    summary.errors += 1;
                    warn!(line = line_no, %message, "command failed");
                    writeln!(output, "error: line {line_no}: {message}")?;
                }
            }
        }

        Ok(summary)
    }

    fn input(&mut self, event: InputEvent) -> Result<String, GameError> {
        Ok(match self.game.on_input(event)? {
            InputOutcome::Selected(_) | InputOutcome::Accepted(_) | InputOutcome::Undone(_) | InputOutcome::Reset => {
                "ok".to_string()
            }
            InputOutcome::Rejected(err) => format!("rejected: {err}"),
            InputOutcome::NothingToUndo => "nothing to undo".to_string(),
        })
    }

    fn status(&self) -> String {
        match self.game.engine().active_cell() {
            Some(active) => format!("propagating at {active}"),
            None => "idle".to_string(),
        }
    }
}
