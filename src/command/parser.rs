//! Parser for the line-oriented command stream.
//!
//! # Parsing Rules
//!
//! - One command per line; keywords are case-insensitive
//! - Tokens are separated by any whitespace
//! - `#` starts a comment that runs to the end of the line
//! - Blank and comment-only lines parse to `None`
//! - Coordinates are checked against the grid at parse time
//!
//! ```
//! use arrow_chain::command::{parse_line, Command};
//! use arrow_chain::core::{Direction, Position};
//! use arrow_chain::rules::Move;
//!
//! assert_eq!(
//!     parse_line("place 2 1 down").unwrap(),
//!     Some(Command::Place(Move::new(Position::new(2, 1).unwrap(), Direction::Down)))
//! );
//! assert_eq!(parse_line("TICK 3").unwrap(), Some(Command::Tick(3)));
//! assert_eq!(parse_line("   # just a comment").unwrap(), None);
//! assert!(parse_line("PLACE 7 1 DOWN").is_err());
//! ```

use std::str::{FromStr, SplitWhitespace};

use thiserror::Error;

use crate::core::{Direction, GameError, ParseDirectionError, Position};
use crate::rules::Move;

/// A single command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// `PLACE x y DIR`
    Place(Move),
    /// `SELECT DIR`
    Select(Direction),
    /// `CLICK x y`
    Click(Position),
    /// `TICK [n]`
    Tick(usize),
    /// `SETTLE`
    Settle,
    /// `UNDO`
    Undo,
    /// `RESET`
    Reset,
    /// `STATE`
    State,
    /// `HISTORY`
    History,
    /// `COUNTS`
    Counts,
    /// `LEGAL [DIR]`; `None` means the selected direction.
    Legal(Option<Direction>),
}

/// Reasons a line fails to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("{command}: missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: unexpected argument `{argument}`")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error(transparent)]
    InvalidDirection(#[from] ParseDirectionError),

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Parse one line. Returns `Ok(None)` for blank or comment-only lines.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let line = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };

    let command = match keyword.to_ascii_uppercase().as_str() {
        "PLACE" => {
            let position = parse_position(&mut tokens, "PLACE")?;
            let direction = parse_direction(&mut tokens, "PLACE")?;
            Command::Place(Move::new(position, direction))
        }
        "SELECT" => Command::Select(parse_direction(&mut tokens, "SELECT")?),
        "CLICK" => Command::Click(parse_position(&mut tokens, "CLICK")?),
        "TICK" => match tokens.next() {
            Some(n) => Command::Tick(n.parse().map_err(|_| CommandError::InvalidNumber(n.to_string()))?),
            None => Command::Tick(1),
        },
        "SETTLE" => Command::Settle,
        "UNDO" => Command::Undo,
        "RESET" => Command::Reset,
        "STATE" => Command::State,
        "HISTORY" => Command::History,
        "COUNTS" => Command::Counts,
        "LEGAL" => Command::Legal(tokens.next().map(str::parse::<Direction>).transpose()?),
        _ => return Err(CommandError::UnknownCommand(keyword.to_string())),
    };

    if let Some(extra) = tokens.next() {
        return Err(CommandError::UnexpectedArgument {
            command: command.keyword(),
            argument: extra.to_string(),
        });
    }

    Ok(Some(command))
}

impl Command {
    /// Upper-case keyword for this command.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::Place(_) => "PLACE",
            Command::Select(_) => "SELECT",
            Command::Click(_) => "CLICK",
            Command::Tick(_) => "TICK",
            Command::Settle => "SETTLE",
            Command::Undo => "UNDO",
            Command::Reset => "RESET",
            Command::State => "STATE",
            Command::History => "HISTORY",
            Command::Counts => "COUNTS",
            Command::Legal(_) => "LEGAL",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parse a single non-blank command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)?.ok_or(CommandError::UnknownCommand(String::new()))
    }
}

fn parse_coordinate(token: Option<&str>, command: &'static str, argument: &'static str) -> Result<i64, CommandError> {
    let token = token.ok_or(CommandError::MissingArgument { command, argument })?;
    token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

fn parse_position(tokens: &mut SplitWhitespace<'_>, command: &'static str) -> Result<Position, CommandError> {
    let x = parse_coordinate(tokens.next(), command, "x")?;
    let y = parse_coordinate(tokens.next(), command, "y")?;
    Ok(Position::new(x, y)?)
}

fn parse_direction(tokens: &mut SplitWhitespace<'_>, command: &'static str) -> Result<Direction, CommandError> {
    let token = tokens.next().ok_or(CommandError::MissingArgument {
        command,
        argument: "direction",
    })?;
    Ok(token.parse::<Direction>()?)
}
