//! This module defines the value types shared by the tape, the command table and the
//! execution engine: symbols, head directions, state handles and the error type.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Suffix appended to a base symbol to form its primed variant.
pub const PRIME_MARKER: char = '\'';
/// How the blank symbol is shown when a tape or command is formatted.
pub const BLANK_DISPLAY: &str = "_";

/// A symbol that can be stored in a tape cell.
///
/// Letters are plain string tokens. The blank is a distinct variant rather than a
/// reserved string, so no letter can ever compare equal to it.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Symbol {
    /// The content of every cell the machine has not written yet.
    #[default]
    Blank,
    /// A member of the machine's alphabet.
    Letter(String),
}

impl Symbol {
    /// Creates a letter symbol from any string-like token.
    pub fn letter(token: impl Into<String>) -> Self {
        Symbol::Letter(token.into())
    }

    /// Returns the primed variant of this symbol.
    ///
    /// The blank has no primed variant and is returned unchanged.
    pub fn primed(&self) -> Self {
        match self {
            Symbol::Blank => Symbol::Blank,
            Symbol::Letter(token) => Symbol::Letter(format!("{token}{PRIME_MARKER}")),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Symbol::Blank)
    }

    pub fn is_primed(&self) -> bool {
        match self {
            Symbol::Blank => false,
            Symbol::Letter(token) => token.ends_with(PRIME_MARKER),
        }
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Symbol::Letter(token.to_string())
    }
}

impl From<String> for Symbol {
    fn from(token: String) -> Self {
        Symbol::Letter(token)
    }
}

impl From<char> for Symbol {
    fn from(token: char) -> Self {
        Symbol::Letter(token.to_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Blank => f.pad(BLANK_DISPLAY),
            Symbol::Letter(token) => f.pad(token),
        }
    }
}

/// Represents the possible directions the head can move after a command is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one cell to the right.
    Right,
    /// Move the head one cell to the left.
    Left,
    /// Keep the head on the same cell.
    Stay,
}

impl Direction {
    /// Returns the single-letter notation used in command listings.
    pub fn letter(self) -> char {
        match self {
            Direction::Right => 'R',
            Direction::Left => 'L',
            Direction::Stay => 'N',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// An opaque machine state.
///
/// States carry no label: two states are equal only when they were handed out by the
/// same call to [`Machine::new_state`](crate::Machine::new_state). The number is the
/// creation order within the owning machine and is only used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State(u32);

impl State {
    pub(crate) fn from_index(index: u32) -> Self {
        State(index)
    }

    /// Returns the creation index of this state.
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("q{}", self.0))
    }
}

/// Represents the errors that can occur while building or running a machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    /// A base symbol passed to the machine constructor is not a valid token.
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),
    /// A command reads or writes a symbol outside the machine's alphabet.
    #[error("Invalid command {command}: symbol {symbol} is not in the alphabet")]
    InvalidCommand { command: String, symbol: Symbol },
    /// No command is registered for the current state and the symbol under the head.
    #[error("No command defined for state {state} and symbol {symbol}")]
    MissingTransition { state: State, symbol: Symbol },
    /// The configured step ceiling was reached before the halting state.
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(usize),
}
