//! This module defines the core data structures and types used throughout the simulator,
//! including symbols, transitions, step outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::Rule;

/// A tape symbol. Conventionally a single character, but any non-empty string is allowed.
pub type Symbol = String;

/// The blank symbol used to fill tape cells that were never written.
pub const BLANK_SYMBOL: &str = "#";
/// The alphabet assumed when a description does not declare one.
pub const DEFAULT_ALPHABET: [&str; 3] = ["0", "1", BLANK_SYMBOL];
/// Head position of a fresh run. The origin cell holds a leading blank marker.
pub const INITIAL_HEAD_POSITION: i64 = 1;
/// The maximum allowed size for a machine description in bytes.
pub const MAX_PROGRAM_SIZE: usize = 65536; // 64KB
/// The default ceiling on executed transitions for a single run.
pub const MAX_EXECUTION_STEPS: usize = 10000;

/// Composite lookup key of the transition table: the controller state and the symbol
/// under the head.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransitionKey {
    pub state: String,
    pub symbol: Symbol,
}

impl TransitionKey {
    pub fn new(state: impl Into<String>, symbol: impl Into<Symbol>) -> Self {
        Self {
            state: state.into(),
            symbol: symbol.into(),
        }
    }
}

/// The right-hand side of a transition rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The symbol written over the one under the head.
    pub write: Symbol,
    /// Where the head moves after writing.
    pub direction: Direction,
    /// The state the machine transitions to.
    pub next_state: String,
}

impl Transition {
    pub fn new(
        write: impl Into<Symbol>,
        direction: Direction,
        next_state: impl Into<String>,
    ) -> Self {
        Self {
            write: write.into(),
            direction,
            next_state: next_state.into(),
        }
    }
}

/// Represents the possible directions the head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
    /// Keep the head in the same position.
    Stay,
}

impl Direction {
    /// Maps a movement token of the description format: `<` is left, `>` is right and
    /// any other token means stay.
    pub fn from_token(token: &str) -> Self {
        match token {
            "<" => Direction::Left,
            ">" => Direction::Right,
            _ => Direction::Stay,
        }
    }

    /// The signed head displacement of this movement.
    pub fn offset(self) -> i64 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Stay => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let token = match self {
            Direction::Left => "<",
            Direction::Right => ">",
            Direction::Stay => "-",
        };
        f.write_str(token)
    }
}

/// Represents the outcome of a single execution step.
///
/// Halting is not stored by the engine; a halted machine simply keeps reporting the same
/// terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A transition was applied and execution can continue.
    Continued,
    /// No transition matched and the current state is accepting.
    Accepted,
    /// No transition matched and the current state is not accepting.
    Rejected,
}

impl Outcome {
    /// Returns `true` for `Accepted` and `Rejected`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Continued)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Outcome::Continued => "continued",
            Outcome::Accepted => "accepted",
            Outcome::Rejected => "rejected",
        };
        f.write_str(text)
    }
}

/// How a multi-step run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// The machine halted in an accepting state.
    Accepted,
    /// The machine halted in a non-accepting state.
    Rejected,
    /// The step ceiling was reached before the machine halted.
    StepLimit,
    /// The caller cancelled the run.
    Interrupted,
}

impl Outcome {
    /// The run status of a terminal outcome; `None` for `Continued`.
    pub fn status(self) -> Option<RunStatus> {
        match self {
            Outcome::Continued => None,
            Outcome::Accepted => Some(RunStatus::Accepted),
            Outcome::Rejected => Some(RunStatus::Rejected),
        }
    }
}

/// Represents the errors that can occur while loading machine descriptions.
///
/// Execution itself never fails: an undefined transition is a halt, not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// Indicates a syntax or structural error in a machine description.
    #[error("Description parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a description that parsed but is missing a required block, or a failed lookup.
    #[error("Description validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_serialization() {
        let left_json = serde_json::to_string(&Direction::Left).unwrap();
        let right_json = serde_json::to_string(&Direction::Right).unwrap();

        assert_eq!(left_json, "\"Left\"");
        assert_eq!(right_json, "\"Right\"");

        let left: Direction = serde_json::from_str(&left_json).unwrap();
        assert_eq!(left, Direction::Left);
    }

    #[test]
    fn test_direction_from_token() {
        assert_eq!(Direction::from_token("<"), Direction::Left);
        assert_eq!(Direction::from_token(">"), Direction::Right);
        assert_eq!(Direction::from_token("-"), Direction::Stay);
        // Anything unrecognised means stay
        assert_eq!(Direction::from_token("L"), Direction::Stay);
        assert_eq!(Direction::from_token("stay"), Direction::Stay);
    }

    #[test]
    fn test_direction_offset() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Right.offset(), 1);
        assert_eq!(Direction::Stay.offset(), 0);
    }

    #[test]
    fn test_transition_key_structural_equality() {
        let a = TransitionKey::new("q0", "1");
        let b = TransitionKey::new(String::from("q0"), String::from("1"));
        assert_eq!(a, b);
        assert_ne!(a, TransitionKey::new("q0", "0"));
    }

    #[test]
    fn test_outcome_terminal() {
        assert!(!Outcome::Continued.is_terminal());
        assert!(Outcome::Accepted.is_terminal());
        assert!(Outcome::Rejected.is_terminal());
    }

    #[test]
    fn test_outcome_status() {
        assert_eq!(Outcome::Accepted.status(), Some(RunStatus::Accepted));
        assert_eq!(Outcome::Rejected.status(), Some(RunStatus::Rejected));
        assert_eq!(Outcome::Continued.status(), None);
    }

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::ValidationError("Missing 'starting state' block".into());

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("validation error"));
        assert!(error_msg.contains("starting state"));
    }
}
