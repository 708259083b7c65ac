//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including transitions, head movements, execution outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// The symbol counted on the final tape to obtain the machine's numeric result.
pub const RESULT_SYMBOL: char = '1';
/// The glyph used to render blank cells when printing a tape.
pub const BLANK_GLYPH: char = '□';
/// The maximum number of steps to execute before halting.
pub const DEFAULT_MAX_STEPS: usize = 100_000;
/// Number of blank cells placed in front of the input when a tape is created.
pub const LEFT_MARGIN: usize = 5;
/// Number of blank cells placed after the input when a tape is created.
pub const RIGHT_MARGIN: usize = 50;
/// Number of blank cells added whenever the head gets close to a tape boundary.
pub const GROWTH_BLOCK: usize = 20;
/// Distance from a tape boundary at which the tape is grown.
pub const GROWTH_THRESHOLD: usize = 2;

/// Represents a single transition rule for a Turing Machine.
///
/// In a configuration document a transition is either an object with the field names
/// below or a compact `[next_state, write, move]` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The next state the machine transitions to.
    pub next_state: String,
    /// The symbol written at the head position.
    pub write: char,
    /// The direction the head moves after writing.
    pub direction: Direction,
}

/// Represents the possible directions a Turing Machine head can move.
///
/// Configuration documents may spell a direction as `"L"`/`"R"`, `"Left"`/`"Right"`
/// or as a signed offset `-1`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDirection")]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// Returns the head offset for this direction.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDirection {
    Offset(i64),
    Name(String),
}

impl TryFrom<RawDirection> for Direction {
    type Error = String;

    fn try_from(raw: RawDirection) -> Result<Self, Self::Error> {
        match raw {
            RawDirection::Offset(-1) => Ok(Direction::Left),
            RawDirection::Offset(1) => Ok(Direction::Right),
            RawDirection::Offset(n) => Err(format!("invalid head move {n}, expected -1 or 1")),
            RawDirection::Name(name) => match name.to_ascii_lowercase().as_str() {
                "l" | "left" => Ok(Direction::Left),
                "r" | "right" => Ok(Direction::Right),
                _ => Err(format!(
                    "invalid head move {name:?}, expected \"L\", \"R\", -1 or 1"
                )),
            },
        }
    }
}

/// Represents the outcome of a Turing Machine execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine successfully performed a step and continues execution.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

/// The reason a run came to an end.
///
/// None of these are errors: a run always ends with a well-defined tape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Halt {
    /// The machine entered one of the configured accepting states.
    Accepted,
    /// There is no rule for the symbol under the head in the current state.
    NoTransition { state: String, symbol: char },
    /// The step ceiling was reached before the machine halted on its own.
    StepLimitExceeded { limit: usize },
}

impl Halt {
    /// Whether this halt is a successful one.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Halt::Accepted)
    }
}

impl std::fmt::Display for Halt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Halt::Accepted => write!(f, "accepted"),
            Halt::NoTransition { state, symbol } => {
                write!(f, "no transition for symbol '{symbol}' in state '{state}'")
            }
            Halt::StepLimitExceeded { limit } => {
                write!(f, "step limit of {limit} reached, possible infinite loop")
            }
        }
    }
}

/// The outcome of a complete run, produced once the machine stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    /// Whether the final state is an accepting state.
    pub accepted: bool,
    /// Why the run stopped.
    pub halt: Halt,
    /// The state the machine was in when it stopped.
    pub final_state: String,
    /// Number of transitions applied.
    pub steps: usize,
    /// Wall-clock time of the run loop.
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// The whole materialized tape, blank cells rendered with [`BLANK_GLYPH`].
    pub tape: String,
    /// Number of [`RESULT_SYMBOL`] cells left on the tape.
    pub result: u64,
}

impl RunResult {
    /// Whether the run was cut off by the step ceiling.
    pub fn is_step_limit_exceeded(&self) -> bool {
        matches!(self.halt, Halt::StepLimitExceeded { .. })
    }
}

fn serialize_secs<S>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Represents the errors that abort loading a configuration or starting a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// The configuration source could not be read, is not valid JSON, or lacks a required field.
    #[error("Configuration load error: {0}")]
    ConfigLoad(String),
    /// The input contains a symbol outside the configured input alphabet.
    #[error("Invalid input symbol: '{0}'")]
    InvalidInputSymbol(char),
    /// The configuration parsed but is internally inconsistent, or an input is unusable.
    #[error("Validation error: {0}")]
    Validation(String),
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
        let right: Direction = serde_json::from_str(&right_json).unwrap();

        assert_eq!(left, Direction::Left);
        assert_eq!(right, Direction::Right);
    }

    #[test]
    fn test_direction_short_forms() {
        let parse = |s: &str| serde_json::from_str::<Direction>(s);

        assert_eq!(parse("\"L\"").unwrap(), Direction::Left);
        assert_eq!(parse("\"r\"").unwrap(), Direction::Right);
        assert_eq!(parse("-1").unwrap(), Direction::Left);
        assert_eq!(parse("1").unwrap(), Direction::Right);

        assert!(parse("0").is_err());
        assert!(parse("\"S\"").is_err());
    }

    #[test]
    fn test_direction_offset() {
        assert_eq!(Direction::Left.offset(), -1);
        assert_eq!(Direction::Right.offset(), 1);
    }

    #[test]
    fn test_transition_from_array() {
        let transition: Transition = serde_json::from_str(r#"["q1", "x", "R"]"#).unwrap();

        assert_eq!(transition.next_state, "q1");
        assert_eq!(transition.write, 'x');
        assert_eq!(transition.direction, Direction::Right);
    }

    #[test]
    fn test_transition_from_object() {
        let transition: Transition = serde_json::from_str(
            r##"{"next_state": "q2", "write": "#", "direction": -1}"##,
        )
        .unwrap();

        assert_eq!(transition.next_state, "q2");
        assert_eq!(transition.write, '#');
        assert_eq!(transition.direction, Direction::Left);
    }

    #[test]
    fn test_error_display() {
        let error = TuringMachineError::InvalidInputSymbol('0');

        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Invalid input symbol"));
        assert!(error_msg.contains('0'));
    }

    #[test]
    fn test_halt_display() {
        let halt = Halt::NoTransition {
            state: "q3".to_string(),
            symbol: 'z',
        };

        assert_eq!(halt.to_string(), "no transition for symbol 'z' in state 'q3'");
        assert!(!halt.is_accepted());
        assert!(Halt::Accepted.is_accepted());
    }
}
