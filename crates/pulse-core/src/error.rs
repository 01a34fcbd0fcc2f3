#![forbid(unsafe_code)]

//! Error taxonomy.
//!
//! Every error here is a programmer error: all operations are in-memory and
//! synchronous, so nothing is retried and nothing is swallowed. A reentrant
//! broadcast is deliberately absent from this list; it is a diagnostic, not a
//! failure.
//!
//! # Failure Modes
//!
//! | Variant | Cause |
//! |---------|-------|
//! | `InvalidArgument` | A required list, listener or value was absent |
//! | `PreconditionViolation` | An element of a required list was absent |
//! | `MissingLogic` | A function was invoked with no logic assigned and no override |

use std::fmt;

/// Errors raised by the pulse core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PulseError {
    /// A required argument was absent.
    InvalidArgument {
        /// Name of the offending parameter.
        argument: &'static str,
    },
    /// A bulk operation found an absent element inside a required collection.
    PreconditionViolation {
        /// The bulk operation that was attempted (`"register"`, `"fire"`, ...).
        operation: &'static str,
        /// Position of the absent element.
        index: usize,
    },
    /// A function collaborator was invoked without logic.
    MissingLogic {
        /// Name of the function.
        function: String,
    },
}

impl PulseError {
    /// Shorthand for [`PulseError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(argument: &'static str) -> Self {
        Self::InvalidArgument { argument }
    }

    /// Shorthand for [`PulseError::PreconditionViolation`].
    #[must_use]
    pub fn absent_element(operation: &'static str, index: usize) -> Self {
        Self::PreconditionViolation { operation, index }
    }
}

impl fmt::Display for PulseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { argument } => {
                write!(f, "invalid argument: `{argument}` is required")
            }
            Self::PreconditionViolation { operation, index } => {
                write!(f, "{operation}: element at index {index} is absent")
            }
            Self::MissingLogic { function } => write!(
                f,
                "{function}: no logic is available; assign a function or install a literal override"
            ),
        }
    }
}

impl std::error::Error for PulseError {}

/// Convenience alias used throughout pulse.
pub type Result<T> = std::result::Result<T, PulseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_argument() {
        let err = PulseError::invalid_argument("listener");
        assert_eq!(err.to_string(), "invalid argument: `listener` is required");
    }

    #[test]
    fn display_reports_offending_index() {
        let err = PulseError::absent_element("fire", 3);
        assert_eq!(err.to_string(), "fire: element at index 3 is absent");
    }

    #[test]
    fn missing_logic_mentions_function() {
        let err = PulseError::MissingLogic {
            function: "damage".to_string(),
        };
        assert!(err.to_string().starts_with("damage:"));
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&PulseError::invalid_argument("targets"));
    }
}
