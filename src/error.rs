//! Error types for the scoreboard engine.
//!
//! Every condition here is recoverable by the caller and is signaled
//! synchronously from the call that detected it. A failed update aborts
//! before the first surface write, so surfaces never observe a partially
//! applied line set.

use thiserror::Error;

/// Errors that can occur while synchronizing a board with a surface.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    /// A line's raw content exceeds the pre-encoding ceiling.
    #[error("line '{line}' is {length} units long, maximum is {max}")]
    LineTooLong {
        /// The offending line.
        line: String,
        /// Its length in units.
        length: usize,
        /// The ceiling it broke.
        max: usize,
    },

    /// A team name exceeds the surface's team-name field width.
    #[error("team name '{name}' is {length} units long, maximum is {max}")]
    TeamNameTooLong {
        /// The offending name.
        name: String,
        /// Its length in units.
        length: usize,
        /// The field width it broke.
        max: usize,
    },

    /// A team with this name already exists on the board.
    #[error("a team named '{0}' is already present on this board")]
    DuplicateTeam(String),

    /// More entry tokens were requested than the code space can produce.
    #[error("requested {requested} entry tokens, the code space holds {max}")]
    InsufficientCodeSpace {
        /// The requested token count.
        requested: usize,
        /// The hard ceiling of the code space.
        max: usize,
    },

    /// The markup translator rejected a line.
    #[error("line '{line}' could not be translated: {reason}")]
    NotTranslatable {
        /// The offending line.
        line: String,
        /// Translator-provided detail.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_bounds() {
        let err = BoardError::LineTooLong {
            line: "abc".to_string(),
            length: 129,
            max: 128,
        };
        assert_eq!(
            err.to_string(),
            "line 'abc' is 129 units long, maximum is 128"
        );

        let err = BoardError::InsufficientCodeSpace {
            requested: 241,
            max: 240,
        };
        assert!(err.to_string().contains("241"));
        assert!(err.to_string().contains("240"));
    }
}
