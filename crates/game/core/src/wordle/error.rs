//! Word-guess validation errors.

use crate::error::{ErrorSeverity, GameError};

use super::WordleChar;

/// Errors raised while building or advancing a word-guess session.
///
/// None of them corrupts the session: the rejected transition is simply not
/// applied and the error is stored as the session status.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordleError {
    #[error("unsupported character {0:?}")]
    InvalidChar(char),

    #[error("word length {len} is outside {min}..={max}")]
    InvalidWordLength { len: usize, min: usize, max: usize },

    #[error("row limit must be between 1 and {max}, got {limit}")]
    InvalidRowLimit { limit: usize, max: usize },

    /// The row still has empty cells (or does not match the word length).
    #[error("row is incomplete: {filled} of {expected} letters entered")]
    MalformedRow { filled: usize, expected: usize },

    /// The variant-specific validator rejected the typed word.
    #[error("{word:?} is not a valid guess for this quiz")]
    InvalidWordForm { word: String },

    /// Hard mode: the row does not reuse every hint revealed by the previous row.
    #[error("you need to use all hints from the last row (missing {})", join_letters(.missing))]
    MissingRequiredHints { missing: Vec<WordleChar> },

    #[error("extra rows can only be granted after a lost game")]
    RewardNotApplicable,
}

fn join_letters(letters: &[WordleChar]) -> String {
    letters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl GameError for WordleError {
    fn severity(&self) -> ErrorSeverity {
        use WordleError::*;
        match self {
            MalformedRow { .. } | InvalidWordForm { .. } | MissingRequiredHints { .. } => {
                ErrorSeverity::Recoverable
            }
            InvalidChar(_) | InvalidWordLength { .. } | InvalidRowLimit { .. } => {
                ErrorSeverity::Validation
            }
            RewardNotApplicable => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use WordleError::*;
        match self {
            InvalidChar(_) => "WORDLE_INVALID_CHAR",
            InvalidWordLength { .. } => "WORDLE_INVALID_WORD_LENGTH",
            InvalidRowLimit { .. } => "WORDLE_INVALID_ROW_LIMIT",
            MalformedRow { .. } => "WORDLE_MALFORMED_ROW",
            InvalidWordForm { .. } => "WORDLE_INVALID_WORD_FORM",
            MissingRequiredHints { .. } => "WORDLE_MISSING_REQUIRED_HINTS",
            RewardNotApplicable => "WORDLE_REWARD_NOT_APPLICABLE",
        }
    }
}
