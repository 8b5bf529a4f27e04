use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MultiChoiceError {
    #[error("a multi-choice session needs at least one question")]
    NoQuestions,

    #[error("question {id} has no answer at its correct index")]
    InvalidQuestion { id: u32 },

    #[error("no question is currently being answered")]
    NoCurrentQuestion,

    #[error("answer {index} out of range ({answers} answers)")]
    AnswerOutOfRange { index: usize, answers: usize },
}

impl GameError for MultiChoiceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AnswerOutOfRange { .. } => ErrorSeverity::Recoverable,
            Self::NoQuestions | Self::InvalidQuestion { .. } | Self::NoCurrentQuestion => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoQuestions => "MULTI_CHOICE_NO_QUESTIONS",
            Self::InvalidQuestion { .. } => "MULTI_CHOICE_INVALID_QUESTION",
            Self::NoCurrentQuestion => "MULTI_CHOICE_NO_CURRENT_QUESTION",
            Self::AnswerOutOfRange { .. } => "MULTI_CHOICE_ANSWER_OUT_OF_RANGE",
        }
    }
}
