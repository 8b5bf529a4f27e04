//! Multiple-choice trivia steps.
//!
//! Questions are answered one at a time. Each step moves
//! `NotCurrent -> Current -> Completed` exactly once.
mod error;
mod question;
mod session;

pub use error::MultiChoiceError;
pub use question::{MultiChoiceQuestion, MultiChoiceStep, QuestionDifficulty, SelectedAnswer};
pub use session::{MultiChoiceOutcome, MultiChoiceSession};
