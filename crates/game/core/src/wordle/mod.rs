//! Word-guessing rules.
//!
//! A session guesses a [`TargetWord`] row by row. Rows are filled with
//! [`WordleItem::Pending`] cells through key input, then verified by
//! [`verify_row`] which turns every cell into `Correct`, `Present` or
//! `Absent`. All state changes go through [`WordleEngine`].

mod engine;
mod error;
mod item;
mod letter;
mod row;
mod session;
mod validator;
mod verify;
mod word;

pub use engine::{WordleEngine, WordleInput, WordleOutcome};
pub use error::WordleError;
pub use item::WordleItem;
pub use letter::WordleChar;
pub use row::WordleRow;
pub use session::{SessionStatus, WordleSession};
pub use validator::{
    MathFormulaValidator, NumberValidator, TextValidator, WordValidator, WordleQuizType,
};
pub use verify::{disabled_keys, letter_hints, missing_hints, verify_row};
pub use word::TargetWord;
