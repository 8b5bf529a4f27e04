use core::fmt;

use super::WordleError;

/// A single validated guess symbol.
///
/// Letters are normalized to upper case. Digits and the arithmetic operators
/// `+ - * / =` are accepted for the number and math-formula variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "char", into = "char"))]
pub struct WordleChar(char);

impl WordleChar {
    pub const OPERATORS: [char; 5] = ['+', '-', '*', '/', '='];

    pub fn new(value: char) -> Result<Self, WordleError> {
        if value.is_ascii_alphanumeric() || Self::OPERATORS.contains(&value) {
            Ok(Self(value.to_ascii_uppercase()))
        } else {
            Err(WordleError::InvalidChar(value))
        }
    }

    pub const fn value(self) -> char {
        self.0
    }

    pub const fn is_letter(self) -> bool {
        self.0.is_ascii_alphabetic()
    }

    pub const fn is_digit(self) -> bool {
        self.0.is_ascii_digit()
    }

    pub fn is_operator(self) -> bool {
        Self::OPERATORS.contains(&self.0)
    }
}

impl TryFrom<char> for WordleChar {
    type Error = WordleError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WordleChar> for char {
    fn from(value: WordleChar) -> Self {
        value.0
    }
}

impl fmt::Display for WordleChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
