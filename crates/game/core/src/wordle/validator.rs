//! Word-form validators for the word-guess variants.
//!
//! Validation runs before letter verification. It checks the *shape* of a
//! guess (only digits, a balanced equation, ...), never the target word.

use strum::{Display, EnumIter, EnumString};

/// Predicate deciding whether a typed guess is acceptable for a variant.
pub trait WordValidator: Send + Sync {
    fn validate(&self, word: &str) -> bool;
}

impl<F> WordValidator for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn validate(&self, word: &str) -> bool {
        self(word)
    }
}

/// Word-guess game variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum WordleQuizType {
    #[default]
    Text,
    Number,
    MathFormula,
}

impl WordleQuizType {
    /// The built-in validator for this variant.
    pub fn validator(self) -> &'static dyn WordValidator {
        match self {
            Self::Text => &TextValidator,
            Self::Number => &NumberValidator,
            Self::MathFormula => &MathFormulaValidator,
        }
    }
}

/// Accepts words made of letters only.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextValidator;

impl WordValidator for TextValidator {
    fn validate(&self, word: &str) -> bool {
        !word.is_empty() && word.chars().all(|c| c.is_ascii_alphabetic())
    }
}

/// Accepts words made of digits only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumberValidator;

impl WordValidator for NumberValidator {
    fn validate(&self, word: &str) -> bool {
        !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
    }
}

/// Accepts `lhs=rhs` where both sides evaluate to the same integer.
///
/// Supports `+ - * /` with the usual precedence. Division must be exact and
/// arithmetic overflow rejects the formula.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathFormulaValidator;

impl WordValidator for MathFormulaValidator {
    fn validate(&self, word: &str) -> bool {
        let mut sides = word.split('=');
        let (Some(lhs), Some(rhs), None) = (sides.next(), sides.next(), sides.next()) else {
            return false;
        };

        match (evaluate(lhs), evaluate(rhs)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

fn evaluate(expression: &str) -> Option<i64> {
    let mut parser = Parser {
        bytes: expression.as_bytes(),
        pos: 0,
    };
    let value = parser.expression()?;
    (parser.pos == parser.bytes.len()).then_some(value)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn expression(&mut self) -> Option<i64> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == b'+' {
                value.checked_add(rhs)?
            } else {
                value.checked_sub(rhs)?
            };
        }
        Some(value)
    }

    fn term(&mut self) -> Option<i64> {
        let mut value = self.number()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.number()?;
            value = if op == b'*' {
                value.checked_mul(rhs)?
            } else {
                if rhs == 0 || value % rhs != 0 {
                    return None;
                }
                value / rhs
            };
        }
        Some(value)
    }

    fn number(&mut self) -> Option<i64> {
        let start = self.pos;
        let mut value: i64 = 0;
        while let Some(digit @ b'0'..=b'9') = self.peek() {
            value = value.checked_mul(10)?.checked_add(i64::from(digit - b'0'))?;
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }
}
