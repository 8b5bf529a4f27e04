use core::fmt;

use super::{WordleChar, WordleError};
use crate::config::GameConfig;

/// The word a session is trying to guess.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetWord {
    chars: Vec<WordleChar>,
}

impl TargetWord {
    /// Validates and normalizes a word.
    ///
    /// Fails on unsupported characters or when the length is outside
    /// `GameConfig::MIN_WORD_LENGTH..=GameConfig::MAX_WORD_LENGTH`.
    pub fn parse(word: &str) -> Result<Self, WordleError> {
        let chars = word
            .trim()
            .chars()
            .map(WordleChar::new)
            .collect::<Result<Vec<_>, _>>()?;

        let len = chars.len();
        if !(GameConfig::MIN_WORD_LENGTH..=GameConfig::MAX_WORD_LENGTH).contains(&len) {
            return Err(WordleError::InvalidWordLength {
                len,
                min: GameConfig::MIN_WORD_LENGTH,
                max: GameConfig::MAX_WORD_LENGTH,
            });
        }

        Ok(Self { chars })
    }

    pub fn chars(&self) -> &[WordleChar] {
        &self.chars
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Number of occurrences of `letter` in the word.
    pub fn count(&self, letter: WordleChar) -> usize {
        self.chars.iter().filter(|&&c| c == letter).count()
    }
}

impl fmt::Display for TargetWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl core::str::FromStr for TargetWord {
    type Err = WordleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
