//! Collaborators the runtime consumes: quiz content and user settings.
//!
//! Runtime users plug in [`ContentSource`] implementations so sessions can be
//! fed from a remote API, a bundled word list, or test fixtures.
use std::collections::HashMap;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use quiz_core::{GameConfig, MultiChoiceQuestion, QuestionDifficulty, WordleQuizType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("no words available for {0}")]
    NoWords(WordleQuizType),

    #[error("no questions match the request")]
    NoQuestions,

    #[error("content source unavailable: {0}")]
    Unavailable(String),
}

/// Source of target words and trivia questions.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Target word for a word-guess session.
    ///
    /// `day` is the daily-challenge key; sources return the same word for the
    /// same key.
    async fn fetch_target_word(
        &self,
        quiz_type: WordleQuizType,
        day: Option<&str>,
    ) -> Result<String, ContentError>;

    async fn fetch_random_questions(
        &self,
        amount: usize,
        category: Option<u32>,
        difficulty: Option<QuestionDifficulty>,
    ) -> Result<Vec<MultiChoiceQuestion>, ContentError>;
}

/// Preferences captured once when a session starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub hard_mode: bool,
    /// Presentation only; carried on snapshots.
    pub color_blind: bool,
    /// Presentation only; enables letter-count hints on snapshots.
    pub letter_hints: bool,
    pub row_limit: Option<usize>,
    pub translation_enabled: bool,
    pub question_count: usize,
    /// Per-row countdown for word-guess sessions, disabled when `None`.
    pub word_countdown_ms: Option<u64>,
    pub question_countdown_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            hard_mode: false,
            color_blind: false,
            letter_hints: false,
            row_limit: None,
            translation_enabled: false,
            question_count: GameConfig::DEFAULT_QUESTION_COUNT,
            word_countdown_ms: None,
            question_countdown_ms: GameConfig::DEFAULT_QUESTION_COUNTDOWN_MS,
        }
    }
}

/// Source of [`SessionSettings`].
pub trait SettingsSource: Send + Sync {
    fn settings(&self) -> SessionSettings;
}

impl SettingsSource for SessionSettings {
    fn settings(&self) -> SessionSettings {
        self.clone()
    }
}

/// In-memory word lists and questions.
///
/// Random picks use `rand`. Daily keys hash to a stable index so every
/// session for the same day gets the same word.
#[derive(Debug, Clone, Default)]
pub struct StaticContentSource {
    words: HashMap<WordleQuizType, Vec<String>>,
    questions: Vec<MultiChoiceQuestion>,
}

impl StaticContentSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_words<I, S>(mut self, quiz_type: WordleQuizType, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words
            .entry(quiz_type)
            .or_default()
            .extend(words.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_questions(mut self, questions: Vec<MultiChoiceQuestion>) -> Self {
        self.questions.extend(questions);
        self
    }
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn fetch_target_word(
        &self,
        quiz_type: WordleQuizType,
        day: Option<&str>,
    ) -> Result<String, ContentError> {
        let words = self
            .words
            .get(&quiz_type)
            .filter(|words| !words.is_empty())
            .ok_or(ContentError::NoWords(quiz_type))?;

        let word = match day {
            Some(day) => {
                let seed = day
                    .bytes()
                    .fold(0usize, |acc, byte| acc.wrapping_mul(31).wrapping_add(usize::from(byte)));
                words.get(seed % words.len())
            }
            None => words.choose(&mut rand::thread_rng()),
        };
        word.cloned().ok_or(ContentError::NoWords(quiz_type))
    }

    async fn fetch_random_questions(
        &self,
        amount: usize,
        category: Option<u32>,
        difficulty: Option<QuestionDifficulty>,
    ) -> Result<Vec<MultiChoiceQuestion>, ContentError> {
        let matching: Vec<&MultiChoiceQuestion> = self
            .questions
            .iter()
            .filter(|q| category.is_none_or(|category| q.category == Some(category)))
            .filter(|q| difficulty.is_none_or(|difficulty| q.difficulty == difficulty))
            .collect();

        if matching.is_empty() {
            return Err(ContentError::NoQuestions);
        }

        let picked = matching
            .choose_multiple(&mut rand::thread_rng(), amount)
            .map(|q| (*q).clone())
            .collect();
        Ok(picked)
    }
}
