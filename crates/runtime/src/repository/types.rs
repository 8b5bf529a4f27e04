//! Records handed to the persistence sink when a session ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quiz_core::{MazeItemId, WordleQuizType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordleResult {
    pub word: String,
    pub quiz_type: WordleQuizType,
    pub word_length: usize,
    pub rows_used: usize,
    pub max_rows: usize,
    pub solved: bool,
    /// Zero when the session was unscored.
    pub earned_xp: u64,
    pub day: Option<String>,
    pub maze_item_id: Option<MazeItemId>,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiChoiceResult {
    pub correct_answers: usize,
    pub question_count: usize,
    pub average_answer_time_ms: u64,
    pub earned_xp: u64,
    pub category: Option<u32>,
    pub maze_item_id: Option<MazeItemId>,
    pub played_at: DateTime<Utc>,
}

/// One line of the result log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameResult {
    Wordle(WordleResult),
    MultiChoice(MultiChoiceResult),
}

impl GameResult {
    pub fn earned_xp(&self) -> u64 {
        match self {
            Self::Wordle(result) => result.earned_xp,
            Self::MultiChoice(result) => result.earned_xp,
        }
    }

    pub fn maze_item_id(&self) -> Option<MazeItemId> {
        match self {
            Self::Wordle(result) => result.maze_item_id,
            Self::MultiChoice(result) => result.maze_item_id,
        }
    }

    /// Copy of this result carrying `earned_xp`.
    pub fn with_earned_xp(mut self, earned_xp: u64) -> Self {
        match &mut self {
            Self::Wordle(result) => result.earned_xp = earned_xp,
            Self::MultiChoice(result) => result.earned_xp = earned_xp,
        }
        self
    }
}
