use std::collections::BTreeSet;

use super::{TargetWord, WordleChar, WordleError, WordleQuizType, WordleRow};
use crate::config::GameConfig;
use crate::maze::MazeItemId;

/// Lifecycle of a word-guess session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl SessionStatus {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Complete state of one word-guess session.
///
/// `rows[current_row]` is the row accepting input while the session is in
/// progress. Rows before it are verified and never change again. Once the
/// session is finished `current_row == rows.len()` and no row is current.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordleSession {
    pub word: TargetWord,
    pub quiz_type: WordleQuizType,
    pub rows: Vec<WordleRow>,
    pub row_limit: usize,
    pub current_row: usize,
    /// Letters confirmed absent. Advisory only: input is never blocked.
    pub keys_disabled: BTreeSet<WordleChar>,
    /// Daily-challenge key, if this session is a daily puzzle.
    pub day: Option<String>,
    pub maze_item_id: Option<MazeItemId>,
    pub hard_mode: bool,
    pub status: SessionStatus,
    /// Last rejected transition, cleared by the next accepted one.
    pub error: Option<WordleError>,
}

impl WordleSession {
    pub fn new(
        word: TargetWord,
        quiz_type: WordleQuizType,
        row_limit: usize,
    ) -> Result<Self, WordleError> {
        if !(1..=GameConfig::MAX_ROW_LIMIT).contains(&row_limit) {
            return Err(WordleError::InvalidRowLimit {
                limit: row_limit,
                max: GameConfig::MAX_ROW_LIMIT,
            });
        }

        Ok(Self {
            rows: vec![WordleRow::empty(word.len())],
            word,
            quiz_type,
            row_limit,
            current_row: 0,
            keys_disabled: BTreeSet::new(),
            day: None,
            maze_item_id: None,
            hard_mode: false,
            status: SessionStatus::InProgress,
            error: None,
        })
    }

    #[must_use]
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.day = Some(day.into());
        self
    }

    #[must_use]
    pub fn with_maze_item(mut self, id: MazeItemId) -> Self {
        self.maze_item_id = Some(id);
        self
    }

    #[must_use]
    pub fn with_hard_mode(mut self, hard_mode: bool) -> Self {
        self.hard_mode = hard_mode;
        self
    }

    /// The row accepting input, if the session is still in progress.
    pub fn current(&self) -> Option<&WordleRow> {
        if self.status.is_finished() {
            return None;
        }
        self.rows.get(self.current_row)
    }

    /// The most recent verified row.
    pub fn last_verified(&self) -> Option<&WordleRow> {
        self.current_row
            .checked_sub(1)
            .and_then(|index| self.rows.get(index))
    }

    /// Number of rows submitted and verified so far.
    pub fn rows_used(&self) -> usize {
        self.current_row
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn is_won(&self) -> bool {
        self.status == SessionStatus::Won
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_has_one_empty_current_row() {
        let word = TargetWord::parse("CRANE").unwrap();
        let session = WordleSession::new(word, WordleQuizType::Text, 6).unwrap();

        assert_eq!(session.rows.len(), 1);
        assert_eq!(session.current().unwrap(), &WordleRow::empty(5));
        assert!(session.last_verified().is_none());
        assert_eq!(session.rows_used(), 0);
    }

    #[test]
    fn row_limit_must_be_positive_and_bounded() {
        let word = TargetWord::parse("CRANE").unwrap();
        assert!(matches!(
            WordleSession::new(word.clone(), WordleQuizType::Text, 0),
            Err(WordleError::InvalidRowLimit { limit: 0, .. })
        ));
        assert!(WordleSession::new(word, WordleQuizType::Text, GameConfig::MAX_ROW_LIMIT + 1).is_err());
    }
}
