//! Reducer for [`WordleSession`].
//!
//! Every input is applied to a working copy of the session which replaces
//! the caller's state only when the transition succeeds. A rejected input
//! leaves rows, row index and disabled keys untouched and only records the
//! error on the session.

use crate::config::GameConfig;

use super::{
    SessionStatus, WordValidator, WordleChar, WordleError, WordleRow, WordleSession, disabled_keys,
    missing_hints, verify_row,
};

/// Inputs accepted by [`WordleEngine::execute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordleInput {
    /// Type a key into the first empty cell of the current row.
    Key(char),
    /// Clear the cell at the given index of the current row.
    RemoveKey(usize),
    /// Submit a row.
    ///
    /// `row: None` submits whatever row is current (manual submit). A timer
    /// passes the row it was armed for; if that row is no longer current the
    /// input is ignored.
    Verify { row: Option<usize> },
    /// Extend a lost session by the given number of rows.
    GrantRows(usize),
}

/// Result of an accepted input.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordleOutcome {
    /// Nothing to do (finished session, full row, stale timer, ...).
    Ignored,
    KeyEntered { index: usize },
    KeyRemoved { index: usize },
    RowVerified {
        row: usize,
        verdict: WordleRow,
        status: SessionStatus,
    },
    RowsGranted { row_limit: usize },
}

impl WordleOutcome {
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }

    /// True when this outcome ended the session.
    pub const fn finished_session(&self) -> bool {
        matches!(
            self,
            Self::RowVerified {
                status: SessionStatus::Won | SessionStatus::Lost,
                ..
            }
        )
    }
}

/// Applies inputs to a word-guess session.
pub struct WordleEngine<'a> {
    session: &'a mut WordleSession,
    validator: &'a dyn WordValidator,
}

impl<'a> WordleEngine<'a> {
    /// Creates an engine using the session's built-in variant validator.
    pub fn new(session: &'a mut WordleSession) -> Self {
        let validator = session.quiz_type.validator();
        Self { session, validator }
    }

    /// Creates an engine with a caller-supplied word-form validator.
    pub fn with_validator(session: &'a mut WordleSession, validator: &'a dyn WordValidator) -> Self {
        Self { session, validator }
    }

    pub fn execute(&mut self, input: WordleInput) -> Result<WordleOutcome, WordleError> {
        let mut working = self.session.clone();

        match Self::transition(&mut working, self.validator, input) {
            Ok(WordleOutcome::Ignored) => Ok(WordleOutcome::Ignored),
            Ok(outcome) => {
                working.error = None;
                *self.session = working;
                Ok(outcome)
            }
            Err(error) => {
                self.session.error = Some(error.clone());
                Err(error)
            }
        }
    }

    fn transition(
        session: &mut WordleSession,
        validator: &dyn WordValidator,
        input: WordleInput,
    ) -> Result<WordleOutcome, WordleError> {
        match input {
            WordleInput::Key(key) => Self::enter_key(session, key),
            WordleInput::RemoveKey(index) => Ok(Self::remove_key(session, index)),
            WordleInput::Verify { row } => {
                if session.is_finished() || row.is_some_and(|row| row != session.current_row) {
                    return Ok(WordleOutcome::Ignored);
                }
                Self::verify(session, validator)
            }
            WordleInput::GrantRows(extra) => Self::grant_rows(session, extra),
        }
    }

    fn enter_key(session: &mut WordleSession, key: char) -> Result<WordleOutcome, WordleError> {
        let letter = WordleChar::new(key)?;
        let index = session.current_row;

        let Some((row, cell)) = session.current().and_then(|row| row.with_letter(letter)) else {
            return Ok(WordleOutcome::Ignored);
        };

        session.rows[index] = row;
        Ok(WordleOutcome::KeyEntered { index: cell })
    }

    fn remove_key(session: &mut WordleSession, cell: usize) -> WordleOutcome {
        let index = session.current_row;

        match session.current().and_then(|row| row.without_letter(cell)) {
            Some(row) => {
                session.rows[index] = row;
                WordleOutcome::KeyRemoved { index: cell }
            }
            None => WordleOutcome::Ignored,
        }
    }

    fn verify(
        session: &mut WordleSession,
        validator: &dyn WordValidator,
    ) -> Result<WordleOutcome, WordleError> {
        let index = session.current_row;
        let Some(row) = session.rows.get(index) else {
            return Ok(WordleOutcome::Ignored);
        };

        if !row.is_completed() || row.len() != session.word.len() {
            return Err(WordleError::MalformedRow {
                filled: row.filled(),
                expected: session.word.len(),
            });
        }

        let word = row.word();
        if !validator.validate(&word) {
            return Err(WordleError::InvalidWordForm { word });
        }

        if session.hard_mode
            && let Some(previous) = session.last_verified()
        {
            let missing = missing_hints(row, previous);
            if !missing.is_empty() {
                return Err(WordleError::MissingRequiredHints { missing });
            }
        }

        let verdict = verify_row(row, &session.word)?;

        session.keys_disabled.extend(disabled_keys(&verdict));
        session.current_row = index + 1;
        session.status = if verdict.is_all_correct() {
            SessionStatus::Won
        } else if session.current_row >= session.row_limit {
            SessionStatus::Lost
        } else {
            SessionStatus::InProgress
        };
        session.rows[index] = verdict.clone();

        if !session.is_finished() {
            session.rows.push(WordleRow::empty(session.word.len()));
        }

        Ok(WordleOutcome::RowVerified {
            row: index,
            verdict,
            status: session.status,
        })
    }

    fn grant_rows(session: &mut WordleSession, extra: usize) -> Result<WordleOutcome, WordleError> {
        if session.status != SessionStatus::Lost || extra == 0 {
            return Err(WordleError::RewardNotApplicable);
        }

        let row_limit = session
            .row_limit
            .checked_add(extra)
            .filter(|limit| *limit <= GameConfig::MAX_ROW_LIMIT)
            .ok_or(WordleError::InvalidRowLimit {
                limit: session.row_limit.saturating_add(extra),
                max: GameConfig::MAX_ROW_LIMIT,
            })?;

        session.row_limit = row_limit;
        session.status = SessionStatus::InProgress;
        session.rows.push(WordleRow::empty(session.word.len()));

        Ok(WordleOutcome::RowsGranted {
            row_limit: session.row_limit,
        })
    }
}
