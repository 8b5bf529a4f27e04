//! Event types for different topics.

use serde::{Deserialize, Serialize};

use quiz_core::{MazeItemId, SessionStatus, WordleRow, XpAward};

use crate::repository::GameResult;

/// Which quiz a session event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameKind {
    Wordle,
    MultiChoice,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEnd {
    Won,
    Lost,
    /// Closed while still in progress.
    Abandoned,
}

impl SessionEnd {
    pub fn from_status(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Won => Self::Won,
            SessionStatus::Lost => Self::Lost,
            SessionStatus::InProgress => Self::Abandoned,
        }
    }
}

/// Session lifecycle and transition events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Content fetch started; the snapshot shows `loading = true`.
    Loading { kind: GameKind, generation: u64 },

    /// Content fetch failed. The session can be retried with play-again.
    FetchFailed { kind: GameKind, message: String },

    Started {
        kind: GameKind,
        /// Word length for word-guess sessions, question count otherwise.
        size: usize,
        maze_item_id: Option<MazeItemId>,
    },

    RowVerified {
        row: usize,
        verdict: WordleRow,
        status: SessionStatus,
    },

    RowsGranted { row_limit: usize },

    QuestionAnswered {
        index: usize,
        correct: bool,
        question_time_ms: u64,
    },

    /// A transition was rejected; the session state is unchanged.
    Rejected {
        kind: GameKind,
        code: String,
        message: String,
    },

    Ended { kind: GameKind, end: SessionEnd },
}

/// Progression changes applied by the job worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardEvent {
    XpAwarded(XpAward),

    /// No profile could be resolved; the result is recorded without XP.
    Unscored { reason: String },

    ResultRecorded(GameResult),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MazeEvent {
    ItemPlayed {
        id: MazeItemId,
        /// False when the item had already been played.
        newly_played: bool,
    },
}

/// Background job failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobEvent {
    Failed { job: String, error: String },

    /// The second job of a chain was dropped because the first failed.
    Skipped { job: String },
}
