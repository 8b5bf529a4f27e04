//! Fire-and-forget end-of-game jobs.
//!
//! Sessions hand their side effects (recording the result, applying XP,
//! unlocking the next maze item) to a [`JobScheduler`]. A single
//! [`JobWorker`] drains the queue in FIFO order, so a job enqueued after
//! another also completes after it.

mod scheduler;
mod worker;

pub use scheduler::JobScheduler;
pub use worker::JobWorker;

use serde::Serialize;
use thiserror::Error;

use quiz_core::MazeItemId;

use crate::repository::{GameResult, RepositoryError};

/// One unit of deferred work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Job {
    /// Marks a maze item played, unlocking its successor.
    MarkMazeItemPlayed { id: MazeItemId },

    /// Records the result, then applies XP when `xp` is set.
    ///
    /// `xp: None` records the result unscored, e.g. a daily replay.
    RecordResult { result: GameResult, xp: Option<u64> },
}

impl Job {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MarkMazeItemPlayed { .. } => "mark_maze_item_played",
            Self::RecordResult { .. } => "record_result",
        }
    }
}

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub(crate) enum JobRequest {
    Single(Job),
    /// Run `then` only after `first` succeeded.
    Chain { first: Job, then: Job },
    /// Acknowledged once every earlier request has been processed.
    Flush(tokio::sync::oneshot::Sender<()>),
    Shutdown,
}
