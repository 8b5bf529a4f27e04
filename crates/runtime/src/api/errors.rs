//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, content sources and
//! rule violations so clients can bubble them up with consistent context.

use thiserror::Error;
use tokio::sync::oneshot;

use quiz_core::{ErrorSeverity, GameError, MazeItemId, MultiChoiceError, WordleError};

pub use super::providers::ContentError;
pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("job worker channel closed")]
    JobChannelClosed,

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("session content is still loading")]
    SessionNotReady,

    #[error("maze item {0} is not playable yet")]
    MazeItemLocked(MazeItemId),

    #[error("runtime requires a content source before building")]
    MissingContentSource,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Wordle(#[from] WordleError),

    #[error(transparent)]
    MultiChoice(#[from] MultiChoiceError),
}

impl RuntimeError {
    /// Severity of the underlying rule violation, if this wraps one.
    pub fn rule_severity(&self) -> Option<ErrorSeverity> {
        match self {
            Self::Wordle(error) => Some(error.severity()),
            Self::MultiChoice(error) => Some(error.severity()),
            _ => None,
        }
    }
}
