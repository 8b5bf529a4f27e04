//! Error types raised by repository implementations.

use thiserror::Error;

use quiz_core::MazeError;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no user profile exists")]
    ProfileNotFound,

    #[error(transparent)]
    Maze(#[from] MazeError),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
