use crate::error::{ErrorSeverity, GameError};

use super::MazeItemId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeError {
    #[error("maze index {index} out of range (track has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("maze item {0} not found")]
    ItemNotFound(MazeItemId),

    #[error("maze item {0} already exists")]
    DuplicateId(MazeItemId),
}

impl GameError for MazeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IndexOutOfRange { .. } | Self::ItemNotFound(_) => ErrorSeverity::Validation,
            Self::DuplicateId(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "MAZE_INDEX_OUT_OF_RANGE",
            Self::ItemNotFound(_) => "MAZE_ITEM_NOT_FOUND",
            Self::DuplicateId(_) => "MAZE_DUPLICATE_ID",
        }
    }
}
