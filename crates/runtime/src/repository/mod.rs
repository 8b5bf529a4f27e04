//! Repository layer for data that outlives a session.
//!
//! Repositories receive what a finished session hands off:
//! - Game results (persistence sink)
//! - XP total and diamonds (reward sink)
//! - Maze track progress
//!
//! Content (words, questions) is fetched through
//! [`ContentSource`](crate::api::ContentSource), not repositories.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileResultLog;
pub use memory::{InMemoryMazeRepo, InMemoryProfileRepo, InMemoryResultRepo};
pub use traits::{GameResultRepository, MazeRepository, ProfileRepository};
pub use types::{GameResult, MultiChoiceResult, WordleResult};
