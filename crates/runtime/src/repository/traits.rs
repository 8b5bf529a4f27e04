//! Repository contracts for the data a finished session hands off.

use quiz_core::{MazeItem, MazeItemId, MazeTrack, UserProfile};

use super::error::Result;
use super::types::GameResult;

/// Persistence sink for finished games.
pub trait GameResultRepository: Send + Sync {
    /// Append one result record.
    fn record(&self, result: &GameResult) -> Result<()>;

    /// All recorded results, oldest first.
    fn list(&self) -> Result<Vec<GameResult>>;
}

/// Reward sink owning the user's XP total and diamond balance.
///
/// The XP engine only computes deltas; this repository is the single writer
/// of the persisted totals.
pub trait ProfileRepository: Send + Sync {
    /// Current profile, `None` when no user exists yet.
    fn load(&self) -> Result<Option<UserProfile>>;

    /// Adds XP and returns the new total.
    ///
    /// Level-up is not reported here: `award_xp` already decided it before
    /// the write, and the caller grants diamonds from that decision.
    fn apply_xp(&self, delta: u64) -> Result<u64>;

    /// Adds (or removes, when negative) diamonds and returns the new balance.
    fn adjust_diamonds(&self, delta: i64) -> Result<i64>;
}

/// Storage of the maze track.
pub trait MazeRepository: Send + Sync {
    fn load_track(&self) -> Result<MazeTrack>;

    /// Marks an item played; `Ok(false)` when it already was.
    fn mark_played(&self, id: MazeItemId) -> Result<bool>;

    /// Appends generated items at the end of the track.
    fn append(&self, items: Vec<MazeItem>) -> Result<Vec<MazeItemId>>;
}
