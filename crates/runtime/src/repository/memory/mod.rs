//! In-memory repository implementations.
//!
//! Used by tests and the demo client. State lives behind `std::sync::RwLock`
//! and is lost when the process exits.

use std::sync::RwLock;

use quiz_core::{MazeItem, MazeItemId, MazeTrack, UserProfile};

use crate::repository::{
    GameResult, GameResultRepository, MazeRepository, ProfileRepository, RepositoryError, Result,
};

#[derive(Default)]
pub struct InMemoryResultRepo {
    results: RwLock<Vec<GameResult>>,
}

impl InMemoryResultRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameResultRepository for InMemoryResultRepo {
    fn record(&self, result: &GameResult) -> Result<()> {
        self.results
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?
            .push(result.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<GameResult>> {
        let results = self
            .results
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(results.clone())
    }
}

/// Holds at most one local user.
#[derive(Default)]
pub struct InMemoryProfileRepo {
    profile: RwLock<Option<UserProfile>>,
}

impl InMemoryProfileRepo {
    /// A repository without any user.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            profile: RwLock::new(Some(profile)),
        }
    }

    fn update<T>(&self, f: impl FnOnce(&mut UserProfile) -> T) -> Result<T> {
        let mut profile = self
            .profile
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let profile = profile
            .as_mut()
            .ok_or(RepositoryError::ProfileNotFound)?;
        Ok(f(profile))
    }
}

impl ProfileRepository for InMemoryProfileRepo {
    fn load(&self) -> Result<Option<UserProfile>> {
        let profile = self
            .profile
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(profile.clone())
    }

    fn apply_xp(&self, delta: u64) -> Result<u64> {
        self.update(|profile| {
            profile.total_xp = profile.total_xp.saturating_add(delta);
            profile.total_xp
        })
    }

    fn adjust_diamonds(&self, delta: i64) -> Result<i64> {
        self.update(|profile| {
            profile.diamonds = profile.diamonds.saturating_add(delta);
            profile.diamonds
        })
    }
}

#[derive(Default)]
pub struct InMemoryMazeRepo {
    track: RwLock<MazeTrack>,
}

impl InMemoryMazeRepo {
    pub fn new(track: MazeTrack) -> Self {
        Self {
            track: RwLock::new(track),
        }
    }
}

impl MazeRepository for InMemoryMazeRepo {
    fn load_track(&self) -> Result<MazeTrack> {
        let track = self.track.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(track.clone())
    }

    fn mark_played(&self, id: MazeItemId) -> Result<bool> {
        let mut track = self
            .track
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(track.mark_played_by_id(id)?)
    }

    fn append(&self, items: Vec<MazeItem>) -> Result<Vec<MazeItemId>> {
        let mut track = self
            .track
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(track.append(items)?)
    }
}

#[cfg(test)]
mod tests {
    use quiz_core::{WordleQuizType, XpConfig};

    use super::*;

    #[test]
    fn profile_updates_require_a_user() {
        let repo = InMemoryProfileRepo::empty();
        assert!(repo.load().unwrap().is_none());
        assert!(matches!(
            repo.apply_xp(10),
            Err(RepositoryError::ProfileNotFound)
        ));

        let repo = InMemoryProfileRepo::with_profile(UserProfile::new("u1", &XpConfig::default()));
        assert_eq!(repo.apply_xp(10).unwrap(), 10);
        assert_eq!(repo.adjust_diamonds(-5).unwrap(), 20);
    }

    #[test]
    fn maze_repo_marks_by_id() {
        let track = MazeTrack::from_items(vec![
            MazeItem::wordle("ONE", WordleQuizType::Text),
            MazeItem::wordle("TWO", WordleQuizType::Text),
        ])
        .unwrap();
        let repo = InMemoryMazeRepo::new(track);
        let first = repo.load_track().unwrap().items()[0].id;

        assert!(repo.mark_played(first).unwrap());
        assert!(!repo.mark_played(first).unwrap());
        assert!(matches!(
            repo.mark_played(MazeItemId(42)),
            Err(RepositoryError::Maze(_))
        ));
        assert_eq!(repo.load_track().unwrap().next_playable(), Some(1));
    }
}
