//! Maze meta-progression.
//!
//! A [`MazeTrack`] is an ordered, append-only list of quiz items unlocked
//! strictly in sequence: item `i + 1` becomes playable once item `i` has been
//! played, and a played item is never playable again.
mod error;

pub use error::MazeError;

use core::fmt;

use crate::multi_choice::{MultiChoiceQuestion, QuestionDifficulty};
use crate::wordle::WordleQuizType;

/// Stable identifier of a maze item.
///
/// `MazeItemId(0)` marks an item that has not been assigned an id yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeItemId(pub u32);

impl MazeItemId {
    pub const UNASSIGNED: Self = Self(0);

    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for MazeItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Quiz carried by a maze item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazePayload {
    Wordle {
        word: String,
        quiz_type: WordleQuizType,
    },
    MultiChoice(MultiChoiceQuestion),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeItem {
    pub id: MazeItemId,
    pub difficulty: QuestionDifficulty,
    pub played: bool,
    pub payload: MazePayload,
}

impl MazeItem {
    /// A fresh, unplayed item without an id.
    pub fn new(difficulty: QuestionDifficulty, payload: MazePayload) -> Self {
        Self {
            id: MazeItemId::UNASSIGNED,
            difficulty,
            played: false,
            payload,
        }
    }

    pub fn wordle(word: impl Into<String>, quiz_type: WordleQuizType) -> Self {
        Self::new(
            QuestionDifficulty::Easy,
            MazePayload::Wordle {
                word: word.into(),
                quiz_type,
            },
        )
    }

    pub fn multi_choice(question: MultiChoiceQuestion) -> Self {
        Self::new(question.difficulty, MazePayload::MultiChoice(question))
    }

    #[must_use]
    pub fn with_id(mut self, id: u32) -> Self {
        self.id = MazeItemId(id);
        self
    }
}

/// Ordered sequence of maze items.
///
/// Items can only be added at the tail and `played` only ever goes from
/// `false` to `true`, so the playable status of existing items is never
/// affected by growth.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeTrack {
    items: Vec<MazeItem>,
}

impl MazeTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a stored track, keeping `played` flags and assigning ids
    /// where missing.
    pub fn from_items(items: Vec<MazeItem>) -> Result<Self, MazeError> {
        let mut track = Self::new();
        track.extend(items, false)?;
        Ok(track)
    }

    pub fn items(&self) -> &[MazeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MazeItem> {
        self.items.get(index)
    }

    pub fn position(&self, id: MazeItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// True iff the item is unplayed and is either first or follows a played item.
    ///
    /// Out-of-range indices are never playable.
    pub fn is_playable(&self, index: usize) -> bool {
        let Some(item) = self.items.get(index) else {
            return false;
        };
        if item.played {
            return false;
        }
        match index.checked_sub(1) {
            None => true,
            Some(previous) => self.items[previous].played,
        }
    }

    pub fn is_played(&self, index: usize) -> bool {
        self.items.get(index).is_some_and(|item| item.played)
    }

    /// Marks one item as played.
    ///
    /// Returns `true` when the flag changed and `false` when the item was
    /// already played.
    pub fn mark_played(&mut self, index: usize) -> Result<bool, MazeError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(MazeError::IndexOutOfRange { index, len })?;

        if item.played {
            return Ok(false);
        }
        item.played = true;
        Ok(true)
    }

    pub fn mark_played_by_id(&mut self, id: MazeItemId) -> Result<bool, MazeError> {
        let index = self.position(id).ok_or(MazeError::ItemNotFound(id))?;
        self.mark_played(index)
    }

    /// Appends items at the tail.
    ///
    /// Items arriving without an id get ids continuing after the current
    /// maximum. New items always start unplayed. Fails without modifying the
    /// track if an incoming id collides with an existing one.
    pub fn append(&mut self, items: Vec<MazeItem>) -> Result<Vec<MazeItemId>, MazeError> {
        self.extend(items, true)
    }

    fn extend(
        &mut self,
        items: Vec<MazeItem>,
        reset_played: bool,
    ) -> Result<Vec<MazeItemId>, MazeError> {
        let mut next_id = self
            .items
            .iter()
            .chain(items.iter())
            .map(|item| item.id.0)
            .max()
            .unwrap_or_default();

        let mut staged = Vec::with_capacity(items.len());
        for mut item in items {
            if !item.id.is_assigned() {
                next_id += 1;
                item.id = MazeItemId(next_id);
            }
            let duplicate = self
                .items
                .iter()
                .chain(staged.iter())
                .any(|existing: &MazeItem| existing.id == item.id);
            if duplicate {
                return Err(MazeError::DuplicateId(item.id));
            }
            if reset_played {
                item.played = false;
            }
            staged.push(item);
        }

        let ids = staged.iter().map(|item| item.id).collect();
        self.items.extend(staged);
        Ok(ids)
    }

    /// Index of the single playable item, if any.
    pub fn next_playable(&self) -> Option<usize> {
        (0..self.items.len()).find(|&index| self.is_playable(index))
    }

    pub fn played_count(&self) -> usize {
        self.items.iter().filter(|item| item.played).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(played: &[bool]) -> MazeTrack {
        let items = played
            .iter()
            .enumerate()
            .map(|(index, _)| MazeItem::wordle(format!("WORD{index}"), WordleQuizType::Text))
            .collect();
        let mut track = MazeTrack::from_items(items).unwrap();
        for (index, &played) in played.iter().enumerate() {
            if played {
                track.mark_played(index).unwrap();
            }
        }
        track
    }

    #[test]
    fn first_item_ignores_predecessor() {
        assert!(track(&[false, false]).is_playable(0));
        assert!(!track(&[true, false]).is_playable(0));
    }

    #[test]
    fn unlock_is_strictly_sequential() {
        let t = track(&[true, false, false]);
        assert!(t.is_playable(1));
        assert!(!t.is_playable(2));
        assert_eq!(t.next_playable(), Some(1));
        assert!(!t.is_playable(3));
    }

    #[test]
    fn played_items_are_never_playable() {
        let patterns: [&[bool]; 4] = [
            &[true],
            &[true, true],
            &[false, true],
            &[true, true, false, true],
        ];
        for pattern in patterns {
            let t = track(pattern);
            for (index, &played) in pattern.iter().enumerate() {
                if played {
                    assert!(!t.is_playable(index), "{pattern:?} index {index}");
                }
            }
        }
    }

    #[test]
    fn mark_played_is_idempotent() {
        let mut t = track(&[false, false]);
        assert_eq!(t.mark_played(0), Ok(true));
        assert_eq!(t.mark_played(0), Ok(false));
        assert!(t.is_played(0));
        assert_eq!(t.played_count(), 1);
        assert_eq!(
            t.mark_played(5),
            Err(MazeError::IndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn append_keeps_existing_state_and_assigns_ids() {
        let mut t = track(&[true, false]);
        let before: Vec<bool> = (0..t.len()).map(|i| t.is_playable(i)).collect();

        let mut played = MazeItem::wordle("EXTRA", WordleQuizType::Text);
        played.played = true;
        let ids = t
            .append(vec![played, MazeItem::wordle("MORE", WordleQuizType::Text)])
            .unwrap();

        assert_eq!(ids, vec![MazeItemId(3), MazeItemId(4)]);
        let after: Vec<bool> = (0..2).map(|i| t.is_playable(i)).collect();
        assert_eq!(before, after);
        assert!(!t.is_played(2));
        assert!(!t.is_playable(2));
    }

    #[test]
    fn append_rejects_duplicate_ids() {
        let mut t = track(&[false]);
        let existing = t.items()[0].id;
        let error = t
            .append(vec![
                MazeItem::wordle("A", WordleQuizType::Text),
                MazeItem::wordle("B", WordleQuizType::Text).with_id(existing.0),
            ])
            .unwrap_err();
        assert_eq!(error, MazeError::DuplicateId(existing));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn stored_tracks_keep_played_flags() {
        let mut played = MazeItem::wordle("DONE", WordleQuizType::Text).with_id(4);
        played.played = true;
        let t = MazeTrack::from_items(vec![
            played,
            MazeItem::wordle("NEXT", WordleQuizType::Text),
        ])
        .unwrap();

        assert!(t.is_played(0));
        assert_eq!(t.items()[1].id, MazeItemId(5));
        assert_eq!(t.next_playable(), Some(1));
    }

    #[test]
    fn mark_by_id() {
        let mut t = track(&[false, false]);
        let id = t.items()[1].id;
        assert_eq!(t.mark_played_by_id(id), Ok(true));
        assert_eq!(
            t.mark_played_by_id(MazeItemId(99)),
            Err(MazeError::ItemNotFound(MazeItemId(99)))
        );
    }
}
