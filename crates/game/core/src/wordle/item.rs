use super::WordleChar;

/// State of a single guess cell.
///
/// Cells start `Empty`, become `Pending` when a key is entered and end up in
/// one of the three verified states once the row is submitted. A verified
/// cell never goes back to `Empty` or `Pending`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordleItem {
    /// No letter entered yet.
    #[default]
    Empty,
    /// Letter entered, row not verified yet.
    Pending(WordleChar),
    /// Letter does not occur in the target word (or all its occurrences are
    /// already claimed by other cells).
    Absent(WordleChar),
    /// Letter occurs in the target word at a different position.
    Present(WordleChar),
    /// Letter matches the target word at this position.
    Correct(WordleChar),
}

impl WordleItem {
    pub const fn from_char(value: WordleChar) -> Self {
        Self::Pending(value)
    }

    /// The letter held by this cell, if any.
    pub const fn char(&self) -> Option<WordleChar> {
        match *self {
            Self::Empty => None,
            Self::Pending(c) | Self::Absent(c) | Self::Present(c) | Self::Correct(c) => Some(c),
        }
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub const fn is_verified(&self) -> bool {
        matches!(self, Self::Absent(_) | Self::Present(_) | Self::Correct(_))
    }

    pub const fn is_correct(&self) -> bool {
        matches!(self, Self::Correct(_))
    }

    /// `Correct` or `Present`: the cell reveals a letter of the target word.
    pub const fn is_hint(&self) -> bool {
        matches!(self, Self::Present(_) | Self::Correct(_))
    }
}
