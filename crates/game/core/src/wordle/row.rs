use super::{WordleChar, WordleItem};

/// A fixed-length row of guess cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordleRow {
    items: Vec<WordleItem>,
}

impl WordleRow {
    /// Creates a row of `len` empty cells.
    pub fn empty(len: usize) -> Self {
        Self {
            items: vec![WordleItem::Empty; len],
        }
    }

    pub fn from_items(items: Vec<WordleItem>) -> Self {
        Self { items }
    }

    /// Builds a pending row from typed text. Intended for tests and replays.
    pub fn pending(text: &str) -> Result<Self, super::WordleError> {
        let items = text
            .chars()
            .map(|c| WordleChar::new(c).map(WordleItem::from_char))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { items })
    }

    pub fn items(&self) -> &[WordleItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of cells holding a letter.
    pub fn filled(&self) -> usize {
        self.items.iter().filter(|item| !item.is_empty()).count()
    }

    /// True when no cell is `Empty`.
    pub fn is_completed(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| !item.is_empty())
    }

    /// True when every cell carries a verdict.
    pub fn is_verified(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(WordleItem::is_verified)
    }

    pub fn is_all_correct(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(WordleItem::is_correct)
    }

    /// Letters of the row in order, or `None` if any cell is still empty.
    pub fn letters(&self) -> Option<Vec<WordleChar>> {
        self.items.iter().map(WordleItem::char).collect()
    }

    /// The typed text, skipping empty cells.
    pub fn word(&self) -> String {
        self.items
            .iter()
            .filter_map(WordleItem::char)
            .map(char::from)
            .collect()
    }

    /// Returns a copy with the first empty cell set to `letter`.
    ///
    /// `None` when the row is already full.
    pub fn with_letter(&self, letter: WordleChar) -> Option<(Self, usize)> {
        let index = self.items.iter().position(WordleItem::is_empty)?;
        let mut items = self.items.clone();
        items[index] = WordleItem::from_char(letter);
        Some((Self { items }, index))
    }

    /// Returns a copy with the cell at `index` cleared.
    ///
    /// `None` when the index is out of range or the cell is already empty.
    pub fn without_letter(&self, index: usize) -> Option<Self> {
        match self.items.get(index) {
            Some(item) if item.is_pending() => {
                let mut items = self.items.clone();
                items[index] = WordleItem::Empty;
                Some(Self { items })
            }
            _ => None,
        }
    }
}
