//! Letter verification and hint rules.
//!
//! [`verify_row`] resolves duplicates in two passes: exact matches claim
//! their letter first, then the remaining occurrences are handed out to
//! misplaced letters from left to right. A letter therefore never gets more
//! `Correct` + `Present` marks than it has occurrences in the target word.

use std::collections::{BTreeSet, HashMap};

use super::{TargetWord, WordleChar, WordleError, WordleItem, WordleRow};

/// Verifies a fully entered row against the target word.
///
/// Fails with [`WordleError::MalformedRow`] when a cell is still empty or the
/// row length differs from the word length.
pub fn verify_row(row: &WordleRow, target: &TargetWord) -> Result<WordleRow, WordleError> {
    let malformed = || WordleError::MalformedRow {
        filled: row.filled(),
        expected: target.len(),
    };

    let guess = row.letters().ok_or_else(malformed)?;
    if guess.len() != target.len() {
        return Err(malformed());
    }

    let mut remaining: HashMap<WordleChar, usize> = HashMap::new();
    for &letter in target.chars() {
        *remaining.entry(letter).or_default() += 1;
    }

    // Pass 1: exact matches
    let mut verdicts: Vec<Option<WordleItem>> = vec![None; guess.len()];
    for (index, (&guessed, &expected)) in guess.iter().zip(target.chars()).enumerate() {
        if guessed == expected {
            verdicts[index] = Some(WordleItem::Correct(guessed));
            if let Some(count) = remaining.get_mut(&guessed) {
                *count -= 1;
            }
        }
    }

    // Pass 2: misplaced letters consume what is left
    let items = guess
        .iter()
        .zip(verdicts)
        .map(|(&guessed, verdict)| {
            verdict.unwrap_or_else(|| match remaining.get_mut(&guessed) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    WordleItem::Present(guessed)
                }
                _ => WordleItem::Absent(guessed),
            })
        })
        .collect();

    Ok(WordleRow::from_items(items))
}

/// Hint letters of `previous` that `candidate` fails to reuse.
///
/// Every `Correct` or `Present` cell of the previous verified row must be
/// matched by one occurrence of the same letter anywhere in the candidate.
/// Repeated hints require repeated letters.
pub fn missing_hints(candidate: &WordleRow, previous: &WordleRow) -> Vec<WordleChar> {
    let mut available: HashMap<WordleChar, usize> = HashMap::new();
    for letter in candidate.items().iter().filter_map(WordleItem::char) {
        *available.entry(letter).or_default() += 1;
    }

    previous
        .items()
        .iter()
        .filter(|item| item.is_hint())
        .filter_map(WordleItem::char)
        .filter(|letter| match available.get_mut(letter) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .collect()
}

/// Letters of a verified row known to be absent from the target word.
///
/// A letter marked `Absent` in one cell but `Correct`/`Present` in another is
/// not disabled: it does occur in the word.
pub fn disabled_keys(row: &WordleRow) -> BTreeSet<WordleChar> {
    let revealed: BTreeSet<WordleChar> = row
        .items()
        .iter()
        .filter(|item| item.is_hint())
        .filter_map(WordleItem::char)
        .collect();

    row.items()
        .iter()
        .filter_map(|item| match item {
            WordleItem::Absent(letter) if !revealed.contains(letter) => Some(*letter),
            _ => None,
        })
        .collect()
}

/// Occurrence counts shown next to `Present` cells.
///
/// For each `Present` cell, yields how many times its letter occurs in the
/// target when that differs from the number of `Present` cells showing the
/// same letter in this row, so the player learns the letter repeats.
pub fn letter_hints(row: &WordleRow, target: &TargetWord) -> Vec<Option<usize>> {
    let mut present: HashMap<WordleChar, usize> = HashMap::new();
    for item in row.items() {
        if let WordleItem::Present(letter) = item {
            *present.entry(*letter).or_default() += 1;
        }
    }

    row.items()
        .iter()
        .map(|item| match item {
            WordleItem::Present(letter) => {
                let in_word = target.count(*letter);
                let shown = present.get(letter).copied().unwrap_or_default();
                (in_word != shown).then_some(in_word)
            }
            _ => None,
        })
        .collect()
}
