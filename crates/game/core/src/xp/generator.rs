//! Per-variant XP formulas.
//!
//! Generators are plain coefficient structs so a remote-config collaborator
//! can deserialize them directly into [`XpConfig`](super::XpConfig).

/// Converts one finished session into XP.
pub trait XpGenerator {
    type Sample;

    fn generate_xp(&self, sample: &Self::Sample) -> u64;
}

/// What a multi-choice session yields to the XP engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiChoicePerformance {
    pub correct: usize,
    pub total: usize,
    pub average_time_ms: u64,
}

/// What a word-guess session yields to the XP engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordlePerformance {
    pub solved: bool,
    pub rows_used: usize,
    pub row_limit: usize,
}

/// `correct * correct_answer_xp` plus a speed bonus per correct answer that
/// shrinks linearly to zero at `max_answer_time_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MultiChoiceXpGenerator {
    pub correct_answer_xp: u64,
    pub speed_bonus_xp: u64,
    pub max_answer_time_ms: u64,
}

impl Default for MultiChoiceXpGenerator {
    fn default() -> Self {
        Self {
            correct_answer_xp: 10,
            speed_bonus_xp: 10,
            max_answer_time_ms: 30_000,
        }
    }
}

impl XpGenerator for MultiChoiceXpGenerator {
    type Sample = MultiChoicePerformance;

    fn generate_xp(&self, sample: &MultiChoicePerformance) -> u64 {
        let correct = sample.correct.min(sample.total) as u64;
        if correct == 0 {
            return 0;
        }

        let base = correct.saturating_mul(self.correct_answer_xp);
        let bonus = if self.max_answer_time_ms == 0 {
            0
        } else {
            let saved = self.max_answer_time_ms - sample.average_time_ms.min(self.max_answer_time_ms);
            correct.saturating_mul(self.speed_bonus_xp).saturating_mul(saved) / self.max_answer_time_ms
        };
        base.saturating_add(bonus)
    }
}

/// `solved_xp` minus `row_penalty_xp` for every row after the first, never
/// below `min_xp`. Lost sessions earn nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WordleXpGenerator {
    pub solved_xp: u64,
    pub row_penalty_xp: u64,
    pub min_xp: u64,
}

impl Default for WordleXpGenerator {
    fn default() -> Self {
        Self {
            solved_xp: 60,
            row_penalty_xp: 10,
            min_xp: 10,
        }
    }
}

impl XpGenerator for WordleXpGenerator {
    type Sample = WordlePerformance;

    fn generate_xp(&self, sample: &WordlePerformance) -> u64 {
        if !sample.solved {
            return 0;
        }
        let extra_rows = sample.rows_used.saturating_sub(1) as u64;
        self.solved_xp
            .saturating_sub(extra_rows.saturating_mul(self.row_penalty_xp))
            .max(self.min_xp)
    }
}
