use strum::{Display, EnumIter, EnumString};

use super::MultiChoiceError;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum QuestionDifficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiChoiceQuestion {
    pub id: u32,
    pub description: String,
    pub answers: Vec<String>,
    /// Index into `answers`.
    pub correct_answer: usize,
    pub category: Option<u32>,
    pub difficulty: QuestionDifficulty,
}

impl MultiChoiceQuestion {
    pub fn new(
        id: u32,
        description: impl Into<String>,
        answers: Vec<String>,
        correct_answer: usize,
    ) -> Result<Self, MultiChoiceError> {
        let question = Self {
            id,
            description: description.into(),
            answers,
            correct_answer,
            category: None,
            difficulty: QuestionDifficulty::default(),
        };
        question.validate()?;
        Ok(question)
    }

    #[must_use]
    pub fn with_category(mut self, category: u32) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: QuestionDifficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Checks that the question has answers and the correct index points at one.
    pub fn validate(&self) -> Result<(), MultiChoiceError> {
        if self.correct_answer >= self.answers.len() {
            return Err(MultiChoiceError::InvalidQuestion { id: self.id });
        }
        Ok(())
    }

    pub fn is_correct(&self, selected: SelectedAnswer) -> bool {
        selected.index() == Some(self.correct_answer)
    }
}

/// The answer currently picked by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectedAnswer {
    #[default]
    None,
    Index(usize),
}

impl SelectedAnswer {
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Index(index) => Some(index),
        }
    }

    pub const fn is_selected(self) -> bool {
        matches!(self, Self::Index(_))
    }
}

/// One question in a multi-choice session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MultiChoiceStep {
    NotCurrent(MultiChoiceQuestion),
    Current(MultiChoiceQuestion),
    Completed {
        question: MultiChoiceQuestion,
        correct: bool,
        selected: SelectedAnswer,
        question_time_ms: u64,
    },
}

impl MultiChoiceStep {
    pub fn question(&self) -> &MultiChoiceQuestion {
        match self {
            Self::NotCurrent(question) | Self::Current(question) => question,
            Self::Completed { question, .. } => question,
        }
    }

    pub const fn is_current(&self) -> bool {
        matches!(self, Self::Current(_))
    }

    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub const fn is_correct(&self) -> bool {
        matches!(self, Self::Completed { correct: true, .. })
    }

    pub fn question_time_ms(&self) -> Option<u64> {
        match self {
            Self::Completed {
                question_time_ms, ..
            } => Some(*question_time_ms),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_rejects_out_of_range_answer() {
        let answers = vec!["A".to_string(), "B".to_string()];
        assert!(MultiChoiceQuestion::new(1, "?", answers.clone(), 1).is_ok());
        assert_eq!(
            MultiChoiceQuestion::new(7, "?", answers, 2),
            Err(MultiChoiceError::InvalidQuestion { id: 7 })
        );
        assert!(MultiChoiceQuestion::new(8, "?", Vec::new(), 0).is_err());
    }

    #[test]
    fn unanswered_is_never_correct() {
        let question =
            MultiChoiceQuestion::new(1, "?", vec!["A".into(), "B".into()], 0).unwrap();
        assert!(!question.is_correct(SelectedAnswer::None));
        assert!(question.is_correct(SelectedAnswer::Index(0)));
        assert!(!question.is_correct(SelectedAnswer::Index(1)));
    }

    #[test]
    fn difficulty_parses() {
        assert_eq!("HARD".parse::<QuestionDifficulty>().unwrap(), QuestionDifficulty::Hard);
        assert_eq!(QuestionDifficulty::Easy.to_string(), "easy");
    }
}
