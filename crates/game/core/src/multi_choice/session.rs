use super::{MultiChoiceError, MultiChoiceQuestion, MultiChoiceStep, SelectedAnswer};
use crate::maze::MazeItemId;
use crate::xp::MultiChoicePerformance;

/// Result of an accepted [`MultiChoiceSession::verify`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MultiChoiceOutcome {
    /// The question tag did not match the current question, or the quiz is over.
    Ignored,
    Answered {
        index: usize,
        correct: bool,
        /// Question that became current, `None` once the quiz is finished.
        next: Option<usize>,
    },
}

impl MultiChoiceOutcome {
    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

/// A run through a list of questions, one at a time, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiChoiceSession {
    pub steps: Vec<MultiChoiceStep>,
    pub current_index: Option<usize>,
    pub selected: SelectedAnswer,
    pub maze_item_id: Option<MazeItemId>,
}

impl MultiChoiceSession {
    /// Creates a session with the first question current.
    pub fn new(questions: Vec<MultiChoiceQuestion>) -> Result<Self, MultiChoiceError> {
        if questions.is_empty() {
            return Err(MultiChoiceError::NoQuestions);
        }
        for question in &questions {
            question.validate()?;
        }

        let mut session = Self {
            steps: questions.into_iter().map(MultiChoiceStep::NotCurrent).collect(),
            current_index: None,
            selected: SelectedAnswer::None,
            maze_item_id: None,
        };
        session.advance();
        Ok(session)
    }

    #[must_use]
    pub fn with_maze_item(mut self, id: MazeItemId) -> Self {
        self.maze_item_id = Some(id);
        self
    }

    pub fn current(&self) -> Option<&MultiChoiceQuestion> {
        self.current_index
            .and_then(|index| self.steps.get(index))
            .map(MultiChoiceStep::question)
    }

    pub fn select_answer(&mut self, answer: SelectedAnswer) -> Result<(), MultiChoiceError> {
        let question = self.current().ok_or(MultiChoiceError::NoCurrentQuestion)?;
        if let SelectedAnswer::Index(index) = answer
            && index >= question.answers.len()
        {
            return Err(MultiChoiceError::AnswerOutOfRange {
                index,
                answers: question.answers.len(),
            });
        }
        self.selected = answer;
        Ok(())
    }

    /// Completes the current question with the selected answer.
    ///
    /// `question` tags the call with the question it was issued for (a
    /// countdown passes the question it was armed for); a mismatching tag is
    /// ignored so an expired timer never completes the following question.
    pub fn verify(&mut self, question: Option<usize>, question_time_ms: u64) -> MultiChoiceOutcome {
        let Some(index) = self.current_index else {
            return MultiChoiceOutcome::Ignored;
        };
        if question.is_some_and(|tag| tag != index) {
            return MultiChoiceOutcome::Ignored;
        }

        let selected = std::mem::take(&mut self.selected);
        let step = &mut self.steps[index];
        let current = step.question().clone();
        let correct = current.is_correct(selected);
        *step = MultiChoiceStep::Completed {
            question: current,
            correct,
            selected,
            question_time_ms,
        };

        let next = self.advance();
        MultiChoiceOutcome::Answered {
            index,
            correct,
            next,
        }
    }

    /// Makes the first not-yet-played question current.
    fn advance(&mut self) -> Option<usize> {
        let next = self
            .steps
            .iter()
            .position(|step| matches!(step, MultiChoiceStep::NotCurrent(_)));

        if let Some(index) = next {
            let question = self.steps[index].question().clone();
            self.steps[index] = MultiChoiceStep::Current(question);
        }
        self.current_index = next;
        next
    }

    pub fn is_finished(&self) -> bool {
        self.steps.iter().all(MultiChoiceStep::is_completed)
    }

    pub fn completed_steps(&self) -> impl Iterator<Item = &MultiChoiceStep> {
        self.steps.iter().filter(|step| step.is_completed())
    }

    pub fn correct_count(&self) -> usize {
        self.steps.iter().filter(|step| step.is_correct()).count()
    }

    pub fn all_correct(&self) -> bool {
        self.is_finished() && self.correct_count() == self.steps.len()
    }

    /// XP sample over the completed questions.
    pub fn performance(&self) -> MultiChoicePerformance {
        let times: Vec<u64> = self
            .steps
            .iter()
            .filter_map(MultiChoiceStep::question_time_ms)
            .collect();
        let average_time_ms = match times.len() as u64 {
            0 => 0,
            count => times.iter().sum::<u64>() / count,
        };

        MultiChoicePerformance {
            correct: self.correct_count(),
            total: self.steps.len(),
            average_time_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, correct: usize) -> MultiChoiceQuestion {
        let answers = ["A", "B", "C", "D"].map(String::from).to_vec();
        MultiChoiceQuestion::new(id, format!("Question {id}"), answers, correct).unwrap()
    }

    #[test]
    fn first_question_is_current() {
        let session = MultiChoiceSession::new(vec![question(1, 0), question(2, 1)]).unwrap();
        assert_eq!(session.current_index, Some(0));
        assert!(session.steps[0].is_current());
        assert!(!session.steps[1].is_current());
        assert_eq!(
            MultiChoiceSession::new(Vec::new()),
            Err(MultiChoiceError::NoQuestions)
        );
    }

    #[test]
    fn answering_advances_and_records_time() {
        let mut session = MultiChoiceSession::new(vec![question(1, 2), question(2, 1)]).unwrap();

        session.select_answer(SelectedAnswer::Index(2)).unwrap();
        assert_eq!(
            session.verify(None, 4_000),
            MultiChoiceOutcome::Answered {
                index: 0,
                correct: true,
                next: Some(1)
            }
        );
        assert_eq!(session.selected, SelectedAnswer::None);

        // Timeout with nothing selected.
        let outcome = session.verify(Some(1), 30_000);
        assert_eq!(
            outcome,
            MultiChoiceOutcome::Answered {
                index: 1,
                correct: false,
                next: None
            }
        );
        assert!(session.is_finished());
        assert!(!session.all_correct());

        let performance = session.performance();
        assert_eq!(performance.correct, 1);
        assert_eq!(performance.total, 2);
        assert_eq!(performance.average_time_ms, 17_000);
    }

    #[test]
    fn stale_timer_is_ignored() {
        let mut session = MultiChoiceSession::new(vec![question(1, 0), question(2, 0)]).unwrap();
        session.verify(None, 1_000);

        // Countdown armed for question 0 fires late.
        assert!(session.verify(Some(0), 30_000).is_ignored());
        assert_eq!(session.current_index, Some(1));
        assert_eq!(session.completed_steps().count(), 1);
    }

    #[test]
    fn finished_session_ignores_input() {
        let mut session = MultiChoiceSession::new(vec![question(1, 0)]).unwrap();
        session.select_answer(SelectedAnswer::Index(0)).unwrap();
        session.verify(None, 500);
        assert!(session.all_correct());

        assert!(session.verify(None, 500).is_ignored());
        assert_eq!(
            session.select_answer(SelectedAnswer::Index(0)),
            Err(MultiChoiceError::NoCurrentQuestion)
        );
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let mut session = MultiChoiceSession::new(vec![question(1, 0)]).unwrap();
        assert_eq!(
            session.select_answer(SelectedAnswer::Index(4)),
            Err(MultiChoiceError::AnswerOutOfRange {
                index: 4,
                answers: 4
            })
        );
        assert_eq!(session.selected, SelectedAnswer::None);
    }
}
