//! Multiple-choice session worker.
//!
//! Each question runs under a countdown. The game ends as soon as the last
//! question is answered and the result is dispatched right away. Play-again
//! abandons an unfinished game and starts a new one; a maze item replays its
//! own question.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use quiz_core::{
    GameError, MazeItemId, MultiChoiceError, MultiChoiceOutcome, MultiChoiceQuestion,
    MultiChoiceSession, QuestionDifficulty, SelectedAnswer, XpGenerator,
};

use super::SessionContext;
use super::timer::Countdown;
use crate::api::{ContentError, Result, RuntimeError, SessionSettings};
use crate::events::{Event, GameKind, SessionEnd, SessionEvent};
use crate::jobs::Job;
use crate::repository::{GameResult, MultiChoiceResult};

/// What to play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiChoiceRequest {
    /// Questions supplied up front (a maze item, a restored quiz). When empty
    /// the questions are fetched from the content source.
    pub questions: Vec<MultiChoiceQuestion>,
    pub category: Option<u32>,
    pub difficulty: Option<QuestionDifficulty>,
    pub maze_item_id: Option<MazeItemId>,
    pub generate_xp: bool,
}

impl MultiChoiceRequest {
    pub fn random() -> Self {
        Self {
            questions: Vec::new(),
            category: None,
            difficulty: None,
            maze_item_id: None,
            generate_xp: true,
        }
    }

    pub fn with_questions(questions: Vec<MultiChoiceQuestion>) -> Self {
        Self {
            questions,
            ..Self::random()
        }
    }

    pub fn maze(id: MazeItemId, question: MultiChoiceQuestion) -> Self {
        Self {
            maze_item_id: Some(id),
            ..Self::with_questions(vec![question])
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: u32) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: QuestionDifficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn without_xp(mut self) -> Self {
        self.generate_xp = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiChoiceSnapshot {
    pub session: Option<MultiChoiceSession>,
    pub loading: bool,
    pub error: Option<String>,
    pub remaining_ms: Option<u64>,
    pub generation: u64,
}

pub(crate) enum MultiChoiceCommand {
    Select {
        answer: SelectedAnswer,
        reply: oneshot::Sender<Result<()>>,
    },
    Verify {
        reply: oneshot::Sender<Result<MultiChoiceOutcome>>,
    },
    Query {
        reply: oneshot::Sender<MultiChoiceSnapshot>,
    },
    PlayAgain {
        reply: oneshot::Sender<Result<()>>,
    },
    Close {
        reply: oneshot::Sender<Result<()>>,
    },
    CountdownExpired {
        question: usize,
        generation: u64,
    },
    QuestionsFetched {
        generation: u64,
        result: std::result::Result<Vec<MultiChoiceQuestion>, ContentError>,
    },
}

pub(crate) struct MultiChoiceWorker {
    request: MultiChoiceRequest,
    settings: SessionSettings,
    ctx: SessionContext,
    command_rx: mpsc::Receiver<MultiChoiceCommand>,
    command_tx: mpsc::WeakSender<MultiChoiceCommand>,
    session: Option<MultiChoiceSession>,
    loading: bool,
    error: Option<String>,
    generation: u64,
    countdown: Option<Countdown>,
    question_started: Option<Instant>,
    ended: bool,
}

impl MultiChoiceWorker {
    pub(crate) fn spawn(
        request: MultiChoiceRequest,
        settings: SessionSettings,
        ctx: SessionContext,
        buffer: usize,
    ) -> (mpsc::Sender<MultiChoiceCommand>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let worker = Self {
            request,
            settings,
            ctx,
            command_rx: rx,
            command_tx: tx.downgrade(),
            session: None,
            loading: false,
            error: None,
            generation: 0,
            countdown: None,
            question_started: None,
            ended: false,
        };
        (tx, tokio::spawn(worker.run()))
    }

    async fn run(mut self) {
        self.start_game();

        while let Some(command) = self.command_rx.recv().await {
            match command {
                MultiChoiceCommand::Select { answer, reply } => {
                    let result = self.select(answer);
                    if reply.send(result).is_err() {
                        debug!(target: "runtime::session", "Select reply channel closed (caller dropped)");
                    }
                }
                MultiChoiceCommand::Verify { reply } => {
                    let result = self.verify(None).await;
                    if reply.send(result).is_err() {
                        debug!(target: "runtime::session", "Verify reply channel closed (caller dropped)");
                    }
                }
                MultiChoiceCommand::Query { reply } => {
                    if reply.send(self.snapshot()).is_err() {
                        debug!(target: "runtime::session", "Query reply channel closed (caller dropped)");
                    }
                }
                MultiChoiceCommand::PlayAgain { reply } => {
                    self.abandon();
                    self.start_game();
                    if reply.send(Ok(())).is_err() {
                        debug!(target: "runtime::session", "PlayAgain reply channel closed (caller dropped)");
                    }
                }
                MultiChoiceCommand::Close { reply } => {
                    self.abandon();
                    if reply.send(Ok(())).is_err() {
                        debug!(target: "runtime::session", "Close reply channel closed (caller dropped)");
                    }
                    break;
                }
                MultiChoiceCommand::CountdownExpired {
                    question,
                    generation,
                } => {
                    if generation != self.generation {
                        debug!(target: "runtime::session", question, "stale question countdown ignored");
                        continue;
                    }
                    if let Err(err) = self.verify(Some(question)).await {
                        error!(target: "runtime::session", error = %err, "timed-out answer failed");
                    }
                }
                MultiChoiceCommand::QuestionsFetched { generation, result } => {
                    if generation != self.generation || !self.loading {
                        debug!(target: "runtime::session", generation, "stale question fetch ignored");
                        continue;
                    }
                    match result {
                        Ok(questions) => self.begin(questions),
                        Err(err) => self.fail(err.to_string()),
                    }
                }
            }
        }

        self.abandon();
        debug!(target: "runtime::session", "multi-choice worker stopped");
    }

    fn start_game(&mut self) {
        self.generation += 1;
        self.session = None;
        self.error = None;
        self.ended = false;
        self.arm_countdown(None);

        // Supplied questions are used once, except for a maze item.
        let questions = if self.request.maze_item_id.is_some() {
            self.request.questions.clone()
        } else {
            std::mem::take(&mut self.request.questions)
        };
        if questions.is_empty() {
            self.fetch_questions();
        } else {
            self.begin(questions);
        }
    }

    fn fetch_questions(&mut self) {
        self.loading = true;
        self.ctx.event_bus.publish(Event::Session(SessionEvent::Loading {
            kind: GameKind::MultiChoice,
            generation: self.generation,
        }));

        let generation = self.generation;
        let content = Arc::clone(&self.ctx.content);
        let amount = self.settings.question_count;
        let category = self.request.category;
        let difficulty = self.request.difficulty;
        let tx = self.command_tx.clone();
        tokio::spawn(async move {
            let result = content
                .fetch_random_questions(amount, category, difficulty)
                .await;
            if let Some(tx) = tx.upgrade() {
                // The worker may have stopped meanwhile; nothing to deliver then.
                let _ = tx
                    .send(MultiChoiceCommand::QuestionsFetched { generation, result })
                    .await;
            }
        });
    }

    fn begin(&mut self, questions: Vec<MultiChoiceQuestion>) {
        self.loading = false;
        let session = match MultiChoiceSession::new(questions) {
            Ok(session) => session,
            Err(err) => {
                self.fail(err.to_string());
                return;
            }
        };
        let session = match self.request.maze_item_id {
            Some(id) => session.with_maze_item(id),
            None => session,
        };

        info!(
            target: "runtime::session",
            questions = session.steps.len(),
            maze_item = ?session.maze_item_id,
            "multi-choice session started"
        );
        self.ctx.event_bus.publish(Event::Session(SessionEvent::Started {
            kind: GameKind::MultiChoice,
            size: session.steps.len(),
            maze_item_id: session.maze_item_id,
        }));

        let first = session.current_index;
        self.session = Some(session);
        self.error = None;
        self.arm_countdown(first);
    }

    fn fail(&mut self, message: String) {
        warn!(target: "runtime::session", error = %message, "questions could not be loaded");
        self.loading = false;
        self.error = Some(message.clone());
        self.ctx
            .event_bus
            .publish(Event::Session(SessionEvent::FetchFailed {
                kind: GameKind::MultiChoice,
                message,
            }));
    }

    fn select(&mut self, answer: SelectedAnswer) -> Result<()> {
        let session = self.session.as_mut().ok_or(RuntimeError::SessionNotReady)?;
        if let Err(err) = session.select_answer(answer) {
            self.reject(&err);
            self.error = Some(err.to_string());
            return Err(err.into());
        }
        Ok(())
    }

    /// Completes the current question.
    ///
    /// `question` is set when the countdown armed for that question expired;
    /// the full countdown is then charged as the answer time.
    async fn verify(&mut self, question: Option<usize>) -> Result<MultiChoiceOutcome> {
        let countdown_ms = self.settings.question_countdown_ms;
        let question_time_ms = match question {
            Some(_) => countdown_ms,
            None => self
                .question_started
                .map(|started| (started.elapsed().as_millis() as u64).min(countdown_ms))
                .unwrap_or(0),
        };

        let session = self.session.as_mut().ok_or(RuntimeError::SessionNotReady)?;
        let outcome = session.verify(question, question_time_ms);
        let MultiChoiceOutcome::Answered {
            index,
            correct,
            next,
        } = outcome
        else {
            debug!(target: "runtime::session", ?question, "verify for a non-current question ignored");
            return Ok(outcome);
        };

        self.error = None;
        debug!(target: "runtime::session", index, correct, question_time_ms, "question answered");
        self.ctx
            .event_bus
            .publish(Event::Session(SessionEvent::QuestionAnswered {
                index,
                correct,
                question_time_ms,
            }));

        match next {
            Some(_) => self.arm_countdown(next),
            None => self.finish().await?,
        }
        Ok(outcome)
    }

    fn arm_countdown(&mut self, question: Option<usize>) {
        self.countdown = None;
        self.question_started = None;
        let Some(question) = question else {
            return;
        };

        self.question_started = Some(Instant::now());
        let command = MultiChoiceCommand::CountdownExpired {
            question,
            generation: self.generation,
        };
        self.countdown = Some(Countdown::start(
            Duration::from_millis(self.settings.question_countdown_ms),
            self.command_tx.clone(),
            command,
        ));
    }

    /// Ends the game and dispatches its result.
    async fn finish(&mut self) -> Result<()> {
        self.countdown = None;
        self.question_started = None;
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        if self.ended {
            return Ok(());
        }
        self.ended = true;

        let performance = session.performance();
        let all_correct = session.all_correct();
        info!(
            target: "runtime::session",
            correct = performance.correct,
            total = performance.total,
            average_time_ms = performance.average_time_ms,
            "multi-choice session finished"
        );
        self.ctx.event_bus.publish(Event::Session(SessionEvent::Ended {
            kind: GameKind::MultiChoice,
            end: if all_correct {
                SessionEnd::Won
            } else {
                SessionEnd::Lost
            },
        }));

        let xp = self
            .request
            .generate_xp
            .then(|| self.ctx.game_config.xp.multi_choice.generate_xp(&performance));
        let result = GameResult::MultiChoice(MultiChoiceResult {
            correct_answers: performance.correct,
            question_count: performance.total,
            average_answer_time_ms: performance.average_time_ms,
            earned_xp: 0,
            category: self.request.category,
            maze_item_id: session.maze_item_id,
            played_at: Utc::now(),
        });
        let record = Job::RecordResult { result, xp };

        match session.maze_item_id {
            Some(id) if all_correct => {
                self.ctx
                    .jobs
                    .enqueue_after(Job::MarkMazeItemPlayed { id }, record)
                    .await
            }
            _ => self.ctx.jobs.enqueue(record).await,
        }
    }

    /// Closing an unfinished quiz records nothing.
    fn abandon(&mut self) {
        self.countdown = None;
        if self.ended || self.session.is_none() {
            return;
        }
        self.ended = true;
        info!(target: "runtime::session", "multi-choice session abandoned");
        self.ctx.event_bus.publish(Event::Session(SessionEvent::Ended {
            kind: GameKind::MultiChoice,
            end: SessionEnd::Abandoned,
        }));
    }

    fn reject(&self, err: &MultiChoiceError) {
        self.ctx
            .event_bus
            .publish(Event::Session(SessionEvent::Rejected {
                kind: GameKind::MultiChoice,
                code: err.error_code().to_string(),
                message: err.to_string(),
            }));
    }

    fn snapshot(&self) -> MultiChoiceSnapshot {
        MultiChoiceSnapshot {
            session: self.session.clone(),
            loading: self.loading,
            error: self.error.clone(),
            remaining_ms: self
                .countdown
                .as_ref()
                .map(|countdown| countdown.remaining().as_millis() as u64),
            generation: self.generation,
        }
    }
}
