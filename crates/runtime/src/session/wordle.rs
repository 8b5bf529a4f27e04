//! Word-guess session worker.
//!
//! Owns one [`WordleSession`] and applies inputs through
//! [`WordleEngine`]. The result is handed to the job queue when the session
//! is closed (explicitly, by play-again, or when every handle is dropped), so
//! rows granted after a loss still count towards it. Play-again on a maze
//! item restarts the item's own word.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use quiz_core::wordle::letter_hints;
use quiz_core::{
    GameError, MazeItemId, TargetWord, WordleEngine, WordleInput, WordleOutcome,
    WordlePerformance, WordleQuizType, WordleSession, XpGenerator,
};

use super::SessionContext;
use super::timer::Countdown;
use crate::api::{ContentError, Result, RuntimeError, SessionSettings};
use crate::events::{Event, GameKind, SessionEnd, SessionEvent};
use crate::jobs::Job;
use crate::repository::{GameResult, WordleResult};

/// What to play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordleRequest {
    pub quiz_type: WordleQuizType,
    /// A word restored from saved state or supplied by a maze item. When set
    /// the first game starts from it and no content fetch runs.
    pub word: Option<String>,
    pub day: Option<String>,
    pub maze_item_id: Option<MazeItemId>,
    /// Overrides the row limit from settings.
    pub row_limit: Option<usize>,
    pub generate_xp: bool,
}

impl WordleRequest {
    /// A fresh game with a word from the content source.
    pub fn random(quiz_type: WordleQuizType) -> Self {
        Self {
            quiz_type,
            word: None,
            day: None,
            maze_item_id: None,
            row_limit: None,
            generate_xp: true,
        }
    }

    /// A game resumed with a known word.
    pub fn restored(word: impl Into<String>, quiz_type: WordleQuizType) -> Self {
        Self {
            word: Some(word.into()),
            ..Self::random(quiz_type)
        }
    }

    /// A game bound to a maze item.
    pub fn maze(id: MazeItemId, word: impl Into<String>, quiz_type: WordleQuizType) -> Self {
        Self {
            maze_item_id: Some(id),
            ..Self::restored(word, quiz_type)
        }
    }

    #[must_use]
    pub fn with_day(mut self, day: impl Into<String>) -> Self {
        self.day = Some(day.into());
        self
    }

    #[must_use]
    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = Some(row_limit);
        self
    }

    /// Records the result without awarding XP.
    #[must_use]
    pub fn without_xp(mut self) -> Self {
        self.generate_xp = false;
        self
    }
}

/// Read-only view for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordleSnapshot {
    /// `None` while the word is loading or after a failed fetch.
    pub session: Option<WordleSession>,
    pub loading: bool,
    pub error: Option<String>,
    pub error_code: Option<String>,
    pub generation: u64,
    pub color_blind: bool,
    /// Letter-count hints for each verified row, empty when disabled.
    pub letter_hints: Vec<Vec<Option<usize>>>,
    pub remaining_ms: Option<u64>,
}

pub(crate) enum WordleCommand {
    Input {
        input: WordleInput,
        reply: oneshot::Sender<Result<WordleOutcome>>,
    },
    PlayAgain {
        reply: oneshot::Sender<Result<()>>,
    },
    Query {
        reply: oneshot::Sender<WordleSnapshot>,
    },
    Close {
        reply: oneshot::Sender<Result<()>>,
    },
    CountdownExpired {
        row: usize,
        generation: u64,
    },
    WordFetched {
        generation: u64,
        result: std::result::Result<String, ContentError>,
    },
}

pub(crate) struct WordleWorker {
    request: WordleRequest,
    settings: SessionSettings,
    ctx: SessionContext,
    command_rx: mpsc::Receiver<WordleCommand>,
    command_tx: mpsc::WeakSender<WordleCommand>,
    session: Option<WordleSession>,
    loading: bool,
    fetch_error: Option<String>,
    /// Bumped for every new game; tags fetches and countdowns.
    generation: u64,
    countdown: Option<Countdown>,
    handed_off: bool,
}

impl WordleWorker {
    pub(crate) fn spawn(
        request: WordleRequest,
        settings: SessionSettings,
        ctx: SessionContext,
        buffer: usize,
    ) -> (mpsc::Sender<WordleCommand>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let worker = Self {
            request,
            settings,
            ctx,
            command_rx: rx,
            command_tx: tx.downgrade(),
            session: None,
            loading: false,
            fetch_error: None,
            generation: 0,
            countdown: None,
            handed_off: false,
        };
        (tx, tokio::spawn(worker.run()))
    }

    async fn run(mut self) {
        self.start_game();

        while let Some(command) = self.command_rx.recv().await {
            if !self.handle_command(command).await {
                break;
            }
        }

        if let Err(err) = self.hand_off().await {
            error!(target: "runtime::session", error = %err, "failed to hand off wordle result");
        }
        debug!(target: "runtime::session", "wordle worker stopped");
    }

    /// Returns `false` once the worker should stop.
    async fn handle_command(&mut self, command: WordleCommand) -> bool {
        match command {
            WordleCommand::Input { input, reply } => {
                let result = self.apply(input);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::session", "Input reply channel closed (caller dropped)");
                }
            }
            WordleCommand::PlayAgain { reply } => {
                let result = self.hand_off().await;
                self.restart();
                if reply.send(result).is_err() {
                    debug!(target: "runtime::session", "PlayAgain reply channel closed (caller dropped)");
                }
            }
            WordleCommand::Query { reply } => {
                if reply.send(self.snapshot()).is_err() {
                    debug!(target: "runtime::session", "Query reply channel closed (caller dropped)");
                }
            }
            WordleCommand::Close { reply } => {
                let result = self.hand_off().await;
                if reply.send(result).is_err() {
                    debug!(target: "runtime::session", "Close reply channel closed (caller dropped)");
                }
                return false;
            }
            WordleCommand::CountdownExpired { row, generation } => {
                self.on_countdown(row, generation);
            }
            WordleCommand::WordFetched { generation, result } => {
                self.on_word_fetched(generation, result);
            }
        }
        true
    }

    fn start_game(&mut self) {
        // A maze item always replays its own word; a restored word is used once.
        let word = if self.request.maze_item_id.is_some() {
            self.request.word.clone()
        } else {
            self.request.word.take()
        };
        match word {
            Some(word) => {
                debug!(target: "runtime::session", "starting from supplied word, fetch skipped");
                self.generation += 1;
                self.begin(word);
            }
            None => self.fetch_word(),
        }
    }

    fn restart(&mut self) {
        if self.request.maze_item_id.is_some() {
            self.start_game();
        } else {
            self.fetch_word();
        }
    }

    fn fetch_word(&mut self) {
        self.generation += 1;
        self.loading = true;
        self.session = None;
        self.fetch_error = None;
        self.countdown = None;
        self.publish(SessionEvent::Loading {
            kind: GameKind::Wordle,
            generation: self.generation,
        });

        let generation = self.generation;
        let content = Arc::clone(&self.ctx.content);
        let quiz_type = self.request.quiz_type;
        let day = self.request.day.clone();
        let tx = self.command_tx.clone();
        tokio::spawn(async move {
            let result = content.fetch_target_word(quiz_type, day.as_deref()).await;
            if let Some(tx) = tx.upgrade() {
                // The worker may have stopped meanwhile; nothing to deliver then.
                let _ = tx.send(WordleCommand::WordFetched { generation, result }).await;
            }
        });
    }

    fn on_word_fetched(
        &mut self,
        generation: u64,
        result: std::result::Result<String, ContentError>,
    ) {
        if generation != self.generation || !self.loading {
            debug!(target: "runtime::session", generation, "stale word fetch ignored");
            return;
        }
        match result {
            Ok(word) => self.begin(word),
            Err(err) => self.fail_fetch(err.to_string()),
        }
    }

    fn begin(&mut self, word: String) {
        self.loading = false;
        let row_limit = self
            .ctx
            .game_config
            .row_limit(self.request.row_limit.or(self.settings.row_limit));

        let session = TargetWord::parse(&word)
            .and_then(|target| WordleSession::new(target, self.request.quiz_type, row_limit));
        let mut session = match session {
            Ok(session) => session.with_hard_mode(self.settings.hard_mode),
            Err(err) => {
                self.fail_fetch(err.to_string());
                return;
            }
        };
        if let Some(day) = &self.request.day {
            session = session.with_day(day.clone());
        }
        if let Some(id) = self.request.maze_item_id {
            session = session.with_maze_item(id);
        }

        info!(
            target: "runtime::session",
            quiz_type = %session.quiz_type,
            word_length = session.word.len(),
            row_limit,
            hard_mode = session.hard_mode,
            maze_item = ?session.maze_item_id,
            "wordle session started"
        );
        self.publish(SessionEvent::Started {
            kind: GameKind::Wordle,
            size: session.word.len(),
            maze_item_id: session.maze_item_id,
        });

        self.session = Some(session);
        self.fetch_error = None;
        self.handed_off = false;
        self.arm_countdown();
    }

    fn fail_fetch(&mut self, message: String) {
        warn!(target: "runtime::session", error = %message, "word could not be loaded");
        self.loading = false;
        self.session = None;
        self.fetch_error = Some(message.clone());
        self.publish(SessionEvent::FetchFailed {
            kind: GameKind::Wordle,
            message,
        });
    }

    fn apply(&mut self, input: WordleInput) -> Result<WordleOutcome> {
        let Some(session) = self.session.as_mut() else {
            return Err(RuntimeError::SessionNotReady);
        };

        let result = WordleEngine::new(session).execute(input);
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(
                    target: "runtime::session",
                    code = err.error_code(),
                    error = %err,
                    "wordle input rejected"
                );
                self.publish(SessionEvent::Rejected {
                    kind: GameKind::Wordle,
                    code: err.error_code().to_string(),
                    message: err.to_string(),
                });
                return Err(err.into());
            }
        };

        match &outcome {
            WordleOutcome::RowVerified {
                row,
                verdict,
                status,
            } => {
                self.publish(SessionEvent::RowVerified {
                    row: *row,
                    verdict: verdict.clone(),
                    status: *status,
                });
                if status.is_finished() {
                    self.countdown = None;
                    info!(
                        target: "runtime::session",
                        status = ?status,
                        rows_used = row + 1,
                        "wordle session finished"
                    );
                    self.publish(SessionEvent::Ended {
                        kind: GameKind::Wordle,
                        end: SessionEnd::from_status(*status),
                    });
                } else {
                    self.arm_countdown();
                }
            }
            WordleOutcome::RowsGranted { row_limit } => {
                info!(target: "runtime::session", row_limit, "reward rows granted");
                self.publish(SessionEvent::RowsGranted {
                    row_limit: *row_limit,
                });
                self.arm_countdown();
            }
            _ => {}
        }
        Ok(outcome)
    }

    fn on_countdown(&mut self, row: usize, generation: u64) {
        if generation != self.generation {
            debug!(target: "runtime::session", row, generation, "countdown from a previous game ignored");
            return;
        }

        match self.apply(WordleInput::Verify { row: Some(row) }) {
            Ok(WordleOutcome::Ignored) => {
                debug!(target: "runtime::session", row, "countdown for an already verified row ignored");
            }
            Ok(_) | Err(RuntimeError::SessionNotReady) => {}
            Err(_) => {
                // Rejected row: the player gets another window on it.
                self.arm_countdown();
            }
        }
    }

    /// (Re)starts the per-row countdown for the current row, if enabled.
    fn arm_countdown(&mut self) {
        self.countdown = None;
        let (Some(ms), Some(session)) = (self.settings.word_countdown_ms, &self.session) else {
            return;
        };
        if session.is_finished() {
            return;
        }

        let command = WordleCommand::CountdownExpired {
            row: session.current_row,
            generation: self.generation,
        };
        self.countdown = Some(Countdown::start(
            Duration::from_millis(ms),
            self.command_tx.clone(),
            command,
        ));
    }

    /// Enqueues the end-of-game jobs for the current game, once.
    async fn hand_off(&mut self) -> Result<()> {
        self.countdown = None;
        if self.handed_off {
            return Ok(());
        }
        let Some(session) = self.session.as_ref() else {
            return Ok(());
        };
        self.handed_off = true;

        if !session.is_finished() {
            self.ctx.event_bus.publish(Event::Session(SessionEvent::Ended {
                kind: GameKind::Wordle,
                end: SessionEnd::Abandoned,
            }));
        }

        let performance = WordlePerformance {
            solved: session.is_won(),
            rows_used: session.rows_used(),
            row_limit: session.row_limit,
        };
        let xp = self
            .request
            .generate_xp
            .then(|| self.ctx.game_config.xp.wordle.generate_xp(&performance));
        let result = GameResult::Wordle(WordleResult {
            word: session.word.to_string(),
            quiz_type: session.quiz_type,
            word_length: session.word.len(),
            rows_used: performance.rows_used,
            max_rows: performance.row_limit,
            solved: performance.solved,
            earned_xp: 0,
            day: session.day.clone(),
            maze_item_id: session.maze_item_id,
            played_at: Utc::now(),
        });
        let record = Job::RecordResult { result, xp };

        match session.maze_item_id {
            // Unlocking must be visible before the result is.
            Some(id) if performance.solved => {
                self.ctx
                    .jobs
                    .enqueue_after(Job::MarkMazeItemPlayed { id }, record)
                    .await
            }
            _ => self.ctx.jobs.enqueue(record).await,
        }
    }

    fn snapshot(&self) -> WordleSnapshot {
        let session_error = self.session.as_ref().and_then(|s| s.error.as_ref());

        let hints = match &self.session {
            Some(session) if self.settings.letter_hints => session.rows[..session.current_row]
                .iter()
                .map(|row| letter_hints(row, &session.word))
                .collect(),
            _ => Vec::new(),
        };

        WordleSnapshot {
            session: self.session.clone(),
            loading: self.loading,
            error: session_error
                .map(ToString::to_string)
                .or_else(|| self.fetch_error.clone()),
            error_code: session_error
                .map(|err| err.error_code().to_string())
                .or_else(|| self.fetch_error.as_ref().map(|_| "CONTENT_UNAVAILABLE".to_string())),
            generation: self.generation,
            color_blind: self.settings.color_blind,
            letter_hints: hints,
            remaining_ms: self
                .countdown
                .as_ref()
                .map(|countdown| countdown.remaining().as_millis() as u64),
        }
    }

    fn publish(&self, event: SessionEvent) {
        self.ctx.event_bus.publish(Event::Session(event));
    }
}
