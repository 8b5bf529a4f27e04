//! Cloneable façades for driving session workers.
//!
//! A handle hides the channel plumbing of one session. Every clone talks to
//! the same worker; once the last clone is dropped the worker closes the
//! session as if [`WordleHandle::close`] had been called.
use tokio::sync::{broadcast, mpsc, oneshot};

use quiz_core::{MultiChoiceOutcome, SelectedAnswer, WordleInput, WordleOutcome};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::session::{MultiChoiceCommand, MultiChoiceSnapshot, WordleCommand, WordleSnapshot};

/// Client-facing handle to a word-guess session.
#[derive(Clone)]
pub struct WordleHandle {
    command_tx: mpsc::Sender<WordleCommand>,
    event_bus: EventBus,
}

impl WordleHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<WordleCommand>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Applies one input and returns what it changed.
    ///
    /// Rejected inputs come back as [`RuntimeError::Wordle`]; the session is
    /// left unchanged apart from its error status.
    pub async fn send(&self, input: WordleInput) -> Result<WordleOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(WordleCommand::Input {
                input,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    pub async fn enter_key(&self, key: char) -> Result<WordleOutcome> {
        self.send(WordleInput::Key(key)).await
    }

    pub async fn remove_key(&self, index: usize) -> Result<WordleOutcome> {
        self.send(WordleInput::RemoveKey(index)).await
    }

    /// Types every character of `word` into the current row.
    pub async fn enter_word(&self, word: &str) -> Result<()> {
        for key in word.chars() {
            self.enter_key(key).await?;
        }
        Ok(())
    }

    /// Submits the current row.
    pub async fn verify(&self) -> Result<WordleOutcome> {
        self.send(WordleInput::Verify { row: None }).await
    }

    /// Grants extra rows after a lost game.
    pub async fn grant_reward_rows(&self, extra: usize) -> Result<WordleOutcome> {
        self.send(WordleInput::GrantRows(extra)).await
    }

    /// Hands off the current game and starts a new one with a fetched word.
    pub async fn play_again(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(WordleCommand::PlayAgain { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Query the current session (read-only snapshot)
    pub async fn snapshot(&self) -> Result<WordleSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(WordleCommand::Query { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Closes the session and hands its result to the job queue.
    ///
    /// Other clones of this handle fail with
    /// [`RuntimeError::CommandChannelClosed`] afterwards.
    pub async fn close(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(WordleCommand::Close { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}

/// Client-facing handle to a multiple-choice session.
#[derive(Clone)]
pub struct MultiChoiceHandle {
    command_tx: mpsc::Sender<MultiChoiceCommand>,
    event_bus: EventBus,
}

impl MultiChoiceHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<MultiChoiceCommand>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    pub async fn select_answer(&self, answer: SelectedAnswer) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(MultiChoiceCommand::Select {
                answer,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Completes the current question with the selected answer.
    pub async fn verify(&self) -> Result<MultiChoiceOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(MultiChoiceCommand::Verify { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Selects `index` and verifies in one go.
    pub async fn answer(&self, index: usize) -> Result<MultiChoiceOutcome> {
        self.select_answer(SelectedAnswer::Index(index)).await?;
        self.verify().await
    }

    pub async fn snapshot(&self) -> Result<MultiChoiceSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(MultiChoiceCommand::Query { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Starts a new quiz, abandoning the current one if it is unfinished.
    ///
    /// Retries the question fetch after a failed load.
    pub async fn play_again(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(MultiChoiceCommand::PlayAgain { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Closes the session. An unfinished quiz is not recorded.
    pub async fn close(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(MultiChoiceCommand::Close { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }
}
