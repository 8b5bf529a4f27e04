//! High-level runtime orchestrator.
//!
//! The runtime owns the job worker, wires up repositories and the event bus,
//! and spawns one worker per started session. Clients drive sessions through
//! the returned handles.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use quiz_core::{
    GameConfig, MazeError, MazeItem, MazeItemId, MazePayload, MazeTrack, UserProfile,
};

use crate::api::{
    ContentSource, MultiChoiceHandle, Result, RuntimeError, SessionSettings, SettingsSource,
    WordleHandle,
};
use crate::events::{Event, EventBus, Topic};
use crate::jobs::{JobScheduler, JobWorker};
use crate::repository::{
    GameResult, GameResultRepository, InMemoryMazeRepo, InMemoryProfileRepo, InMemoryResultRepo,
    MazeRepository, ProfileRepository, RepositoryError,
};
use crate::session::{
    MultiChoiceRequest, MultiChoiceWorker, SessionContext, WordleRequest, WordleWorker,
};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    pub job_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            job_buffer_size: 64,
        }
    }
}

/// A started session, whichever quiz it plays.
#[derive(Clone)]
pub enum SessionHandle {
    Wordle(WordleHandle),
    MultiChoice(MultiChoiceHandle),
}

/// Main runtime that orchestrates quiz sessions.
///
/// Sessions are independent: each one is owned by its own worker task and
/// shares nothing mutable with the others. End-of-game side effects all go
/// through the single job worker.
pub struct Runtime {
    config: RuntimeConfig,
    settings: Arc<dyn SettingsSource>,
    ctx: SessionContext,

    results: Arc<dyn GameResultRepository>,
    profiles: Arc<dyn ProfileRepository>,
    maze: Arc<dyn MazeRepository>,

    job_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Starts a word-guess session.
    ///
    /// Settings are captured now and stay fixed for the session's lifetime.
    pub fn start_wordle(&self, request: WordleRequest) -> WordleHandle {
        debug!(target: "runtime::session", quiz_type = %request.quiz_type, "spawning wordle worker");
        let (tx, _task) = WordleWorker::spawn(
            request,
            self.settings.settings(),
            self.ctx.clone(),
            self.config.command_buffer_size,
        );
        WordleHandle::new(tx, self.ctx.event_bus.clone())
    }

    pub fn start_multi_choice(&self, request: MultiChoiceRequest) -> MultiChoiceHandle {
        debug!(target: "runtime::session", questions = request.questions.len(), "spawning multi-choice worker");
        let (tx, _task) = MultiChoiceWorker::spawn(
            request,
            self.settings.settings(),
            self.ctx.clone(),
            self.config.command_buffer_size,
        );
        MultiChoiceHandle::new(tx, self.ctx.event_bus.clone())
    }

    /// Starts the session for a maze item.
    ///
    /// Fails with [`RuntimeError::MazeItemLocked`] unless the item is the
    /// next one to play.
    pub fn start_maze_item(&self, id: MazeItemId) -> Result<SessionHandle> {
        let track = self.maze.load_track()?;
        let index = track
            .position(id)
            .ok_or(RepositoryError::Maze(MazeError::ItemNotFound(id)))?;
        if !track.is_playable(index) {
            return Err(RuntimeError::MazeItemLocked(id));
        }

        let handle = match track.items()[index].payload.clone() {
            MazePayload::Wordle { word, quiz_type } => SessionHandle::Wordle(
                self.start_wordle(WordleRequest::maze(id, word, quiz_type)),
            ),
            MazePayload::MultiChoice(question) => SessionHandle::MultiChoice(
                self.start_multi_choice(MultiChoiceRequest::maze(id, question)),
            ),
        };
        info!(target: "runtime::session", maze_item = %id, "maze item started");
        Ok(handle)
    }

    pub fn maze_track(&self) -> Result<MazeTrack> {
        Ok(self.maze.load_track()?)
    }

    /// Appends generated items to the maze track, returning their ids.
    pub fn append_maze_items(&self, items: Vec<MazeItem>) -> Result<Vec<MazeItemId>> {
        Ok(self.maze.append(items)?)
    }

    pub fn profile(&self) -> Result<Option<UserProfile>> {
        Ok(self.profiles.load()?)
    }

    pub fn results(&self) -> Result<Vec<GameResult>> {
        Ok(self.results.list()?)
    }

    pub fn jobs(&self) -> &JobScheduler {
        &self.ctx.jobs
    }

    /// Waits until every job enqueued so far has been applied.
    pub async fn flush_jobs(&self) -> Result<()> {
        self.ctx.jobs.flush().await
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.ctx.event_bus
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.ctx.event_bus.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Jobs already queued are applied before the job worker stops. Sessions
    /// should be closed first so their results are queued too.
    pub async fn shutdown(self) -> Result<()> {
        self.ctx.jobs.shutdown().await?;
        self.job_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;
        info!(target: "runtime::jobs", "runtime stopped");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    content: Option<Arc<dyn ContentSource>>,
    settings: Option<Arc<dyn SettingsSource>>,
    results: Option<Arc<dyn GameResultRepository>>,
    profiles: Option<Arc<dyn ProfileRepository>>,
    maze: Option<Arc<dyn MazeRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            content: None,
            settings: None,
            results: None,
            profiles: None,
            maze: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required content source
    pub fn content(mut self, content: impl ContentSource + 'static) -> Self {
        self.content = Some(Arc::new(content));
        self
    }

    pub fn content_arc(mut self, content: Arc<dyn ContentSource>) -> Self {
        self.content = Some(content);
        self
    }

    /// Defaults to [`SessionSettings::default`].
    pub fn settings(mut self, settings: impl SettingsSource + 'static) -> Self {
        self.settings = Some(Arc::new(settings));
        self
    }

    /// Defaults to an in-memory log.
    pub fn results(mut self, results: Arc<dyn GameResultRepository>) -> Self {
        self.results = Some(results);
        self
    }

    /// Defaults to an in-memory repository without a profile.
    pub fn profiles(mut self, profiles: Arc<dyn ProfileRepository>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Defaults to an empty in-memory track.
    pub fn maze(mut self, maze: Arc<dyn MazeRepository>) -> Self {
        self.maze = Some(maze);
        self
    }

    /// Build the runtime
    pub async fn build(self) -> Result<Runtime> {
        let content = self.content.ok_or(RuntimeError::MissingContentSource)?;
        let settings = self
            .settings
            .unwrap_or_else(|| Arc::new(SessionSettings::default()));
        let results = self
            .results
            .unwrap_or_else(|| Arc::new(InMemoryResultRepo::new()));
        let profiles = self
            .profiles
            .unwrap_or_else(|| Arc::new(InMemoryProfileRepo::empty()));
        let maze = self
            .maze
            .unwrap_or_else(|| Arc::new(InMemoryMazeRepo::new(MazeTrack::new())));

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let (job_worker, jobs) = JobWorker::new(
            self.config.job_buffer_size,
            Arc::clone(&results),
            Arc::clone(&profiles),
            Arc::clone(&maze),
            event_bus.clone(),
            self.config.game_config.xp.clone(),
        );
        let job_worker_handle = tokio::spawn(async move {
            job_worker.run().await;
        });

        let ctx = SessionContext {
            content,
            jobs,
            event_bus,
            game_config: self.config.game_config.clone(),
        };

        Ok(Runtime {
            config: self.config,
            settings,
            ctx,
            results,
            profiles,
            maze,
            job_worker_handle,
        })
    }
}
