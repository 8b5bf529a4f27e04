//! Session orchestration for the quiz rules in `quiz-core`.
//!
//! This crate wires together content sources, settings, repositories, the
//! job queue and per-session worker tasks into a cohesive runtime API.
//! Consumers embed [`Runtime`] to start sessions, drive them through
//! [`WordleHandle`] / [`MultiChoiceHandle`], and subscribe to events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`jobs`] applies end-of-game side effects in FIFO order
//! - [`repository`] provides the persistence, reward and maze sinks
//! - `session` keeps the per-session workers internal to the crate
pub mod api;
pub mod events;
pub mod jobs;
pub mod repository;
pub mod runtime;

mod session;

pub use api::{
    ContentError, ContentSource, MultiChoiceHandle, Result, RuntimeError, SessionSettings,
    SettingsSource, StaticContentSource, WordleHandle,
};
pub use events::{
    Event, EventBus, GameKind, JobEvent, MazeEvent, RewardEvent, SessionEnd, SessionEvent, Topic,
};
pub use jobs::{Job, JobError, JobScheduler};
pub use repository::{
    FileResultLog, GameResult, GameResultRepository, InMemoryMazeRepo, InMemoryProfileRepo,
    InMemoryResultRepo, MazeRepository, MultiChoiceResult, ProfileRepository, RepositoryError,
    WordleResult,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, SessionHandle};
pub use session::{MultiChoiceRequest, MultiChoiceSnapshot, WordleRequest, WordleSnapshot};
