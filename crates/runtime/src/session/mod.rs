//! Session workers.
//!
//! Each active session is owned by one tokio task that drains a command
//! channel and applies commands strictly one at a time. Timer expiries and
//! content fetches run in helper tasks that post their completion back into
//! the same channel, tagged so the worker can drop stale ones.

mod multi_choice;
mod timer;
mod wordle;

pub use multi_choice::{MultiChoiceRequest, MultiChoiceSnapshot};
pub use wordle::{WordleRequest, WordleSnapshot};

pub(crate) use multi_choice::{MultiChoiceCommand, MultiChoiceWorker};
pub(crate) use wordle::{WordleCommand, WordleWorker};

use std::sync::Arc;

use quiz_core::GameConfig;

use crate::api::ContentSource;
use crate::events::EventBus;
use crate::jobs::JobScheduler;

/// Collaborators shared by every session worker.
#[derive(Clone)]
pub(crate) struct SessionContext {
    pub content: Arc<dyn ContentSource>,
    pub jobs: JobScheduler,
    pub event_bus: EventBus,
    pub game_config: GameConfig,
}
