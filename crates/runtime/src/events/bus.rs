//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{JobEvent, MazeEvent, RewardEvent, SessionEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Session lifecycle and transitions
    Session,
    /// XP awards and recorded results
    Reward,
    /// Maze unlock progress
    Maze,
    /// Background job failures
    Job,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Session, Topic::Reward, Topic::Maze, Topic::Job];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Session(SessionEvent),
    Reward(RewardEvent),
    Maze(MazeEvent),
    Job(JobEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Session(_) => Topic::Session,
            Event::Reward(_) => Topic::Reward,
            Event::Maze(_) => Topic::Maze,
            Event::Job(_) => Topic::Job,
        }
    }
}

struct Channels {
    session: broadcast::Sender<Event>,
    reward: broadcast::Sender<Event>,
    maze: broadcast::Sender<Event>,
    job: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Session => &self.session,
            Topic::Reward => &self.reward,
            Topic::Maze => &self.maze,
            Topic::Job => &self.job,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events sent while a
/// topic has no subscriber are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                session: broadcast::channel(capacity).0,
                reward: broadcast::channel(capacity).0,
                maze: broadcast::channel(capacity).0,
                job: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{GameKind, MazeEvent};
    use quiz_core::MazeItemId;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut maze = bus.subscribe(Topic::Maze);
        let mut session = bus.subscribe(Topic::Session);

        bus.publish(Event::Session(SessionEvent::Loading {
            kind: GameKind::Wordle,
            generation: 1,
        }));
        bus.publish(Event::Maze(MazeEvent::ItemPlayed {
            id: MazeItemId(1),
            newly_played: true,
        }));

        assert_eq!(maze.recv().await.unwrap().topic(), Topic::Maze);
        assert!(maze.try_recv().is_err());
        assert_eq!(session.recv().await.unwrap().topic(), Topic::Session);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::with_capacity(0);
        bus.publish(Event::Job(JobEvent::Skipped { job: "x".into() }));
        assert_eq!(bus.subscribe_multiple(&Topic::ALL).len(), 4);
    }
}
