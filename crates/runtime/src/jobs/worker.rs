//! Job worker that applies end-of-game side effects.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use quiz_core::{XpAward, XpConfig, XpError, award_xp};

use super::{Job, JobError, JobRequest, JobScheduler};
use crate::events::{Event, EventBus, JobEvent, MazeEvent, RewardEvent};
use crate::repository::{GameResultRepository, MazeRepository, ProfileRepository};

/// Background task that executes [`Job`]s one at a time.
pub struct JobWorker {
    rx: mpsc::Receiver<JobRequest>,
    results: Arc<dyn GameResultRepository>,
    profiles: Arc<dyn ProfileRepository>,
    maze: Arc<dyn MazeRepository>,
    event_bus: EventBus,
    xp_config: XpConfig,
}

impl JobWorker {
    /// Creates a worker and the scheduler feeding it.
    pub fn new(
        buffer: usize,
        results: Arc<dyn GameResultRepository>,
        profiles: Arc<dyn ProfileRepository>,
        maze: Arc<dyn MazeRepository>,
        event_bus: EventBus,
        xp_config: XpConfig,
    ) -> (Self, JobScheduler) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        let worker = Self {
            rx,
            results,
            profiles,
            maze,
            event_bus,
            xp_config,
        };
        (worker, JobScheduler::new(tx))
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        while let Some(request) = self.rx.recv().await {
            match request {
                JobRequest::Single(job) => {
                    self.run_job(&job);
                }
                JobRequest::Chain { first, then } => {
                    if self.run_job(&first) {
                        self.run_job(&then);
                    } else {
                        warn!(
                            target: "runtime::jobs",
                            first = first.name(),
                            skipped = then.name(),
                            "chained job skipped after failure"
                        );
                        self.event_bus.publish(Event::Job(JobEvent::Skipped {
                            job: then.name().to_string(),
                        }));
                    }
                }
                JobRequest::Flush(reply) => {
                    if reply.send(()).is_err() {
                        debug!(target: "runtime::jobs", "flush reply channel closed (caller dropped)");
                    }
                }
                JobRequest::Shutdown => break,
            }
        }
        debug!(target: "runtime::jobs", "job worker stopped");
    }

    /// Executes one job, reporting failures on the bus. Returns success.
    fn run_job(&self, job: &Job) -> bool {
        match self.execute(job) {
            Ok(()) => true,
            Err(err) => {
                error!(target: "runtime::jobs", job = job.name(), error = %err, "job failed");
                self.event_bus.publish(Event::Job(JobEvent::Failed {
                    job: job.name().to_string(),
                    error: err.to_string(),
                }));
                false
            }
        }
    }

    fn execute(&self, job: &Job) -> Result<(), JobError> {
        match job {
            Job::MarkMazeItemPlayed { id } => {
                let newly_played = self.maze.mark_played(*id)?;
                info!(target: "runtime::jobs", maze_item = %id, newly_played, "maze item played");
                self.event_bus.publish(Event::Maze(MazeEvent::ItemPlayed {
                    id: *id,
                    newly_played,
                }));
                Ok(())
            }
            Job::RecordResult { result, xp } => {
                // The profile only changes once the record is stored.
                let award = match xp {
                    Some(xp) => self.decide_award(*xp)?,
                    None => None,
                };
                let earned_xp = award.as_ref().map_or(0, |award| award.earned_xp);
                let result = result.clone().with_earned_xp(earned_xp);
                self.results.record(&result)?;
                info!(target: "runtime::jobs", earned_xp, "game result recorded");

                if let Some(award) = award {
                    self.apply_award(award)?;
                }
                self.event_bus
                    .publish(Event::Reward(RewardEvent::ResultRecorded(result)));
                Ok(())
            }
        }
    }

    /// Decides the XP award for the current profile.
    ///
    /// A missing profile is not a failure: the result is still recorded,
    /// unscored.
    fn decide_award(&self, delta: u64) -> Result<Option<XpAward>, JobError> {
        let profile = self.profiles.load()?;
        match award_xp(profile.as_ref(), delta, &self.xp_config) {
            Ok(award) => Ok(Some(award)),
            Err(err @ XpError::ProfileNotFound) => {
                warn!(target: "runtime::jobs", error = %err, "recording result without XP");
                self.event_bus.publish(Event::Reward(RewardEvent::Unscored {
                    reason: err.to_string(),
                }));
                Ok(None)
            }
        }
    }

    fn apply_award(&self, award: XpAward) -> Result<(), JobError> {
        self.profiles.apply_xp(award.earned_xp)?;
        if award.leveled_up {
            self.profiles.adjust_diamonds(award.diamonds_reward)?;
            info!(
                target: "runtime::jobs",
                level = award.new_level,
                diamonds = award.diamonds_reward,
                "level up"
            );
        }
        self.event_bus
            .publish(Event::Reward(RewardEvent::XpAwarded(award)));
        Ok(())
    }
}
