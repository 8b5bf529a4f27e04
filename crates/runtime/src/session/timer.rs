//! Cancellable countdown feeding a session worker.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A pending timer command.
///
/// The command is posted into the worker's own channel when the countdown
/// expires. Dropping the guard aborts the timer task, so a countdown is
/// cancelled exactly once however the session moves on. A command that was
/// already queued before cancellation carries a tag the worker checks.
pub(crate) struct Countdown {
    task: JoinHandle<()>,
    deadline: Instant,
}

impl Countdown {
    pub(crate) fn start<C>(duration: Duration, tx: mpsc::WeakSender<C>, command: C) -> Self
    where
        C: Send + 'static,
    {
        let deadline = Instant::now() + duration;
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(tx) = tx.upgrade() {
                // The worker may have stopped meanwhile; nothing to notify then.
                let _ = tx.send(command).await;
            }
        });
        Self { task, deadline }
    }

    pub(crate) fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.task.abort();
    }
}
