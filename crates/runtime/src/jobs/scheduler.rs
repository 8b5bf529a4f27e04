use tokio::sync::{mpsc, oneshot};

use super::{Job, JobRequest};
use crate::api::{Result, RuntimeError};

/// Cloneable handle for enqueuing jobs.
#[derive(Clone)]
pub struct JobScheduler {
    tx: mpsc::Sender<JobRequest>,
}

impl JobScheduler {
    pub(crate) fn new(tx: mpsc::Sender<JobRequest>) -> Self {
        Self { tx }
    }

    pub async fn enqueue(&self, job: Job) -> Result<()> {
        self.send(JobRequest::Single(job)).await
    }

    /// Enqueues `then` to run after `first` completes successfully.
    pub async fn enqueue_after(&self, first: Job, then: Job) -> Result<()> {
        self.send(JobRequest::Chain { first, then }).await
    }

    /// Waits until every job enqueued before this call has been processed.
    pub async fn flush(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(JobRequest::Flush(reply_tx)).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.send(JobRequest::Shutdown).await
    }

    async fn send(&self, request: JobRequest) -> Result<()> {
        self.tx
            .send(request)
            .await
            .map_err(|_| RuntimeError::JobChannelClosed)
    }
}
