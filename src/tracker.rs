use crate::error::RunError;
use std::future::Future;
use tokio::task::{JoinError, JoinSet};
use tracing::debug;

/// Tracks the cell tasks of one run until every one of them has settled.
///
/// A task counts as outstanding from the moment [`spawn`](Self::spawn) is
/// called, before it can be scheduled, and stops counting only once its
/// result (or abort) has been collected. The count therefore cannot reach
/// zero while a task is still running.
#[derive(Debug, Default)]
pub struct CompletionTracker {
    tasks: JoinSet<Result<(), RunError>>,
    submitted: usize,
    settled: usize,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task and start it on the runtime.
    pub fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Result<(), RunError>> + Send + 'static,
    {
        self.submitted += 1;
        self.tasks.spawn(task);
    }

    pub fn outstanding(&self) -> usize {
        self.submitted - self.settled
    }

    /// Collect tasks that already finished, without waiting.
    ///
    /// Returns the first failure found. Remaining tasks keep running.
    pub fn poll_failure(&mut self) -> Result<(), RunError> {
        while let Some(joined) = self.tasks.try_join_next() {
            self.settled += 1;
            flatten(joined)?;
        }
        Ok(())
    }

    /// Wait until the outstanding count reaches zero.
    ///
    /// On the first failure every other task is aborted and drained, then the
    /// failure is returned.
    pub async fn wait_all(&mut self) -> Result<(), RunError> {
        while let Some(joined) = self.tasks.join_next().await {
            self.settled += 1;
            if let Err(e) = flatten(joined) {
                self.abort_all().await;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Abort every task still running and wait for them to settle.
    pub async fn abort_all(&mut self) {
        let running = self.outstanding();
        if running > 0 {
            debug!("Aborting {} outstanding tasks", running);
        }
        self.tasks.abort_all();
        while self.tasks.join_next().await.is_some() {
            self.settled += 1;
        }
    }
}

fn flatten(joined: Result<Result<(), RunError>, JoinError>) -> Result<(), RunError> {
    match joined {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(RunError::TaskAborted("task panicked".to_string())),
        Err(e) => Err(RunError::TaskAborted(e.to_string())),
    }
}
