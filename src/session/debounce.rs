//! Cancellable delayed execution.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Runs at most one delayed job at a time.
///
/// Scheduling a new job aborts the previous one. A job already past its
/// delay and awaiting blocking work is cut off at its next await point; the
/// blocking work itself runs to completion and its result is dropped.
#[derive(Debug)]
pub struct Debouncer {
    runtime: Handle,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer that spawns onto `runtime`.
    pub fn new(runtime: Handle, delay: Duration) -> Self {
        Debouncer {
            runtime,
            delay,
            pending: None,
        }
    }

    /// The delay applied to every job.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Abort the pending job, if any, and schedule `job` after the delay.
    pub fn schedule<F>(&mut self, job: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            job.await;
        }));
    }

    /// Abort the pending job. Returns whether one was still running.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                running
            }
            None => false,
        }
    }

    /// Whether a job is scheduled and has not finished.
    pub fn is_scheduled(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
