//! Task tracker - waits for a server-side task to reach a terminal state.
//!
//! The tracker polls the task on a fixed interval, reports each distinct
//! progress message once, and returns when the task succeeds, fails, or the
//! caller cancels.

use std::collections::HashSet;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::model::{SubTask, Task};
use crate::provider::TaskStatusProvider;
use crate::sink::{ProgressSink, TracingSink, TrackerEvent};
use crate::status::{TaskState, classify, is_sub_task_working};

/// Default time between status queries.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(20);

/// Default bound for a single status query.
pub const DEFAULT_API_CALL_TIMEOUT: Duration = Duration::from_secs(120);

/// Tracks one task until it finishes.
///
/// A tracker is bound to a single task ID and consumed by [`wait`](Self::wait).
pub struct TaskTracker<P, S = TracingSink> {
    provider: P,
    sink: S,
    task_id: String,
    polling_interval: Duration,
    query_timeout: Duration,
    /// Messages already reported, keyed by text.
    seen_messages: HashSet<String>,
    cancel: CancellationToken,
}

impl<P: TaskStatusProvider> TaskTracker<P> {
    /// Create a tracker polling every [`DEFAULT_POLLING_INTERVAL`].
    pub fn new(provider: P, task_id: impl Into<String>, cancel: CancellationToken) -> Result<Self> {
        Self::with_polling_interval(provider, task_id, cancel, DEFAULT_POLLING_INTERVAL)
    }

    /// Create a tracker with a custom polling interval.
    pub fn with_polling_interval(
        provider: P,
        task_id: impl Into<String>,
        cancel: CancellationToken,
        polling_interval: Duration,
    ) -> Result<Self> {
        let task_id = task_id.into();
        if task_id.trim().is_empty() {
            return Err(TrackerError::EmptyTaskId);
        }
        if polling_interval.is_zero() {
            return Err(TrackerError::InvalidPollingInterval);
        }

        Ok(Self {
            provider,
            sink: TracingSink,
            task_id,
            polling_interval,
            query_timeout: DEFAULT_API_CALL_TIMEOUT,
            seen_messages: HashSet::new(),
            cancel,
        })
    }
}

impl<P: TaskStatusProvider, S: ProgressSink> TaskTracker<P, S> {
    /// Bound each status query to `timeout`.
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Send events to `sink` instead of `tracing`.
    pub fn with_sink<T: ProgressSink>(self, sink: T) -> TaskTracker<P, T> {
        TaskTracker {
            provider: self.provider,
            sink,
            task_id: self.task_id,
            polling_interval: self.polling_interval,
            query_timeout: self.query_timeout,
            seen_messages: self.seen_messages,
            cancel: self.cancel,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Wait until the task reaches a terminal state.
    ///
    /// The first query happens one polling interval after the call. Returns
    /// `Ok(())` on success or on any status outside the known vocabulary.
    pub async fn wait(mut self) -> Result<()> {
        let mut ticker = interval_at(
            Instant::now() + self.polling_interval,
            self.polling_interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(self.cancelled()),
                _ = ticker.tick() => {}
            }

            let task = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(self.cancelled()),
                result = self.provider.get_task(&self.task_id, self.query_timeout) => result?,
            };

            // Report progress before classifying so the final poll is never lost.
            self.log_task(&task);

            match classify(&task.status) {
                TaskState::InProgress => {
                    debug!(task_id = %self.task_id, status = %task.status, "Task still running");
                }
                TaskState::Failed => {
                    self.sink.emit(TrackerEvent::Failed {
                        task_id: &task.id,
                        name: &task.name,
                        task_type: &task.task_type,
                        status: &task.status,
                    });
                    return Err(TrackerError::TaskFailed {
                        id: task.id,
                        name: task.name,
                        task_type: task.task_type,
                        status: task.status,
                    });
                }
                TaskState::Succeeded => {
                    self.sink.emit(TrackerEvent::Completed {
                        task_id: &task.id,
                        status: &task.status,
                        completed_at: &task.completion_timestamp,
                    });
                    return Ok(());
                }
            }
        }
    }

    fn cancelled(&self) -> TrackerError {
        debug!(task_id = %self.task_id, "Wait cancelled");
        TrackerError::Cancelled {
            task_id: self.task_id.clone(),
        }
    }

    fn log_task(&mut self, task: &Task) {
        match &task.sub_tasks {
            None => {
                if let Some(message) = task.description() {
                    self.report(message, &task.status);
                }
            }
            Some(sub_tasks) => {
                for sub_task in sub_tasks {
                    self.log_sub_task(sub_task);
                }
            }
        }
    }

    fn log_sub_task(&mut self, sub_task: &SubTask) {
        if is_sub_task_working(&sub_task.status) || sub_task.description.is_empty() {
            return;
        }
        self.report(&sub_task.description, &sub_task.status);
    }

    fn report(&mut self, message: &str, status: &str) {
        if self.seen_messages.contains(message) {
            return;
        }
        self.sink.emit(TrackerEvent::Progress {
            task_id: &self.task_id,
            status,
            message,
        });
        self.seen_messages.insert(message.to_string());
    }
}
