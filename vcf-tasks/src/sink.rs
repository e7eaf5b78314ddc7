//! Where tracker output goes.

use std::sync::Arc;

use tracing::{error, info};

/// Something the tracker reports while waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent<'a> {
    /// A task or sub-task message seen for the first time.
    Progress {
        task_id: &'a str,
        status: &'a str,
        message: &'a str,
    },
    /// Task reached a successful (or unrecognized) terminal state.
    Completed {
        task_id: &'a str,
        status: &'a str,
        completed_at: &'a str,
    },
    /// Task failed or was cancelled server-side.
    Failed {
        task_id: &'a str,
        name: &'a str,
        task_type: &'a str,
        status: &'a str,
    },
}

/// Fire-and-forget receiver of tracker events.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: TrackerEvent<'_>);
}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn emit(&self, event: TrackerEvent<'_>) {
        match event {
            TrackerEvent::Progress {
                task_id,
                status,
                message,
            } => {
                info!(task_id = %task_id, "[{}] {}", status, message);
            }
            TrackerEvent::Completed {
                task_id,
                status,
                completed_at,
            } => {
                info!(
                    "Task with ID = {} is in state {}, completed at {}",
                    task_id, status, completed_at
                );
            }
            TrackerEvent::Failed {
                task_id,
                name,
                task_type,
                status,
            } => {
                error!(
                    "Task with ID = {} , Name: {:?} Type: {:?} is in state {}",
                    task_id, name, task_type, status
                );
            }
        }
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for Arc<S> {
    fn emit(&self, event: TrackerEvent<'_>) {
        (**self).emit(event)
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for &S {
    fn emit(&self, event: TrackerEvent<'_>) {
        (**self).emit(event)
    }
}
