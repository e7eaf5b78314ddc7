//! Source of task snapshots.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::model::Task;

/// Fetches the current snapshot of a task.
#[async_trait]
pub trait TaskStatusProvider: Send + Sync {
    /// Fetch task `task_id`. The query must give up after `timeout`.
    async fn get_task(&self, task_id: &str, timeout: Duration) -> Result<Task, ProviderError>;
}

#[async_trait]
impl<P: TaskStatusProvider + ?Sized> TaskStatusProvider for Arc<P> {
    async fn get_task(&self, task_id: &str, timeout: Duration) -> Result<Task, ProviderError> {
        (**self).get_task(task_id, timeout).await
    }
}

#[async_trait]
impl<P: TaskStatusProvider + ?Sized> TaskStatusProvider for &P {
    async fn get_task(&self, task_id: &str, timeout: Duration) -> Result<Task, ProviderError> {
        (**self).get_task(task_id, timeout).await
    }
}
