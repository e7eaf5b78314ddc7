//! Error types for task tracking.

use thiserror::Error;

/// Errors returned by a task status provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The configured API endpoint is not a usable http(s) URL.
    #[error("invalid API endpoint: {0}")]
    InvalidEndpoint(String),

    /// Request could not be sent or timed out.
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    /// API answered with a non-success status code.
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body is not a valid task document.
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors returned by [`TaskTracker`](crate::TaskTracker).
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("task id must not be empty")]
    EmptyTaskId,

    #[error("polling interval must be greater than zero")]
    InvalidPollingInterval,

    /// Status query failed; the provider's error is passed through untouched.
    #[error(transparent)]
    Query(#[from] ProviderError),

    /// Task reached a failed or cancelled state on the server.
    #[error("Task with ID = {id} , Name: {name:?} Type: {task_type:?} is in state {status}")]
    TaskFailed {
        id: String,
        name: String,
        task_type: String,
        status: String,
    },

    /// Caller cancelled the wait before the task finished.
    #[error("wait for task {task_id} was cancelled")]
    Cancelled { task_id: String },
}

impl TrackerError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, TrackerError::Cancelled { .. })
    }
}

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_failed_message_carries_identity() {
        let err = TrackerError::TaskFailed {
            id: "T1".to_string(),
            name: "Deploy cluster".to_string(),
            task_type: "CLUSTER_CREATE".to_string(),
            status: "Failed".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Task with ID = T1 , Name: \"Deploy cluster\" Type: \"CLUSTER_CREATE\" is in state Failed"
        );
        assert!(!err.is_cancelled());
    }

    #[test]
    fn test_query_error_is_transparent() {
        let err = TrackerError::from(ProviderError::Status {
            status: 404,
            body: "not found".to_string(),
        });
        assert_eq!(err.to_string(), "API returned 404: not found");
    }

    #[test]
    fn test_cancelled_is_distinguishable() {
        let err = TrackerError::Cancelled {
            task_id: "T1".to_string(),
        };
        assert!(err.is_cancelled());
    }
}
