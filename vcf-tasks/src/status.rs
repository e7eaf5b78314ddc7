//! Task status vocabulary.
//!
//! The API is not consistent about casing across versions, so statuses are
//! matched case-sensitively against explicit allow-lists. Anything that is
//! neither in progress nor failed counts as success.

pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_IN_PROGRESS_UPPERCASE: &str = "IN_PROGRESS";
pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_FAILED: &str = "Failed";
pub const STATUS_CANCELLED: &str = "Cancelled";
pub const STATUS_NOT_APPLICABLE: &str = "NOT_APPLICABLE";

const IN_PROGRESS: &[&str] = &[STATUS_IN_PROGRESS, STATUS_IN_PROGRESS_UPPERCASE, STATUS_PENDING];
const FAILED: &[&str] = &[STATUS_FAILED, STATUS_CANCELLED];
const SUB_TASK_WORKING: &[&str] = &[
    STATUS_IN_PROGRESS_UPPERCASE,
    STATUS_PENDING,
    STATUS_NOT_APPLICABLE,
];

/// Classified state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    InProgress,
    Failed,
    Succeeded,
}

/// Classify a raw status string.
pub fn classify(status: &str) -> TaskState {
    if IN_PROGRESS.contains(&status) {
        TaskState::InProgress
    } else if FAILED.contains(&status) {
        TaskState::Failed
    } else {
        TaskState::Succeeded
    }
}

/// Whether a sub-task is still working and its description should not be reported yet.
pub fn is_sub_task_working(status: &str) -> bool {
    SUB_TASK_WORKING.contains(&status)
}
