//! Task snapshot types as returned by `GET /v1/tasks/{id}`.

use serde::{Deserialize, Serialize};

/// Snapshot of a server-side task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub task_type: String,
    pub status: String,
    #[serde(default)]
    pub creation_timestamp: String,
    #[serde(default)]
    pub completion_timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localizable_description_pack: Option<MessagePack>,
    /// `None` when the task carries no sub-task tree at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_tasks: Option<Vec<SubTask>>,
    #[serde(default)]
    pub is_cancellable: bool,
    #[serde(default)]
    pub is_retryable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<TaskErrorDetail>,
}

impl Task {
    /// Localized description of the task itself, if any.
    pub fn description(&self) -> Option<&str> {
        self.localizable_description_pack
            .as_ref()
            .map(|pack| pack.message.as_str())
            .filter(|message| !message.is_empty())
    }
}

/// One step of a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "type", default)]
    pub task_type: String,
    #[serde(default)]
    pub creation_timestamp: String,
    #[serde(default)]
    pub completion_timestamp: String,
}

/// Localizable message attached to a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePack {
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub message_key: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub arguments: Vec<String>,
}

/// Error detail reported for a failed task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskErrorDetail {
    #[serde(default)]
    pub error_code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub remediation_message: String,
}
