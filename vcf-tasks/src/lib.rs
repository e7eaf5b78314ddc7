//! vcf-tasks: wait for asynchronous VCF control-plane tasks.
//!
//! Mutating calls against the control plane return a task handle. A
//! [`TaskTracker`] polls that task through a [`TaskStatusProvider`] until it
//! reaches a terminal state, reporting sub-task progress once per distinct
//! message.
//!
//! # Example
//! ```ignore
//! use tokio_util::sync::CancellationToken;
//! use vcf_tasks::{ClientConfig, TaskTracker, VcfClient};
//!
//! let client = VcfClient::new(ClientConfig {
//!     api_endpoint: "https://sddc-manager.example.com".into(),
//!     token: Some(token),
//!     ..Default::default()
//! })?;
//! TaskTracker::new(client, task_id, CancellationToken::new())?.wait().await?;
//! ```

pub mod clients;
pub mod error;
pub mod model;
pub mod provider;
pub mod sink;
pub mod status;
pub mod tracker;

pub use clients::{ClientConfig, VcfClient};
pub use error::{ProviderError, TrackerError};
pub use model::{MessagePack, SubTask, Task, TaskErrorDetail};
pub use provider::TaskStatusProvider;
pub use sink::{ProgressSink, TracingSink, TrackerEvent};
pub use status::{TaskState, classify};
pub use tracker::{DEFAULT_API_CALL_TIMEOUT, DEFAULT_POLLING_INTERVAL, TaskTracker};
