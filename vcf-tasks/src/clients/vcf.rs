//! REST client for VCF task lookups.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::error::ProviderError;
use crate::model::Task;
use crate::provider::TaskStatusProvider;

/// Error bodies are cut to this many bytes.
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for the VCF API.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL, e.g. `https://sddc-manager.example.com`.
    pub api_endpoint: String,
    /// Bearer token, sent as-is.
    pub token: Option<String>,
    /// Accept self-signed certificates (lab appliances).
    pub accept_invalid_certs: bool,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_endpoint: "https://localhost".to_string(),
            token: None,
            accept_invalid_certs: false,
            user_agent: concat!("vcf-tasks/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_endpoint", &self.api_endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Task status provider backed by `GET /v1/tasks/{id}`.
#[derive(Clone)]
pub struct VcfClient {
    base_url: Url,
    token: Option<String>,
    http: reqwest::Client,
}

impl VcfClient {
    pub fn new(config: ClientConfig) -> Result<Self, ProviderError> {
        let base_url = Url::parse(&config.api_endpoint)
            .map_err(|e| ProviderError::InvalidEndpoint(format!("{}: {}", config.api_endpoint, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ProviderError::InvalidEndpoint(format!(
                "{}: expected an http(s) URL",
                config.api_endpoint
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            base_url,
            token: config.token,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the task resource. The ID is percent-encoded as a single path segment.
    pub fn task_url(&self, task_id: &str) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["v1", "tasks", task_id]);
        }
        url
    }
}

#[async_trait]
impl TaskStatusProvider for VcfClient {
    async fn get_task(&self, task_id: &str, timeout: Duration) -> Result<Task, ProviderError> {
        let url = self.task_url(task_id);
        debug!("Getting task {} from {}", task_id, url);

        let mut request = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .timeout(timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let task: Task = serde_json::from_slice(&body)?;
        debug!(task_id = %task.id, status = %task.status, "Got task");
        Ok(task)
    }
}

fn truncate_body(body: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(body).into_owned();
    if text.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(endpoint: &str) -> Result<VcfClient, ProviderError> {
        VcfClient::new(ClientConfig {
            api_endpoint: endpoint.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_task_url_joins_path() {
        let c = client("https://sddc.example.com").unwrap();
        assert_eq!(
            c.task_url("abc-123").as_str(),
            "https://sddc.example.com/v1/tasks/abc-123"
        );

        let c = client("https://sddc.example.com/api/").unwrap();
        assert_eq!(
            c.task_url("abc").as_str(),
            "https://sddc.example.com/api/v1/tasks/abc"
        );
    }

    #[test]
    fn test_task_url_encodes_id() {
        let c = client("http://127.0.0.1:8080").unwrap();
        assert_eq!(
            c.task_url("a/b c").as_str(),
            "http://127.0.0.1:8080/v1/tasks/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_bad_endpoints() {
        for endpoint in ["", "sddc.example.com", "ftp://sddc.example.com", "mailto:ops@example.com"] {
            let err = client(endpoint).err().unwrap();
            assert!(
                matches!(err, ProviderError::InvalidEndpoint(_)),
                "{endpoint}: {err}"
            );
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig {
            token: Some("secret-token".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_truncate_body_respects_char_boundary() {
        let body = "é".repeat(400);
        let text = truncate_body(body.as_bytes());
        assert!(text.len() <= MAX_ERROR_BODY);
        assert!(text.chars().all(|c| c == 'é'));

        assert_eq!(truncate_body(b"short"), "short");
    }
}
