use std::time::Duration;

use reqwest::{Method, header};
use serde_json::{Value, json};
use thiserror::Error;

/// Hard ceiling on any single request, independent of caller cancellation.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures surfaced by the fleet API. Cancellation is not represented
/// here: an aborted request settles silently on the spawning side.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out.")]
    Timeout,
    #[error("{0}")]
    Failed(String),
    #[error("Invalid container payload.")]
    InvalidPayload,
}

/// Thin wrapper around the fleet's HTTP API. No retries; failures surface
/// immediately and the caller decides what to do with them.
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    /// Build a client for the given deployment base URL (scheme + host,
    /// optionally with a path prefix). Trailing slashes are tolerated.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Failed(e.to_string()))?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full container inventory. Returns the raw JSON payload;
    /// normalization is the caller's concern.
    pub async fn list_containers(&self) -> Result<Value, ApiError> {
        self.request("", Method::GET, None).await
    }

    /// Fetch the log payload for one container.
    pub async fn container_logs(&self, container_id: &str) -> Result<Value, ApiError> {
        self.request(&format!("/{container_id}/logs"), Method::GET, None)
            .await
    }

    /// Start a stopped container.
    pub async fn start_container(&self, container_id: &str) -> Result<Value, ApiError> {
        self.request(&format!("/{container_id}/start"), Method::POST, Some(json!({})))
            .await
    }

    /// Stop a running container.
    pub async fn stop_container(&self, container_id: &str) -> Result<Value, ApiError> {
        self.request(&format!("/{container_id}/stop"), Method::POST, Some(json!({})))
            .await
    }

    async fn request(
        &self,
        path_suffix: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}/containers{}", self.base, path_suffix);

        let mut req = self
            .http
            .request(method, &url)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = &body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Failed(e.without_url().to_string())
            }
        })?;

        let status = response.status();
        let payload: Option<Value> = response.json().await.ok();

        if !status.is_success() {
            return Err(ApiError::Failed(failure_detail(payload.as_ref(), status.as_u16())));
        }
        Ok(payload.unwrap_or(Value::Null))
    }
}

/// Error text for a non-success response: the structured `detail` field when
/// the body carries one, else a generic status-coded message.
fn failure_detail(payload: Option<&Value>, status: u16) -> String {
    payload
        .and_then(|p| p.get("detail"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}
