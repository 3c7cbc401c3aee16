//! HTTP client for the Aria backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use aria_core::command::{CommandBackend, CommandReply, SystemInfo};
use aria_core::config::backend_url_for_host;
use aria_core::error::{AriaError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct CommandRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Client for the backend's `/command`, `/system-info`, and `/health`
/// endpoints.
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Creates a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates a client for the host the shell considers itself served from.
    pub fn from_host(host: &str) -> Self {
        Self::new(backend_url_for_host(host))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Checks the backend's health endpoint.
    ///
    /// Returns the backend's own status line. Used once at startup to report
    /// reachability; the command round trip never depends on it.
    pub async fn health(&self) -> Result<String> {
        let response = self
            .client
            .get(self.url("health"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "health request failed");
                AriaError::network_unreachable(&self.base_url)
            })?;

        if !response.status().is_success() {
            return Err(AriaError::server(response.status().as_u16()));
        }

        let health: HealthResponse = response.json().await.map_err(|err| AriaError::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        })?;
        Ok(health.status)
    }
}

#[async_trait]
impl CommandBackend for BackendClient {
    async fn send_command(&self, text: &str) -> Result<CommandReply> {
        let response = self
            .client
            .post(self.url("command"))
            .timeout(REQUEST_TIMEOUT)
            .json(&CommandRequest { text })
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "command request failed");
                AriaError::network_unreachable(&self.base_url)
            })?;

        if !response.status().is_success() {
            return Err(AriaError::server(response.status().as_u16()));
        }

        response.json::<CommandReply>().await.map_err(|err| {
            AriaError::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            }
        })
    }

    async fn system_info(&self) -> Result<SystemInfo> {
        let response = self
            .client
            .get(self.url("system-info"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "system-info request failed");
                AriaError::network_unreachable(&self.base_url)
            })?;

        if !response.status().is_success() {
            return Err(AriaError::server(response.status().as_u16()));
        }

        response.json::<SystemInfo>().await.map_err(|err| {
            AriaError::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            }
        })
    }

    fn endpoint(&self) -> &str {
        &self.base_url
    }
}
