//! HTTP client for the advisor API.

pub mod clients;
pub mod dashboard;
pub mod meetings;
mod source;

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Default request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the advisor API.
///
/// Every request carries a bounded timeout; expiry surfaces as a transient
/// failure so the caller's retry policy can re-issue it.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given base URL and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Create from environment (BRIEFDESK_URL or default).
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("BRIEFDESK_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let timeout = std::env::var("BRIEFDESK_REQUEST_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self::new(base_url, timeout)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    /// Decode a response, mapping error statuses into `ClientError`.
    ///
    /// `resource` and `id` name the entity for the 404 case.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &'static str,
        id: &str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|err| {
                if err.is_decode() {
                    ClientError::Decode(err.to_string())
                } else {
                    ClientError::Request(err)
                }
            })
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(ClientError::NotFound {
                resource,
                id: id.to_string(),
            })
        } else if status == reqwest::StatusCode::UNAUTHORIZED {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "missing or expired credentials".to_string());
            Err(ClientError::Unauthorized(message))
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ClientError::Server {
                status: status.as_u16(),
                message,
            })
        }
    }
}
