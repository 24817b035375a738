//! Shared HTTP plumbing for the REST adapters.

use crate::config::AdminConfig;
use crate::error::{AdminError, Result};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde_json::Value;

/// HTTP client bound to the API base location.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    /// Builds a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Transport` if the client cannot be constructed.
    pub fn new(config: &AdminConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AdminError::Transport(format!("failed to build http client: {e}")))?;

        Ok(Self {
            client,
            base: config.api_base_url.clone(),
        })
    }

    /// Returns the API base location.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::InvalidConfig` if the base cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AdminError::InvalidConfig(format!("unusable api base url: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues `GET` and returns the body of a 200 response.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::execute`].
    pub async fn get(&self, segments: &[&str]) -> Result<String> {
        let url = self.endpoint(segments)?;
        self.execute(self.client.get(url)).await
    }

    /// Issues `POST` with a JSON body and returns the body of a 200 response.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::execute`].
    pub async fn post_json<T: Serialize + ?Sized>(&self, segments: &[&str], body: &T) -> Result<String> {
        let url = self.endpoint(segments)?;
        self.execute(self.client.post(url).json(body)).await
    }

    /// Issues `PATCH` with a JSON body and returns the body of a 200 response.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::execute`].
    pub async fn patch_json<T: Serialize + ?Sized>(&self, segments: &[&str], body: &T) -> Result<String> {
        let url = self.endpoint(segments)?;
        self.execute(self.client.patch(url).json(body)).await
    }

    /// Sends a request; only HTTP 200 counts as success.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Transport` when no complete response arrives
    /// (including timeouts) and `AdminError::HttpStatus` for any other
    /// status, carrying the server's `message` field when the body has one.
    async fn execute(&self, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .map_err(|e| AdminError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AdminError::Transport(e.to_string()))?;

        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), "request answered with failure status");
            return Err(AdminError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(body)
    }
}

/// Extracts `message` from a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")?
        .as_str()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
