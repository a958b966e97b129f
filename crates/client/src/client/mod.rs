//! HTTP client for the sitecontent API.

mod api;
pub mod content;
pub mod faqs;
pub mod items;
pub mod sections;
pub mod testimonials;

pub use api::ContentApi;

use serde::de::DeserializeOwned;
use serde_json::Value;
use sitecontent_core::content::ApiResponse;

use crate::error::{ClientError, Result};

/// Default base URL, including the route prefix.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/content";

/// HTTP client for the sitecontent API.
#[derive(Debug, Clone)]
pub struct ContentClient {
    client: reqwest::Client,
    base_url: String,
}

impl ContentClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client that shares an existing connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment (SITECONTENT_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("SITECONTENT_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Unwrap the `data` of a successful envelope.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let envelope: ApiResponse<T> = read_envelope(response, resource).await?;
        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse("response has no data".to_string()))
    }

    /// Handle responses that carry only a message (deletes).
    async fn handle_message_response(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<String> {
        let envelope: ApiResponse<Value> = read_envelope(response, resource).await?;
        Ok(envelope.message.unwrap_or_default())
    }
}

/// Reads the response envelope, turning failures into a [`ClientError`].
async fn read_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
    resource: &str,
) -> Result<ApiResponse<T>> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        let envelope: ApiResponse<T> = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        if envelope.success {
            return Ok(envelope);
        }
        return Err(ClientError::ServerError {
            status: status.as_u16(),
            message: describe_failure(envelope.message, envelope.error),
        });
    }

    if status.as_u16() == 404 {
        return Err(ClientError::NotFound {
            resource: resource.to_string(),
        });
    }

    let message = match serde_json::from_str::<ApiResponse<Value>>(&body) {
        Ok(envelope) => describe_failure(envelope.message, envelope.error),
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body,
    };
    Err(ClientError::ServerError {
        status: status.as_u16(),
        message,
    })
}

fn describe_failure(message: Option<String>, error: Option<String>) -> String {
    match (message, error) {
        (Some(message), Some(error)) => format!("{message}: {error}"),
        (Some(message), None) => message,
        (None, Some(error)) => error,
        (None, None) => "Unknown error".to_string(),
    }
}
