//! Transport-neutral request and response types.
//!
//! The axum host and the Lambda host both convert into these, so the
//! dispatcher never sees a framework type.

use std::collections::HashMap;

use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use serde::Serialize;
use serde_json::Value;

use sitecontent_core::content::ApiResponse;

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";
pub const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

/// An incoming request.
#[derive(Debug, Clone, Default)]
pub struct DispatchRequest {
    pub method: Method,
    pub path: String,
    /// Parameters already extracted by the host (API gateway style).
    pub path_params: HashMap<String, String>,
    pub query: HashMap<String, String>,
    pub body: Option<String>,
}

impl DispatchRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[cfg(test)]
    pub fn with_json<T: Serialize>(self, body: &T) -> Self {
        let body = serde_json::to_string(body).unwrap_or_default();
        self.with_body(body)
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }
}

/// A response ready to be written by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    pub status: StatusCode,
    /// `None` means an empty body.
    pub body: Option<Value>,
    preflight: bool,
}

impl DispatchResponse {
    /// Response to an `OPTIONS` request: 200, empty body.
    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
            preflight: true,
        }
    }

    /// A JSON envelope response.
    pub fn envelope<T: Serialize>(status: StatusCode, envelope: &ApiResponse<T>) -> Self {
        let body = serde_json::to_value(envelope).unwrap_or_else(|e| {
            serde_json::json!({
                "success": false,
                "message": "Internal server error",
                "error": e.to_string(),
            })
        });
        Self {
            status,
            body: Some(body),
            preflight: false,
        }
    }

    pub fn not_found() -> Self {
        Self::envelope(
            StatusCode::NOT_FOUND,
            &ApiResponse::<Value>::failure("Endpoint not found"),
        )
    }

    pub fn internal_error(error: impl std::fmt::Display) -> Self {
        Self::envelope(
            StatusCode::INTERNAL_SERVER_ERROR,
            &ApiResponse::<Value>::failure("Internal server error").with_error(error.to_string()),
        )
    }

    /// CORS headers for this response, plus the JSON content type when
    /// there is a body.
    pub fn headers(&self) -> Vec<(HeaderName, HeaderValue)> {
        use axum::http::header;

        let mut headers = vec![
            (
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(ALLOW_ORIGIN),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOW_HEADERS),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOW_METHODS),
            ),
        ];
        if self.preflight {
            headers.push((
                header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("false"),
            ));
        }
        if self.body.is_some() {
            headers.push((
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            ));
        }
        headers
    }

    /// The `success` flag of the envelope, if any.
    pub fn success(&self) -> Option<bool> {
        self.body.as_ref()?.get("success")?.as_bool()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header;

    use super::*;

    #[test]
    fn test_preflight_headers() {
        let response = DispatchResponse::preflight();
        let headers = response.headers();

        assert_eq!(response.status, StatusCode::OK);
        assert!(response.body.is_none());
        assert!(headers
            .iter()
            .any(|(name, value)| *name == header::ACCESS_CONTROL_ALLOW_CREDENTIALS && value == "false"));
        assert!(!headers.iter().any(|(name, _)| *name == header::CONTENT_TYPE));
    }

    #[test]
    fn test_not_found_envelope() {
        let response = DispatchResponse::not_found();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(
            response.body,
            Some(serde_json::json!({"success": false, "message": "Endpoint not found"}))
        );
        assert_eq!(response.success(), Some(false));
        assert!(response
            .headers()
            .iter()
            .any(|(name, value)| *name == header::ACCESS_CONTROL_ALLOW_ORIGIN && value == "*"));
    }

    #[test]
    fn test_internal_error_carries_text() {
        let response = DispatchResponse::internal_error("Connection failed: timeout");
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.body.unwrap();
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["error"], "Connection failed: timeout");
    }
}
