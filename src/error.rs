//! Error taxonomy shared by the API client, the query cache and the views.
//!
//! - [`ApiError::Network`]: the request never reached the server or no
//!   response came back.
//! - [`ApiError::Http`]: the server answered with a non-2xx status.
//! - [`ValidationError`]: rejected on the client before anything was sent.

use thiserror::Error;

/// Errors surfaced by API calls and mutations.
///
/// `Clone` so the query cache can hand the same failure to every consumer
/// that shared a deduplicated request.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, reset.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Non-2xx response.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        body: String,
    },

    /// 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// Base URL or path could not be turned into a request URL.
    #[error("Invalid URL: {message}")]
    InvalidUrl { message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// HTTP status for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network { .. } => "network_error",
            ApiError::Http { .. } => "http_error",
            ApiError::Decode { .. } => "decode_error",
            ApiError::InvalidUrl { .. } => "invalid_url",
            ApiError::Validation(_) => "validation_error",
        }
    }

    pub(crate) fn network(err: reqwest::Error) -> Self {
        ApiError::Network {
            message: err.to_string(),
        }
    }

    /// Build an `Http` error, preferring the backend's `message` field.
    pub(crate) fn http(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map(String::from)
            })
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| {
                reqwest::StatusCode::from_u16(status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown status")
                    .to_string()
            });

        ApiError::Http {
            status,
            message,
            body,
        }
    }
}

/// Client-side validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Rule name is required")]
    MissingName,

    #[error("Configuration is required")]
    MissingConfiguration,

    #[error("Configuration is not valid JSON: {0}")]
    InvalidConfiguration(String),

    #[error("Severity must be between 1 and 5, got {0}")]
    SeverityOutOfRange(u8),

    #[error("Page {page} is out of range (total pages: {total_pages})")]
    PageOutOfRange { page: u32, total_pages: u32 },

    #[error("Transaction '{id}' cannot be reviewed from status {status}")]
    NotReviewable { id: String, status: String },
}
