use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header Copper uses to tag each request for support lookups
pub const HDR_REQUEST_ID: &str = "x-request-id";

/// Errors that can occur when using the Copper API client
#[derive(Debug, Error)]
pub enum CopperError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// API error returned by Copper
    #[error("API error: {0}")]
    Api(ApiErrorObject),

    /// Configuration error (e.g., missing credentials)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),

    /// A record failed client-side validation and was not sent
    #[error("Invalid input: {0}")]
    Validation(String),
}

/// Error category derived from the HTTP status of a failed call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// 401: credentials missing or rejected
    Unauthorized,
    /// 403: credentials lack access to the resource
    Forbidden,
    /// 404: the record does not exist
    NotFound,
    /// 400/422, or a record rejected before sending
    InvalidInput,
    /// 429: too many requests
    RateLimited,
    /// 5xx other than 503
    ServerError,
    /// 503
    ServiceUnavailable,
    /// Any other status
    Unknown,
}

impl ErrorCode {
    /// Maps an HTTP status code to its error category
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::InvalidInput,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            503 => Self::ServiceUnavailable,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// Returns the wire name of this code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::InvalidInput => "invalid_input",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::ServiceUnavailable => "service_unavailable",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API error object built from a non-2xx Copper response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// HTTP status code
    pub status_code: u16,
    /// Error category
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Extra structured detail from the response body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Request identifier reported by Copper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    /// Delay requested by the server before retrying
    #[serde(skip)]
    pub retry_after: Option<Duration>,
}

impl fmt::Display for ApiErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.code, self.status_code, self.message)?;
        if let Some(id) = &self.request_id {
            write!(f, " [request_id={id}]")?;
        }
        Ok(())
    }
}

impl CopperError {
    /// Determines if this error is retryable
    ///
    /// Retryable errors include rate limits (429), timeouts (408),
    /// and server errors (5xx).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Api(obj) => crate::retry::is_retryable_status(obj.status_code),
            Self::Reqwest(e) => e.is_timeout() || e.is_connect(),
            Self::Config(_) | Self::Serde(_) | Self::Validation(_) => false,
        }
    }

    /// HTTP status of the failed call, if the server answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(obj) => Some(obj.status_code),
            Self::Reqwest(e) => e.status().map(|s| s.as_u16()),
            Self::Config(_) | Self::Serde(_) | Self::Validation(_) => None,
        }
    }

    /// Error category, if one applies
    #[must_use]
    pub const fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api(obj) => Some(obj.code),
            Self::Validation(_) => Some(ErrorCode::InvalidInput),
            Self::Reqwest(_) | Self::Config(_) | Self::Serde(_) => None,
        }
    }

    /// Request identifier reported by Copper, if any
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Api(obj) => obj.request_id.as_deref(),
            _ => None,
        }
    }

    /// Delay the server asked for before the next attempt
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Api(obj) => obj.retry_after,
            _ => None,
        }
    }
}

/// Maps a serde deserialization error to a `CopperError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> CopperError {
    let snippet = String::from_utf8_lossy(&body[..body.len().min(400)]).to_string();
    CopperError::Serde(format!("{e}: {snippet}"))
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Value>,
    #[serde(default)]
    request_id: Option<String>,
}

/// Deserializes an API error from the response status, headers and body
///
/// Attempts to parse the body as JSON, falling back to plain text on failure.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> CopperError {
    let status_code = status.as_u16();
    let header_request_id = headers
        .get(HDR_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let retry_after = crate::retry::parse_retry_after(status_code, headers);

    let (message, details, body_request_id) = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => (
            parsed
                .message
                .or(parsed.error)
                .unwrap_or_else(|| default_message(status)),
            parsed.details,
            parsed.request_id,
        ),
        Err(_) if body.is_empty() => (default_message(status), None, None),
        // Server may return plain text on 5xx; cap body to avoid log/memory bloat
        Err(_) => (
            String::from_utf8_lossy(&body[..body.len().min(400)]).into_owned(),
            None,
            None,
        ),
    };

    CopperError::Api(ApiErrorObject {
        status_code,
        code: ErrorCode::from_status(status_code),
        message,
        details,
        request_id: header_request_id.or(body_request_id),
        retry_after,
    })
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
}
