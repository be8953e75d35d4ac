//! Error types shared by every layer of the client.
//!
//! DESIGN
//! ======
//! Anything a page can observe is an [`ApiError`]: a coarse [`ErrorKind`]
//! plus a display-ready message. HTTP statuses are mapped to kinds in one
//! place (here) so services and pages never branch on raw status codes.
//! Bootstrap failures (config, HTTP client construction, storage) use their
//! own enums because they happen before any page exists.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::path::PathBuf;

use crate::net::envelope::FieldError;

const MALFORMED_PREFIX: &str = "Malformed server response: ";
const CONTEXT_MALFORMED: &str = ": Malformed server response: ";

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grep-able error code and retry hint attached to every error type.
pub trait ErrorCode {
    /// Stable machine-readable code, e.g. `"E_NETWORK"`.
    fn error_code(&self) -> &'static str;

    /// Whether repeating the same operation unchanged may succeed.
    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// API ERROR
// =============================================================================

/// Normalized failure category of a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response reached the client (DNS, connect, reset, timeout).
    Network,
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
    /// HTTP 400, or an error envelope carrying field errors.
    Validation,
    /// HTTP 404.
    NotFound,
    /// HTTP 5xx.
    ServerError,
    /// Anything else, including malformed responses.
    Unknown,
}

impl ErrorKind {
    /// Map an HTTP error status to its kind.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::Validation,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// 401 and 403 force a logout.
    #[must_use]
    pub fn invalidates_session(self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden)
    }
}

/// Failure of a backend call, normalized for display.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    /// Human-readable message, safe to show inline on a form.
    pub message: String,
    /// HTTP status when a response was received.
    pub status: Option<u16>,
    /// Field-level validation errors reported by the backend.
    pub field_errors: Vec<FieldError>,
    /// True when `message` came from the backend rather than a local default.
    pub server_message: bool,
}

impl ApiError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), status: None, field_errors: Vec::new(), server_message: false }
    }

    /// A request that never produced a response.
    #[must_use]
    pub fn network(detail: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Network, format!("Network error: {detail}"))
    }

    /// Client-side validation failure. The first field message is the headline.
    #[must_use]
    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        let message = field_errors
            .first()
            .map_or_else(|| "Please correct the highlighted fields".to_owned(), |e| e.message.clone());
        Self { field_errors, ..Self::new(ErrorKind::Validation, message) }
    }

    /// A success-shaped response that does not match the envelope contract.
    #[must_use]
    pub fn malformed(detail: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::Unknown, format!("{MALFORMED_PREFIX}{detail}"))
    }

    /// Built by [`ApiError::malformed`] and not yet given operation context.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.kind == ErrorKind::Unknown && !self.server_message && self.message.starts_with(MALFORMED_PREFIX)
    }

    /// Build from a non-2xx status and the (possibly empty) response body.
    ///
    /// The envelope's `message` and `errors` are used when the body parses;
    /// otherwise a per-status default message is used.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let (message, field_errors) = crate::net::envelope::parse_error_body(body);
        let server_message = message.is_some();
        Self {
            kind: ErrorKind::from_status(status),
            message: message.unwrap_or_else(|| default_status_message(status)),
            status: Some(status),
            field_errors,
            server_message,
        }
    }

    /// Replace a locally generated message with an operation-specific one.
    ///
    /// Backend-supplied messages and network errors are kept as-is. A
    /// malformed-response error keeps its detail behind the fallback, once.
    #[must_use]
    pub fn or_message(mut self, fallback: &str) -> Self {
        if self.is_malformed() {
            self.message = format!("{fallback}: {}", self.message);
        } else if !self.server_message && self.kind != ErrorKind::Network && !self.has_context() {
            fallback.clone_into(&mut self.message);
        }
        self
    }

    fn has_context(&self) -> bool {
        self.kind == ErrorKind::Unknown && self.message.contains(CONTEXT_MALFORMED)
    }

    /// First backend message for `field`, if any.
    #[must_use]
    pub fn field_message(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

fn default_status_message(status: u16) -> String {
    match status {
        400 => "Bad request".to_owned(),
        401 => "Your session has expired. Please sign in again.".to_owned(),
        403 => "You do not have access to this resource.".to_owned(),
        404 => "Resource not found".to_owned(),
        500..=599 => "Internal server error".to_owned(),
        other => format!("Request failed with status {other}"),
    }
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self.kind {
            ErrorKind::Network => "E_NETWORK",
            ErrorKind::Unauthorized => "E_UNAUTHORIZED",
            ErrorKind::Forbidden => "E_FORBIDDEN",
            ErrorKind::Validation => "E_VALIDATION",
            ErrorKind::NotFound => "E_NOT_FOUND",
            ErrorKind::ServerError => "E_SERVER",
            ErrorKind::Unknown => "E_UNKNOWN",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Network | ErrorKind::ServerError)
    }
}

// =============================================================================
// BOOTSTRAP ERRORS
// =============================================================================

/// A configuration value could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        "E_CONFIG"
    }
}

/// Session persistence failure.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("storage encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "E_STORAGE_IO",
            Self::Encode(_) => "E_STORAGE_ENCODE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// Failure while wiring the client together.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ErrorCode for ClientError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Storage(e) => e.error_code(),
        }
    }
}
