//! The JSON envelope every backend endpoint responds with.
//!
//! DESIGN
//! ======
//! One fixed contract: `{status, data?, message?, errors?, token?}`. A
//! `success` envelope must carry `data` unless the operation is void; an
//! `error` envelope should carry a message and gets a default when it
//! does not.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::{ApiError, ErrorKind};

const DEFAULT_ERROR_MESSAGE: &str = "Request failed";

/// Envelope discriminant. Parsed case-insensitively, written lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

impl<'de> Deserialize<'de> for EnvelopeStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.eq_ignore_ascii_case("success") {
            Ok(Self::Success)
        } else if raw.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else {
            Err(de::Error::unknown_variant(&raw, &["success", "error"]))
        }
    }
}

/// A validation failure on a single input field.
///
/// Used both for backend `errors` arrays and for client-side form checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Response wrapper returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
    /// Bearer token some auth endpoints place next to `data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// A success envelope wrapping `data`.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self { data: Some(data), ..Self::empty(EnvelopeStatus::Success) }
    }

    /// A data-less success, used for empty (e.g. 204) bodies.
    #[must_use]
    pub fn empty_success() -> Self {
        Self::empty(EnvelopeStatus::Success)
    }

    /// An error envelope with the given message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { message: Some(message.into()), ..Self::empty(EnvelopeStatus::Error) }
    }

    fn empty(status: EnvelopeStatus) -> Self {
        Self { status, data: None, message: None, errors: Vec::new(), token: None, timestamp: None, path: None }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }

    /// Unwrap `data` from a success envelope.
    ///
    /// # Errors
    ///
    /// Returns the envelope's error for `status: "error"`, or a malformed
    /// response error naming `what` when a success envelope has no data.
    pub fn into_data(self, what: &str) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(self.into_error());
        }
        self.data
            .ok_or_else(|| ApiError::malformed(format!("{what} response has no data")))
    }

    /// Accept a success envelope regardless of `data`.
    ///
    /// # Errors
    ///
    /// Returns the envelope's error for `status: "error"`.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.is_success() { Ok(()) } else { Err(self.into_error()) }
    }

    /// Convert an error envelope into an [`ApiError`].
    ///
    /// Field errors make it a validation failure; anything else is unknown.
    #[must_use]
    pub fn into_error(self) -> ApiError {
        let kind = if self.errors.is_empty() { ErrorKind::Unknown } else { ErrorKind::Validation };
        let server_message = self.message.is_some();
        ApiError {
            kind,
            message: self.message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_owned()),
            status: None,
            field_errors: self.errors,
            server_message,
        }
    }
}

/// Best-effort extraction of `message` and `errors` from an error body.
pub(crate) fn parse_error_body(body: &str) -> (Option<String>, Vec<FieldError>) {
    if body.trim().is_empty() {
        return (None, Vec::new());
    }
    match serde_json::from_str::<ApiEnvelope<serde_json::Value>>(body) {
        Ok(envelope) => (envelope.message.filter(|m| !m.trim().is_empty()), envelope.errors),
        Err(_) => (None, Vec::new()),
    }
}
