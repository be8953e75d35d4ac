//! Backend services used by the pages.

pub mod auth;
pub mod mentor;
pub mod student;

pub use auth::AuthService;
pub use mentor::MentorService;
pub use student::StudentService;

use crate::error::{ApiError, ErrorKind};

/// `Failed to {action}` unless the backend said something more specific.
fn failed(action: &'static str) -> impl Fn(ApiError) -> ApiError {
    move |e| {
        if e.is_malformed() {
            tracing::warn!(action, error = %e, "backend response did not match the envelope contract");
        }
        e.or_message(&format!("Failed to {action}"))
    }
}

/// Like [`failed`], with a dedicated message for 404.
fn not_found_or(e: ApiError, not_found: &str, action: &str) -> ApiError {
    if e.kind == ErrorKind::NotFound {
        e.or_message(not_found)
    } else {
        e.or_message(&format!("Failed to {action}"))
    }
}
