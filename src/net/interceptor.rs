//! Request/response interceptors.
//!
//! ARCHITECTURE
//! ============
//! `ApiClient` runs every request through its interceptors in order, sends
//! it, then runs the outcome back through them in reverse. Interceptors may
//! observe or rewrite but never swallow: an error that comes in goes out,
//! after any side effect.

#[cfg(test)]
#[path = "interceptor_test.rs"]
mod interceptor_test;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};

use super::transport::{HttpRequest, HttpResponse};
use crate::error::ApiError;
use crate::routing::{LOGIN_PATH, Navigator};
use crate::session::SessionStore;

/// A stage in the HTTP pipeline.
pub trait Interceptor: Send + Sync {
    fn intercept_request(&self, request: &mut HttpRequest) {
        let _ = request;
    }

    fn intercept_response(
        &self,
        request: &HttpRequest,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<HttpResponse, ApiError> {
        let _ = request;
        outcome
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Stamps the session generation and attaches the bearer token, if any.
pub struct AuthInterceptor {
    session: SessionStore,
}

impl AuthInterceptor {
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl Interceptor for AuthInterceptor {
    fn intercept_request(&self, request: &mut HttpRequest) {
        let snapshot = self.session.snapshot();
        request.session_generation = snapshot.generation;

        let Some(token) = snapshot.session.token.filter(|t| !t.is_empty()) else {
            return;
        };
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers.insert(AUTHORIZATION, value);
            }
            Err(_) => {
                tracing::warn!(request_id = %request.id, "stored token is not a valid header value; sending unauthenticated");
            }
        }
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// Normalizes non-2xx responses and forces a logout on 401/403.
pub struct ErrorInterceptor {
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ErrorInterceptor {
    #[must_use]
    pub fn new(session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }
}

impl Interceptor for ErrorInterceptor {
    fn intercept_response(
        &self,
        request: &HttpRequest,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<HttpResponse, ApiError> {
        let response = match outcome {
            Ok(response) if response.is_success() => return Ok(response),
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(request_id = %request.id, url = %request.url, error = %err, "request failed without response");
                return Err(err);
            }
        };

        let err = ApiError::from_status(response.status, &response.body);
        if err.kind.invalidates_session() {
            if self.session.invalidate(request.session_generation) {
                tracing::warn!(
                    request_id = %request.id,
                    status = response.status,
                    "authentication rejected; session cleared"
                );
                self.navigator.navigate(LOGIN_PATH);
            }
        } else {
            tracing::debug!(request_id = %request.id, status = response.status, error = %err, "request rejected");
        }
        Err(err)
    }
}
