//! JSON API client. Builds requests, runs the interceptor chain, and
//! decodes the response envelope.
//!
//! SYSTEM CONTEXT
//! ==============
//! Services call `get`/`post`/`put`/`delete` with a path relative to the
//! configured base URL and receive an [`ApiEnvelope`]. Everything between
//! (bearer token, status normalization, forced logout) happens in the
//! interceptors, so services only deal with decoded envelopes and
//! [`ApiError`].

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use url::Url;

use super::envelope::ApiEnvelope;
use super::interceptor::{AuthInterceptor, ErrorInterceptor, Interceptor};
use super::transport::{HttpRequest, Transport};
use crate::error::{ApiError, ErrorKind};
use crate::routing::Navigator;
use crate::session::SessionStore;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Cheap-to-clone handle; clones share the transport and interceptors.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    transport: Arc<dyn Transport>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl ApiClient {
    /// Client with the standard chain: auth first, then error handling.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let interceptors: Vec<Arc<dyn Interceptor>> = vec![
            Arc::new(AuthInterceptor::new(session.clone())),
            Arc::new(ErrorInterceptor::new(session, navigator)),
        ];
        Self::with_interceptors(base_url, transport, interceptors)
    }

    #[must_use]
    pub fn with_interceptors(
        base_url: impl Into<String>,
        transport: Arc<dyn Transport>,
        interceptors: Vec<Arc<dyn Interceptor>>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { inner: Arc::new(ClientInner { base_url, transport, interceptors }) }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Absolute URL for `path` (which starts with `/`).
    ///
    /// # Errors
    ///
    /// Returns an `Unknown` error if the joined URL does not parse.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{path}", self.inner.base_url);
        Url::parse(&raw).map_err(|e| ApiError::new(ErrorKind::Unknown, format!("Invalid request URL '{raw}': {e}")))
    }

    // =========================================================================
    // VERBS
    // =========================================================================

    /// # Errors
    ///
    /// Any transport, status, or decoding failure.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiEnvelope<T>, ApiError> {
        self.send(HttpRequest::new(Method::GET, self.endpoint(path)?)).await
    }

    /// `GET` with URL-encoded query parameters.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decoding failure.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut().extend_pairs(query);
        self.send(HttpRequest::new(Method::GET, url)).await
    }

    /// # Errors
    ///
    /// Any encoding, transport, status, or decoding failure.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<ApiEnvelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = HttpRequest::new(Method::POST, self.endpoint(path)?).with_json(encode_body(body)?);
        self.send(request).await
    }

    /// # Errors
    ///
    /// Any encoding, transport, status, or decoding failure.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<ApiEnvelope<T>, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = HttpRequest::new(Method::PUT, self.endpoint(path)?).with_json(encode_body(body)?);
        self.send(request).await
    }

    /// # Errors
    ///
    /// Any transport, status, or decoding failure.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<ApiEnvelope<T>, ApiError> {
        self.send(HttpRequest::new(Method::DELETE, self.endpoint(path)?)).await
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    /// Run `request` through the chain and decode the envelope.
    ///
    /// # Errors
    ///
    /// Any transport, status, or decoding failure.
    pub async fn send<T: DeserializeOwned>(&self, mut request: HttpRequest) -> Result<ApiEnvelope<T>, ApiError> {
        if let Ok(value) = HeaderValue::from_str(&request.id.to_string()) {
            request.headers.insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
        }
        let span = tracing::debug_span!(
            "api_request",
            request_id = %request.id,
            method = %request.method,
            url = %request.url,
        );

        async move {
            for interceptor in &self.inner.interceptors {
                interceptor.intercept_request(&mut request);
            }
            tracing::debug!(authenticated = request.bearer_token().is_some(), "dispatching request");

            let mut outcome = self.inner.transport.send(&request).await;
            for interceptor in self.inner.interceptors.iter().rev() {
                outcome = interceptor.intercept_response(&request, outcome);
            }

            let response = outcome?;
            tracing::debug!(status = response.status, "response received");
            if !response.is_success() {
                return Err(ApiError::from_status(response.status, &response.body));
            }
            decode_envelope(&response.body)
        }
        .instrument(span)
        .await
    }
}

/// Percent-encode one path segment, so `?`, `#` and `/` stay inside it.
#[must_use]
pub fn encode_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::new(ErrorKind::Unknown, format!("Failed to encode request body: {e}")))
}

fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiEnvelope<T>, ApiError> {
    if body.trim().is_empty() {
        return Ok(ApiEnvelope::empty_success());
    }
    serde_json::from_str(body).map_err(ApiError::malformed)
}
