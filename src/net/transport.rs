//! HTTP transport seam.
//!
//! `Transport` sends one request and returns whatever response came back,
//! success or not. Only failures that produced no response at all become
//! errors here; status handling belongs to the interceptor chain.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use url::Url;
use uuid::Uuid;

use crate::config::HttpTimeouts;
use crate::error::{ApiError, ClientError};

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// An outgoing JSON request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Correlates log lines and the `x-request-id` header.
    pub id: Uuid,
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    /// Session generation this request was sent under.
    pub session_generation: u64,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self { id: Uuid::new_v4(), method, url, headers: HeaderMap::new(), body: None, session_generation: 0 }
    }

    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Token from an attached `Authorization: Bearer` header.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")
    }
}

/// A received response; `body` is the raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

/// Sends requests to the backend.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns a `Network` error when no response was received.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// `reqwest`-backed transport. Timeouts are configured here, not per call.
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(timeouts: HttpTimeouts) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .user_agent(concat!("mentorlik-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = self
            .http
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(ApiError::network)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(ApiError::network)?;
        Ok(HttpResponse { status, body })
    }
}
