//! HTTP plumbing: envelope contract, transport seam, interceptors, client.

pub mod client;
pub mod envelope;
pub mod interceptor;
pub mod transport;

pub use client::{ApiClient, encode_segment};
pub use envelope::{ApiEnvelope, EnvelopeStatus, FieldError};
pub use interceptor::{AuthInterceptor, ErrorInterceptor, Interceptor};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
