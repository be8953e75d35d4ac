//! # mentorlik-client
//!
//! Headless client for the Mentorlik mentoring platform.
//!
//! This crate holds the session store, the auth and feature services, the
//! route table with its guards, the HTTP interceptor pipeline, and page
//! controllers for login, registration, the student dashboard, the mentor
//! list and e-mail verification. [`app::App`] wires them together from a
//! [`config::ClientConfig`].

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod net;
pub mod pages;
pub mod routing;
pub mod services;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use app::{App, init_tracing};
pub use config::ClientConfig;
pub use error::{ApiError, ClientError, ErrorCode, ErrorKind};
