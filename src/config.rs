//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const API_URL_VAR: &str = "MENTORLIK_API_URL";
const REQUEST_TIMEOUT_VAR: &str = "MENTORLIK_REQUEST_TIMEOUT_SECS";
const CONNECT_TIMEOUT_VAR: &str = "MENTORLIK_CONNECT_TIMEOUT_SECS";
const SESSION_FILE_VAR: &str = "MENTORLIK_SESSION_FILE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_base_url: String,
    pub timeouts: HttpTimeouts,
    /// Where the session is persisted; in-memory when `None`.
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_URL.to_owned(), timeouts: HttpTimeouts::default(), session_file: None }
    }
}

impl ClientConfig {
    /// Build typed config from `.env` and the process environment.
    ///
    /// Optional:
    /// - `MENTORLIK_API_URL`: default `http://localhost:8080/api`
    /// - `MENTORLIK_REQUEST_TIMEOUT_SECS`: default 30
    /// - `MENTORLIK_CONNECT_TIMEOUT_SECS`: default 10
    /// - `MENTORLIK_SESSION_FILE`: JSON file for the persisted session
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparsable URL or timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is the normal case.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] against an arbitrary source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unparsable URL or timeout.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let lookup = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_base_url = match lookup(API_URL_VAR) {
            Some(raw) => parse_base_url(&raw)?,
            None => DEFAULT_API_URL.to_owned(),
        };
        let timeouts = HttpTimeouts {
            request_secs: parse_secs(REQUEST_TIMEOUT_VAR, lookup(REQUEST_TIMEOUT_VAR), DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_secs(CONNECT_TIMEOUT_VAR, lookup(CONNECT_TIMEOUT_VAR), DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        let session_file = lookup(SESSION_FILE_VAR).map(PathBuf::from);

        Ok(Self { api_base_url, timeouts, session_file })
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid { var: API_URL_VAR, reason: e.to_string() })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid { var: API_URL_VAR, reason: format!("unsupported scheme '{}'", url.scheme()) });
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

fn parse_secs(var: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid { var, reason: "must be greater than zero".into() }),
        Ok(secs) => Ok(secs),
        Err(e) => Err(ConfigError::Invalid { var, reason: format!("'{raw}': {e}") }),
    }
}
