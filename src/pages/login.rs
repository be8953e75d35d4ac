//! Login page for e-mail/password and provider sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;

use super::PageStatus;
use crate::error::ApiError;
use crate::models::registration::is_valid_email;
use crate::models::{OAuthProvider, Role, UserRecord};
use crate::net::FieldError;
use crate::routing::{LOGIN_PATH, Navigator, RETURN_URL_PARAM, is_safe_return_url, path_of, query_param};
use crate::services::AuthService;

pub struct LoginPage {
    auth: AuthService,
    navigator: Arc<dyn Navigator>,
    pub email: String,
    pub password: String,
    /// Where to go after a successful login, when safe.
    pub return_url: Option<String>,
    pub status: PageStatus,
}

impl LoginPage {
    #[must_use]
    pub fn new(auth: AuthService, navigator: Arc<dyn Navigator>) -> Self {
        Self { auth, navigator, email: String::new(), password: String::new(), return_url: None, status: PageStatus::default() }
    }

    /// Page opened at `url`, picking up its `returnUrl` parameter.
    #[must_use]
    pub fn open(auth: AuthService, navigator: Arc<dyn Navigator>, url: &str) -> Self {
        let mut page = Self::new(auth, navigator);
        page.return_url = query_param(url, RETURN_URL_PARAM);
        page
    }

    /// Validate, sign in, and navigate on success.
    pub async fn submit(&mut self) -> Option<UserRecord> {
        let errors = self.validate();
        if !errors.is_empty() {
            self.status.reject(errors);
            return None;
        }
        if !self.status.begin() {
            return None;
        }
        let result = self.auth.login(&self.email, &self.password).await;
        self.finish(result)
    }

    /// Sign in with an opaque provider token.
    pub async fn submit_provider(&mut self, provider: OAuthProvider, token: &str, role: Role) -> Option<UserRecord> {
        if token.trim().is_empty() {
            self.status.reject(vec![FieldError::new("token", format!("{provider} did not return a credential"))]);
            return None;
        }
        if !self.status.begin() {
            return None;
        }
        let result = self.auth.login_with_provider(token, role, provider).await;
        self.finish(result)
    }

    /// Post-login destination: a safe return URL, else the role dashboard.
    #[must_use]
    pub fn destination(&self, role: Role) -> String {
        match self.return_url.as_deref() {
            Some(url) if is_safe_return_url(url) && path_of(url) != LOGIN_PATH => url.to_owned(),
            Some(url) => {
                tracing::warn!(return_url = url, "ignoring unsafe return URL");
                role.dashboard_path().to_owned()
            }
            None => role.dashboard_path().to_owned(),
        }
    }

    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !is_valid_email(self.email.trim()) {
            errors.push(FieldError::new("email", "Invalid email format"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        }
        errors
    }

    fn finish(&mut self, result: Result<UserRecord, ApiError>) -> Option<UserRecord> {
        match result {
            Ok(user) => {
                self.status.succeed();
                self.password.clear();
                let target = self.destination(user.role());
                tracing::info!(role = %user.role(), target = %target, "signed in");
                self.navigator.navigate(&target);
                Some(user)
            }
            Err(err) => {
                self.status.fail(&err);
                None
            }
        }
    }
}
