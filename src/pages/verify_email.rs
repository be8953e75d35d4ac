//! E-mail verification landing page.

#[cfg(test)]
#[path = "verify_email_test.rs"]
mod verify_email_test;

use std::sync::Arc;

use super::PageStatus;
use crate::routing::{LOGIN_PATH, Navigator, query_param};
use crate::services::StudentService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationState {
    Pending,
    Verified,
    Failed,
}

pub struct VerifyEmailPage {
    students: StudentService,
    navigator: Arc<dyn Navigator>,
    token: Option<String>,
    state: VerificationState,
    pub status: PageStatus,
}

impl VerifyEmailPage {
    /// Page opened at `url`; the token comes from its `token` parameter.
    #[must_use]
    pub fn open(students: StudentService, navigator: Arc<dyn Navigator>, url: &str) -> Self {
        Self {
            students,
            navigator,
            token: query_param(url, "token").filter(|t| !t.trim().is_empty()),
            state: VerificationState::Pending,
            status: PageStatus::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> VerificationState {
        self.state
    }

    /// Verify the token from the URL.
    pub async fn verify(&mut self) -> VerificationState {
        let Some(token) = self.token.clone() else {
            self.state = VerificationState::Failed;
            self.status.error = Some("Verification token is missing.".to_owned());
            return self.state;
        };
        if !self.status.begin() {
            return self.state;
        }
        match self.students.verify_email(&token).await {
            Ok(()) => {
                self.status.succeed();
                self.state = VerificationState::Verified;
                tracing::info!("e-mail verified");
            }
            Err(err) => {
                let err = err.or_message("Email verification failed. Please try again.");
                self.status.fail(&err);
                self.state = VerificationState::Failed;
            }
        }
        self.state
    }

    /// Ask for a fresh link after an expired or missing token.
    pub async fn resend(&mut self, email: &str) -> bool {
        if !self.status.begin() {
            return false;
        }
        match self.students.resend_verification(email).await {
            Ok(()) => {
                self.status.succeed();
                true
            }
            Err(err) => {
                self.status.fail(&err);
                false
            }
        }
    }

    /// Leave for the login page once verified.
    pub fn continue_to_login(&self) {
        self.navigator.navigate(LOGIN_PATH);
    }
}
