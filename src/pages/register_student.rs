//! Student registration page.

#[cfg(test)]
#[path = "register_student_test.rs"]
mod register_student_test;

use std::sync::Arc;

use super::PageStatus;
use crate::models::registration::parse_skills;
use crate::models::{CreateStudentRequest, Role};
use crate::routing::{Navigator, REGISTRATION_SUCCESS_PATH};
use crate::services::AuthService;

pub struct StudentRegistrationPage {
    auth: AuthService,
    navigator: Arc<dyn Navigator>,
    pub form: CreateStudentRequest,
    /// Comma-separated skills as typed.
    pub skills_input: String,
    pub status: PageStatus,
}

impl StudentRegistrationPage {
    #[must_use]
    pub fn new(auth: AuthService, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            auth,
            navigator,
            form: CreateStudentRequest::default(),
            skills_input: String::new(),
            status: PageStatus::default(),
        }
    }

    /// Validate locally, register, then show the success page.
    ///
    /// Returns `true` once the backend accepted the registration.
    pub async fn submit(&mut self) -> bool {
        let mut request = self.form.trimmed();
        request.skills = parse_skills(&self.skills_input);

        let errors = request.validate();
        if !errors.is_empty() {
            self.status.reject(errors);
            return false;
        }
        if !self.status.begin() {
            return false;
        }

        match self.auth.register(Role::Student, &request).await {
            Ok(user) => {
                self.status.succeed();
                self.form.password.clear();
                tracing::info!(user_id = %user.id(), "student registered");
                self.navigator.navigate(REGISTRATION_SUCCESS_PATH);
                true
            }
            Err(err) => {
                self.status.fail(&err);
                false
            }
        }
    }
}
