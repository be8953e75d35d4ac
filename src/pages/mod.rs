//! Headless page controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page owns its form state plus a [`PageStatus`]. A view layer reads
//! that state and forwards user actions; pages never see raw transport
//! errors, only the normalized message and field errors of an
//! [`ApiError`].

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod cabinet_student;
pub mod login;
pub mod mentor_list;
pub mod register_mentor;
pub mod register_student;
pub mod verify_email;

pub use cabinet_student::StudentDashboard;
pub use login::LoginPage;
pub use mentor_list::MentorListPage;
pub use register_mentor::{MentorRegistrationPage, MentorRegistrationStep};
pub use register_student::StudentRegistrationPage;
pub use verify_email::{VerificationState, VerifyEmailPage};

use crate::error::ApiError;
use crate::net::FieldError;

/// Busy flag and visible error shared by every page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageStatus {
    /// A request is in flight; submit controls should be disabled.
    pub busy: bool,
    pub error: Option<String>,
    pub field_errors: Vec<FieldError>,
}

impl PageStatus {
    /// Start an operation. Returns `false` while another one is pending.
    pub(crate) fn begin(&mut self) -> bool {
        if self.busy {
            tracing::debug!("submit ignored; request already pending");
            return false;
        }
        self.busy = true;
        self.clear();
        true
    }

    pub(crate) fn succeed(&mut self) {
        self.busy = false;
    }

    pub(crate) fn fail(&mut self, err: &ApiError) {
        self.busy = false;
        self.error = Some(err.message.clone());
        self.field_errors.clone_from(&err.field_errors);
    }

    /// Report client-side validation failures without a request.
    pub(crate) fn reject(&mut self, field_errors: Vec<FieldError>) {
        let err = ApiError::validation(field_errors);
        self.fail(&err);
    }

    pub fn clear(&mut self) {
        self.error = None;
        self.field_errors.clear();
    }

    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}
