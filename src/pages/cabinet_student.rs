//! Student dashboard ("cabinet").

#[cfg(test)]
#[path = "cabinet_student_test.rs"]
mod cabinet_student_test;

use std::sync::Arc;

use super::PageStatus;
use crate::models::{StudentProfile, UserRecord};
use crate::routing::{LOGIN_PATH, Navigator};
use crate::services::{AuthService, StudentService};

pub struct StudentDashboard {
    auth: AuthService,
    students: StudentService,
    navigator: Arc<dyn Navigator>,
    profile: Option<StudentProfile>,
    pub status: PageStatus,
}

impl StudentDashboard {
    #[must_use]
    pub fn new(auth: AuthService, students: StudentService, navigator: Arc<dyn Navigator>) -> Self {
        Self { auth, students, navigator, profile: None, status: PageStatus::default() }
    }

    #[must_use]
    pub fn profile(&self) -> Option<&StudentProfile> {
        self.profile.as_ref()
    }

    /// Show the signed-in student. Anyone else is sent elsewhere.
    pub fn open(&mut self) -> bool {
        match self.auth.current_user().filter(|_| self.auth.is_authenticated()) {
            Some(UserRecord::Student(profile)) => {
                self.profile = Some(profile);
                true
            }
            Some(other) => {
                self.navigator.navigate(other.role().dashboard_path());
                false
            }
            None => {
                tracing::debug!("dashboard opened without a session");
                self.navigator.navigate(LOGIN_PATH);
                false
            }
        }
    }

    /// Re-fetch the profile from the backend.
    pub async fn refresh(&mut self) -> bool {
        let Some(id) = self.profile.as_ref().map(|p| p.user.id.clone()) else {
            return false;
        };
        if !self.status.begin() {
            return false;
        }
        match self.students.get(&id).await {
            Ok(profile) => {
                self.profile = Some(profile);
                self.status.succeed();
                true
            }
            Err(err) => {
                self.status.fail(&err);
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.auth.logout();
        self.profile = None;
        self.navigator.navigate(LOGIN_PATH);
    }
}
