//! Mentor registration as a three-step form.
//!
//! DESIGN
//! ======
//! Steps: personal details → professional details → photo and consent.
//! Moving forward validates only the current step; `submit` re-validates
//! everything and jumps back to the first step that fails, so a view can
//! show the offending fields.

#[cfg(test)]
#[path = "register_mentor_test.rs"]
mod register_mentor_test;

use std::sync::Arc;

use super::PageStatus;
use crate::models::{MentorApplication, ProfilePhoto, Role};
use crate::net::FieldError;
use crate::routing::{Navigator, REGISTRATION_SUCCESS_PATH};
use crate::services::AuthService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentorRegistrationStep {
    Personal,
    Professional,
    PhotoAndConsent,
}

impl MentorRegistrationStep {
    /// 1-based position for progress indicators.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Personal => 1,
            Self::Professional => 2,
            Self::PhotoAndConsent => 3,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Personal => Self::Professional,
            Self::Professional | Self::PhotoAndConsent => Self::PhotoAndConsent,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Personal | Self::Professional => Self::Personal,
            Self::PhotoAndConsent => Self::Professional,
        }
    }
}

pub struct MentorRegistrationPage {
    auth: AuthService,
    navigator: Arc<dyn Navigator>,
    pub application: MentorApplication,
    pub terms_consent: bool,
    photo: Option<ProfilePhoto>,
    step: MentorRegistrationStep,
    pub status: PageStatus,
}

impl MentorRegistrationPage {
    #[must_use]
    pub fn new(auth: AuthService, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            auth,
            navigator,
            application: MentorApplication::default(),
            terms_consent: false,
            photo: None,
            step: MentorRegistrationStep::Personal,
            status: PageStatus::default(),
        }
    }

    #[must_use]
    pub fn step(&self) -> MentorRegistrationStep {
        self.step
    }

    #[must_use]
    pub fn photo(&self) -> Option<&ProfilePhoto> {
        self.photo.as_ref()
    }

    /// Validate the current step and advance. Returns whether it moved.
    pub fn next_step(&mut self) -> bool {
        let errors = self.step_errors(self.step);
        if !errors.is_empty() {
            self.status.reject(errors);
            return false;
        }
        self.status.clear();
        self.step = self.step.next();
        true
    }

    pub fn previous_step(&mut self) {
        self.status.clear();
        self.step = self.step.previous();
    }

    /// Accept a photo if it is an image within the size limit.
    pub fn select_photo(&mut self, photo: ProfilePhoto) -> bool {
        match photo.validate() {
            Ok(()) => {
                tracing::debug!(file = %photo.file_name, size = %photo.size_label(), "photo selected");
                self.photo = Some(photo);
                self.status.clear();
                true
            }
            Err(field) => {
                self.status.reject(vec![field]);
                false
            }
        }
    }

    pub fn remove_photo(&mut self) {
        self.photo = None;
    }

    /// Validate every step, register, and show the success page.
    pub async fn submit(&mut self) -> bool {
        for step in [
            MentorRegistrationStep::Personal,
            MentorRegistrationStep::Professional,
            MentorRegistrationStep::PhotoAndConsent,
        ] {
            let errors = self.step_errors(step);
            if !errors.is_empty() {
                self.step = step;
                self.status.reject(errors);
                return false;
            }
        }
        let Some(photo) = self.photo.as_ref() else {
            return false;
        };
        let request = self.application.to_request(photo);
        if !self.status.begin() {
            return false;
        }

        match self.auth.register(Role::Mentor, &request).await {
            Ok(user) => {
                self.status.succeed();
                tracing::info!(user_id = %user.id(), "mentor application submitted");
                self.navigator.navigate(REGISTRATION_SUCCESS_PATH);
                true
            }
            Err(err) => {
                self.status.fail(&err);
                false
            }
        }
    }

    fn step_errors(&self, step: MentorRegistrationStep) -> Vec<FieldError> {
        match step {
            MentorRegistrationStep::Personal => self.application.validate_personal(),
            MentorRegistrationStep::Professional => self.application.validate_professional(),
            MentorRegistrationStep::PhotoAndConsent => {
                let mut errors = Vec::new();
                match &self.photo {
                    None => errors.push(FieldError::new("photo", "Please upload a profile photo")),
                    Some(photo) => errors.extend(photo.validate().err()),
                }
                if !self.terms_consent {
                    errors.push(FieldError::new("termsConsent", "You must accept the terms to continue"));
                }
                errors
            }
        }
    }
}
