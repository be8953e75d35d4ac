//! Registration payloads and their client-side validation.
//!
//! Limits mirror the backend's bean-validation constraints so most bad input
//! is caught before a round trip. The backend stays authoritative: its
//! field errors are surfaced the same way as the local ones.

#[cfg(test)]
#[path = "registration_test.rs"]
mod registration_test;

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::net::envelope::FieldError;

pub const MAX_NAME_LEN: usize = 100;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_FIELD_OF_STUDY_LEN: usize = 100;
pub const MAX_EDUCATION_LEVEL_LEN: usize = 50;
pub const MAX_LEARNING_GOALS_LEN: usize = 500;
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

// =============================================================================
// SHARED CHECKS
// =============================================================================

/// Loose structural check: `local@domain.tld` with no whitespace.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Human-readable byte size: `512 B`, `1.5 KB`, `2.0 MB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(size: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;
    if size < KB {
        format!("{size} B")
    } else if size < MB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{:.1} MB", size as f64 / MB as f64)
    }
}

fn require(errors: &mut Vec<FieldError>, field: &str, value: &str, label: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
        return false;
    }
    true
}

fn max_len(errors: &mut Vec<FieldError>, field: &str, value: &str, label: &str, max: usize) {
    if value.trim().chars().count() > max {
        errors.push(FieldError::new(field, format!("{label} must not exceed {max} characters")));
    }
}

fn check_email(errors: &mut Vec<FieldError>, email: &str) {
    if require(errors, "email", email, "Email") && !is_valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }
}

fn check_optional_url(errors: &mut Vec<FieldError>, field: &str, value: &str, label: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        _ => errors.push(FieldError::new(field, format!("{label} must be an http(s) link"))),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

// =============================================================================
// STUDENT
// =============================================================================

/// Body for `POST /auth/register/student` and `POST /students`.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub field_of_study: String,
    pub education_level: String,
    pub learning_goals: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    pub is_available_for_mentorship: bool,
}

impl fmt::Debug for CreateStudentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateStudentRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("field_of_study", &self.field_of_study)
            .finish_non_exhaustive()
    }
}

impl CreateStudentRequest {
    /// All violated constraints, in form order. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if require(&mut errors, "name", &self.name, "Name") {
            max_len(&mut errors, "name", &self.name, "Name", MAX_NAME_LEN);
        }
        check_email(&mut errors, &self.email);
        if require(&mut errors, "password", &self.password, "Password")
            && self.password.chars().count() < MIN_PASSWORD_LEN
        {
            errors.push(FieldError::new(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        if require(&mut errors, "fieldOfStudy", &self.field_of_study, "Field of study") {
            max_len(&mut errors, "fieldOfStudy", &self.field_of_study, "Field of study", MAX_FIELD_OF_STUDY_LEN);
        }
        if require(&mut errors, "educationLevel", &self.education_level, "Education level") {
            max_len(&mut errors, "educationLevel", &self.education_level, "Education level", MAX_EDUCATION_LEVEL_LEN);
        }
        if require(&mut errors, "learningGoals", &self.learning_goals, "Learning goals") {
            max_len(&mut errors, "learningGoals", &self.learning_goals, "Learning goals", MAX_LEARNING_GOALS_LEN);
        }
        errors
    }

    /// Copy with surrounding whitespace removed (the password is kept verbatim).
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
            field_of_study: self.field_of_study.trim().to_owned(),
            education_level: self.education_level.trim().to_owned(),
            learning_goals: self.learning_goals.trim().to_owned(),
            skills: self
                .skills
                .iter()
                .filter_map(|s| non_empty(s))
                .collect(),
            is_available_for_mentorship: self.is_available_for_mentorship,
        }
    }
}

/// Split a comma-separated skills input into trimmed, non-empty entries.
#[must_use]
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',').filter_map(non_empty).collect()
}

// =============================================================================
// PROFILE PHOTO
// =============================================================================

/// An image selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ProfilePhoto {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ProfilePhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfilePhoto")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl ProfilePhoto {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), content_type: content_type.into(), bytes }
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }

    /// # Errors
    ///
    /// Returns a `photo` field error for empty, non-image, or oversized files.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.bytes.is_empty() {
            return Err(FieldError::new("photo", "The selected file is empty"));
        }
        if !self.is_image() {
            return Err(FieldError::new("photo", "Please upload an image (JPG, PNG, GIF)"));
        }
        if self.bytes.len() > MAX_PHOTO_BYTES {
            return Err(FieldError::new(
                "photo",
                format!(
                    "Photo is {} which exceeds the {} limit",
                    format_file_size(self.bytes.len()),
                    format_file_size(MAX_PHOTO_BYTES)
                ),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    #[must_use]
    pub fn size_label(&self) -> String {
        format_file_size(self.bytes.len())
    }
}

/// Body for `PUT /mentors/{id}/photo`.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoUpload {
    pub photo: String,
    pub photo_content_type: String,
}

impl From<&ProfilePhoto> for PhotoUpload {
    fn from(photo: &ProfilePhoto) -> Self {
        Self { photo: photo.to_base64(), photo_content_type: photo.content_type.trim().to_owned() }
    }
}

// =============================================================================
// MENTOR
// =============================================================================

/// Raw mentor registration form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MentorApplication {
    pub fullname: String,
    pub email: String,
    pub linkedin: String,
    pub position: String,
    pub company: String,
    pub experience: String,
    pub specialization: String,
    pub skills: String,
    pub bio: String,
    pub help: String,
    pub rate: String,
    pub calendar: String,
}

impl MentorApplication {
    /// Step one: identity and contact.
    #[must_use]
    pub fn validate_personal(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if require(&mut errors, "fullname", &self.fullname, "Full name") {
            max_len(&mut errors, "fullname", &self.fullname, "Full name", MAX_NAME_LEN);
        }
        check_email(&mut errors, &self.email);
        check_optional_url(&mut errors, "linkedin", &self.linkedin, "LinkedIn profile");
        errors
    }

    /// Step two: professional details.
    #[must_use]
    pub fn validate_professional(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require(&mut errors, "position", &self.position, "Position");
        require(&mut errors, "company", &self.company, "Company");
        require(&mut errors, "experience", &self.experience, "Experience");
        require(&mut errors, "specialization", &self.specialization, "Specialization");
        require(&mut errors, "skills", &self.skills, "Skills");
        require(&mut errors, "bio", &self.bio, "Bio");
        require(&mut errors, "help", &self.help, "How you can help");
        require(&mut errors, "rate", &self.rate, "Rate");
        check_optional_url(&mut errors, "calendar", &self.calendar, "Calendar link");
        errors
    }

    /// Build the wire request, Base64-encoding the photo.
    #[must_use]
    pub fn to_request(&self, photo: &ProfilePhoto) -> MentorRegistrationRequest {
        let upload = PhotoUpload::from(photo);
        MentorRegistrationRequest {
            fullname: self.fullname.trim().to_owned(),
            email: self.email.trim().to_owned(),
            linkedin: non_empty(&self.linkedin),
            position: self.position.trim().to_owned(),
            company: self.company.trim().to_owned(),
            experience: self.experience.trim().to_owned(),
            specialization: self.specialization.trim().to_owned(),
            skills: self.skills.trim().to_owned(),
            bio: self.bio.trim().to_owned(),
            help: self.help.trim().to_owned(),
            rate: self.rate.trim().to_owned(),
            calendar: non_empty(&self.calendar),
            photo: upload.photo,
            photo_content_type: upload.photo_content_type,
        }
    }
}

/// Body for `POST /auth/register/mentor` and `POST /mentors`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorRegistrationRequest {
    pub fullname: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub position: String,
    pub company: String,
    pub experience: String,
    pub specialization: String,
    pub skills: String,
    pub bio: String,
    pub help: String,
    pub rate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<String>,
    /// Base64 of the photo bytes.
    pub photo: String,
    pub photo_content_type: String,
}

impl fmt::Debug for MentorRegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MentorRegistrationRequest")
            .field("fullname", &self.fullname)
            .field("email", &self.email)
            .field("specialization", &self.specialization)
            .field("photo_base64_len", &self.photo.len())
            .field("photo_content_type", &self.photo_content_type)
            .finish_non_exhaustive()
    }
}
