//! Student service. `/students` CRUD plus e-mail verification.

#[cfg(test)]
#[path = "student_test.rs"]
mod student_test;

use serde::Serialize;

use super::{failed, not_found_or};
use crate::error::ApiError;
use crate::models::registration::is_valid_email;
use crate::models::{CreateStudentRequest, StudentProfile, UserId};
use crate::net::{ApiClient, ApiEnvelope, FieldError, encode_segment};

#[derive(Serialize)]
struct ResendVerification<'a> {
    email: &'a str,
}

#[derive(Clone)]
pub struct StudentService {
    client: ApiClient,
}

impl StudentService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /students`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without `data` is `Unknown`.
    pub async fn list(&self) -> Result<Vec<StudentProfile>, ApiError> {
        let envelope: ApiEnvelope<Vec<StudentProfile>> =
            self.client.get("/students").await.map_err(failed("load students"))?;
        envelope.into_data("student list").map_err(failed("load students"))
    }

    /// `GET /students/{id}`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without `data` is `Unknown`.
    pub async fn get(&self, id: &UserId) -> Result<StudentProfile, ApiError> {
        let envelope: ApiEnvelope<StudentProfile> = self
            .client
            .get(&format!("/students/{}", encode_segment(id.as_str())))
            .await
            .map_err(|e| not_found_or(e, "Student not found", "load student"))?;
        envelope.into_data("student").map_err(failed("load student"))
    }

    /// `GET /students/search?query=…`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without `data` is `Unknown`.
    pub async fn search(&self, query: &str) -> Result<Vec<StudentProfile>, ApiError> {
        let envelope: ApiEnvelope<Vec<StudentProfile>> = self
            .client
            .get_with_query("/students/search", &[("query", query.trim())])
            .await
            .map_err(failed("search students"))?;
        envelope.into_data("student search").map_err(failed("search students"))
    }

    /// `POST /students`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without `data` is `Unknown`.
    pub async fn create(&self, request: &CreateStudentRequest) -> Result<StudentProfile, ApiError> {
        let envelope: ApiEnvelope<StudentProfile> =
            self.client.post("/students", request).await.map_err(failed("create student"))?;
        envelope.into_data("student").map_err(failed("create student"))
    }

    /// `PUT /students/{id}`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without `data` is `Unknown`.
    pub async fn update(&self, id: &UserId, profile: &StudentProfile) -> Result<StudentProfile, ApiError> {
        let envelope: ApiEnvelope<StudentProfile> = self
            .client
            .put(&format!("/students/{}", encode_segment(id.as_str())), profile)
            .await
            .map_err(failed("update student"))?;
        envelope.into_data("student").map_err(failed("update student"))
    }

    /// `DELETE /students/{id}`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        let envelope: ApiEnvelope<serde_json::Value> = self
            .client
            .delete(&format!("/students/{}", encode_segment(id.as_str())))
            .await
            .map_err(failed("delete student"))?;
        envelope.into_unit().map_err(failed("delete student"))
    }

    /// `GET /students/verify?token=…`.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank token (no request is made), otherwise any
    /// [`ApiError`].
    pub async fn verify_email(&self, token: &str) -> Result<(), ApiError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApiError::validation(vec![FieldError::new("token", "Verification link is missing its token")]));
        }
        let envelope: ApiEnvelope<serde_json::Value> = self
            .client
            .get_with_query("/students/verify", &[("token", token)])
            .await
            .map_err(failed("verify e-mail"))?;
        envelope.into_unit().map_err(failed("verify e-mail"))
    }

    /// `POST /students/resend-verification`.
    ///
    /// # Errors
    ///
    /// `Validation` for a malformed address (no request is made), otherwise
    /// any [`ApiError`].
    pub async fn resend_verification(&self, email: &str) -> Result<(), ApiError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(ApiError::validation(vec![FieldError::new("email", "Invalid email format")]));
        }
        let envelope: ApiEnvelope<serde_json::Value> = self
            .client
            .post("/students/resend-verification", &ResendVerification { email })
            .await
            .map_err(failed("resend verification e-mail"))?;
        envelope.into_unit().map_err(failed("resend verification e-mail"))
    }
}
