//! Mentor directory service, thin wrappers over `/mentors`.

#[cfg(test)]
#[path = "mentor_test.rs"]
mod mentor_test;

use super::{failed, not_found_or};
use crate::error::ApiError;
use crate::models::{MentorProfile, MentorRegistrationRequest, PhotoUpload, ProfilePhoto, UserId};
use crate::net::{ApiClient, ApiEnvelope, encode_segment};

#[derive(Clone)]
pub struct MentorService {
    client: ApiClient,
}

impl MentorService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /mentors`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without `data` is `Unknown`.
    pub async fn list(&self) -> Result<Vec<MentorProfile>, ApiError> {
        let envelope: ApiEnvelope<Vec<MentorProfile>> = self.client.get("/mentors").await.map_err(failed("load mentors"))?;
        envelope.into_data("mentor list").map_err(failed("load mentors"))
    }

    /// `GET /mentors/{id}`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without `data` is `Unknown`.
    pub async fn get(&self, id: &UserId) -> Result<MentorProfile, ApiError> {
        let envelope: ApiEnvelope<MentorProfile> = self
            .client
            .get(&format!("/mentors/{}", encode_segment(id.as_str())))
            .await
            .map_err(|e| not_found_or(e, "Mentor not found", "load mentor"))?;
        envelope.into_data("mentor").map_err(failed("load mentor"))
    }

    /// `GET /mentors/search?query=…`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without `data` is `Unknown`.
    pub async fn search(&self, query: &str) -> Result<Vec<MentorProfile>, ApiError> {
        let envelope: ApiEnvelope<Vec<MentorProfile>> = self
            .client
            .get_with_query("/mentors/search", &[("query", query.trim())])
            .await
            .map_err(failed("search mentors"))?;
        envelope.into_data("mentor search").map_err(failed("search mentors"))
    }

    /// `POST /mentors`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without `data` is `Unknown`.
    pub async fn create(&self, request: &MentorRegistrationRequest) -> Result<MentorProfile, ApiError> {
        let envelope: ApiEnvelope<MentorProfile> =
            self.client.post("/mentors", request).await.map_err(failed("create mentor"))?;
        envelope.into_data("mentor").map_err(failed("create mentor"))
    }

    /// `PUT /mentors/{id}`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without `data` is `Unknown`.
    pub async fn update(&self, id: &UserId, profile: &MentorProfile) -> Result<MentorProfile, ApiError> {
        let envelope: ApiEnvelope<MentorProfile> = self
            .client
            .put(&format!("/mentors/{}", encode_segment(id.as_str())), profile)
            .await
            .map_err(failed("update mentor"))?;
        envelope.into_data("mentor").map_err(failed("update mentor"))
    }

    /// `DELETE /mentors/{id}`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        let envelope: ApiEnvelope<serde_json::Value> = self
            .client
            .delete(&format!("/mentors/{}", encode_segment(id.as_str())))
            .await
            .map_err(failed("delete mentor"))?;
        envelope.into_unit().map_err(failed("delete mentor"))
    }

    /// `PUT /mentors/{id}/photo` with the Base64-encoded image.
    ///
    /// # Errors
    ///
    /// `Validation` for an unusable photo (no request is made), otherwise
    /// any [`ApiError`].
    pub async fn upload_photo(&self, id: &UserId, photo: &ProfilePhoto) -> Result<(), ApiError> {
        photo.validate().map_err(|field| ApiError::validation(vec![field]))?;
        tracing::debug!(mentor_id = %id, size = %photo.size_label(), "uploading mentor photo");
        let envelope: ApiEnvelope<serde_json::Value> = self
            .client
            .put(&format!("/mentors/{}/photo", encode_segment(id.as_str())), &PhotoUpload::from(photo))
            .await
            .map_err(failed("upload photo"))?;
        envelope.into_unit().map_err(failed("upload photo"))
    }
}
