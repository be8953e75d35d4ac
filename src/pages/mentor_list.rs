//! Mentor directory page.

#[cfg(test)]
#[path = "mentor_list_test.rs"]
mod mentor_list_test;

use super::PageStatus;
use crate::models::MentorProfile;
use crate::services::MentorService;

pub struct MentorListPage {
    mentors: MentorService,
    results: Vec<MentorProfile>,
    pub query: String,
    pub status: PageStatus,
}

impl MentorListPage {
    #[must_use]
    pub fn new(mentors: MentorService) -> Self {
        Self { mentors, results: Vec::new(), query: String::new(), status: PageStatus::default() }
    }

    #[must_use]
    pub fn results(&self) -> &[MentorProfile] {
        &self.results
    }

    /// Load the full list.
    pub async fn load(&mut self) -> bool {
        if !self.status.begin() {
            return false;
        }
        let outcome = self.mentors.list().await;
        self.apply(outcome)
    }

    /// Search with the current `query`; a blank query loads everything.
    pub async fn search(&mut self) -> bool {
        let query = self.query.trim().to_owned();
        if query.is_empty() {
            return self.load().await;
        }
        if !self.status.begin() {
            return false;
        }
        let outcome = self.mentors.search(&query).await;
        self.apply(outcome)
    }

    /// Only mentors currently accepting students.
    pub fn available(&self) -> impl Iterator<Item = &MentorProfile> {
        self.results.iter().filter(|m| m.is_available)
    }

    fn apply(&mut self, outcome: Result<Vec<MentorProfile>, crate::error::ApiError>) -> bool {
        match outcome {
            Ok(mentors) => {
                tracing::debug!(count = mentors.len(), "mentors loaded");
                self.results = mentors;
                self.status.succeed();
                true
            }
            Err(err) => {
                self.results.clear();
                self.status.fail(&err);
                false
            }
        }
    }
}
