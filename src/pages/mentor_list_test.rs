use serde_json::json;

use super::*;
use crate::test_helpers::{harness, mentor_json};

fn busy_mentor() -> serde_json::Value {
    let mut m = mentor_json();
    m["id"] = json!(8);
    m["isAvailable"] = json!(false);
    m
}

#[tokio::test]
async fn load_populates_results() {
    let h = harness();
    h.transport.push_json(200, json!({"status": "success", "data": [mentor_json(), busy_mentor()]}));
    let mut page = MentorListPage::new(MentorService::new(h.client.clone()));

    assert!(page.load().await);

    assert_eq!(page.results().len(), 2);
    assert_eq!(page.available().count(), 1);
    assert!(page.status.error.is_none());
}

#[tokio::test]
async fn blank_query_loads_everything() {
    let h = harness();
    h.transport.push_json(200, json!({"status": "success", "data": []}));
    let mut page = MentorListPage::new(MentorService::new(h.client.clone()));
    page.query = "   ".into();

    assert!(page.search().await);
    assert_eq!(h.transport.last_request().url.path(), "/api/mentors");
}

#[tokio::test]
async fn search_uses_query() {
    let h = harness();
    h.transport.push_json(200, json!({"status": "success", "data": [mentor_json()]}));
    let mut page = MentorListPage::new(MentorService::new(h.client.clone()));
    page.query = " data ".into();

    assert!(page.search().await);
    assert_eq!(page.results()[0].expertise, "Data Science");
    assert_eq!(h.transport.last_request().url.query(), Some("query=data"));
}

#[tokio::test]
async fn failure_clears_results_and_sets_error() {
    let h = harness();
    h.transport.push_json(200, json!({"status": "success", "data": [mentor_json()]}));
    h.transport.push_network_error("timed out");
    let mut page = MentorListPage::new(MentorService::new(h.client.clone()));

    assert!(page.load().await);
    assert!(!page.load().await);

    assert!(page.results().is_empty());
    assert_eq!(page.status.error.as_deref(), Some("Network error: timed out"));
}
