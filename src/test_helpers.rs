//! Shared fixtures and fakes for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::error::ApiError;
use crate::net::client::ApiClient;
use crate::net::transport::{HttpRequest, HttpResponse, Transport};
use crate::routing::Navigator;
use crate::session::{MemoryStorage, SessionStore};
use crate::models::UserRecord;

pub const BASE_URL: &str = "http://api.test/api";

// =============================================================================
// USERS
// =============================================================================

pub fn student_json() -> serde_json::Value {
    json!({
        "id": "s-1",
        "email": "a@b.com",
        "firstName": "Ann",
        "lastName": "Lee",
        "isVerified": true,
        "userType": "student",
        "fieldOfStudy": "Computer Science",
        "educationLevel": "Undergraduate",
        "learningGoals": "Rust"
    })
}

pub fn mentor_json() -> serde_json::Value {
    json!({
        "id": 7,
        "email": "mia@example.com",
        "name": "Mia Novak",
        "userType": "mentor",
        "expertise": "Data Science",
        "bio": "Ten years of ML",
        "isAvailable": true
    })
}

pub fn student() -> UserRecord {
    serde_json::from_value(student_json()).unwrap()
}

pub fn mentor() -> UserRecord {
    serde_json::from_value(mentor_json()).unwrap()
}

pub fn memory_store() -> SessionStore {
    SessionStore::load(Arc::new(MemoryStorage::new()))
}

// =============================================================================
// MockTransport
// =============================================================================

/// Scripted transport: replays queued outcomes and records every request.
///
/// When the queue is empty it answers `200 {"status":"success"}`.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push(Ok(HttpResponse { status, body: body.to_string() }));
    }

    pub fn push_raw(&self, status: u16, body: &str) {
        self.push(Ok(HttpResponse { status, body: body.to_owned() }));
    }

    pub fn push_network_error(&self, detail: &str) {
        self.push(Err(ApiError::network(detail)));
    }

    fn push(&self, outcome: Result<HttpResponse, ApiError>) {
        self.responses.lock().unwrap().push_back(outcome);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request sent")
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse { status: 200, body: r#"{"status":"success"}"#.to_owned() }))
    }
}

// =============================================================================
// RecordingNavigator
// =============================================================================

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &str) {
        self.visits.lock().unwrap().push(url.to_owned());
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub navigator: Arc<RecordingNavigator>,
    pub session: SessionStore,
    pub client: ApiClient,
}

pub fn harness() -> Harness {
    let transport = MockTransport::new();
    let navigator = RecordingNavigator::new();
    let session = memory_store();
    let client = ApiClient::new(BASE_URL, transport.clone(), session.clone(), navigator.clone());
    Harness { transport, navigator, session, client }
}
