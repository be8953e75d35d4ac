use serde_json::json;

use super::*;
use crate::models::CreateStudentRequest;
use crate::routing::{LOGIN_PATH, REGISTRATION_SUCCESS_PATH};
use crate::session::{AUTH_TOKEN_KEY, CURRENT_USER_KEY};
use crate::test_helpers::{BASE_URL, MockTransport, student_json};

fn app_with(storage: Arc<dyn Storage>) -> (App, Arc<MockTransport>) {
    let transport = MockTransport::new();
    let config = ClientConfig { api_base_url: BASE_URL.to_owned(), ..ClientConfig::default() };
    (App::assemble(config, storage, transport.clone()), transport)
}

#[test]
fn init_tracing_twice_is_harmless() {
    init_tracing();
    init_tracing();
}

#[test]
fn from_config_with_memory_storage_starts_logged_out() {
    let app = App::from_config(ClientConfig::default()).unwrap();
    assert!(!app.session().is_authenticated());
    assert_eq!(app.client().base_url(), "http://localhost:8080/api");
}

#[test]
fn from_config_rehydrates_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let stored = json!({
        CURRENT_USER_KEY: student_json().to_string(),
        AUTH_TOKEN_KEY: "eyJ.saved",
    });
    std::fs::write(&path, stored.to_string()).unwrap();

    let config = ClientConfig { session_file: Some(path), ..ClientConfig::default() };
    let app = App::from_config(config).unwrap();

    assert!(app.auth().is_authenticated());
    assert_eq!(app.session().token().as_deref(), Some("eyJ.saved"));
}

#[test]
fn from_config_fails_on_unreadable_session_file() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be read as a file.
    let config = ClientConfig { session_file: Some(dir.path().to_path_buf()), ..ClientConfig::default() };
    assert!(matches!(App::from_config(config), Err(ClientError::Storage(_))));
}

#[test]
fn guarded_navigation_sends_anonymous_user_to_login() {
    let (app, _) = app_with(Arc::new(MemoryStorage::new()));
    let landed = app.navigate("/profile");
    assert_eq!(landed.url, "/login?returnUrl=%2Fprofile");
    assert_eq!(landed.route.name, "login");
}

#[tokio::test]
async fn login_flow_reaches_dashboard_and_forced_logout_returns_to_login() {
    let (app, transport) = app_with(Arc::new(MemoryStorage::new()));
    transport.push_json(200, json!({"status": "success", "data": {"user": student_json(), "token": "eyJ.a"}}));
    transport.push_json(403, json!({"status": "error", "message": "Forbidden"}));

    let mut login = app.login_page("/login");
    login.email = "a@b.com".into();
    login.password = "secret".into();
    assert!(login.submit().await.is_some());
    assert_eq!(app.router().location().url, "/cabinet-student");

    let mut dashboard = app.student_dashboard();
    assert!(dashboard.open());
    assert!(!dashboard.refresh().await);

    assert!(!app.session().is_authenticated());
    assert_eq!(app.router().location().url, LOGIN_PATH);
}

#[tokio::test]
async fn registration_without_token_lands_on_success_page() {
    let (app, transport) = app_with(Arc::new(MemoryStorage::new()));
    transport.push_json(200, json!({"status": "success", "data": student_json()}));

    let mut page = app.student_registration_page();
    page.form = CreateStudentRequest {
        name: "Ann Lee".into(),
        email: "ann@example.com".into(),
        password: "Secret123".into(),
        field_of_study: "Computer Science".into(),
        education_level: "Undergraduate".into(),
        learning_goals: "Learn Rust".into(),
        ..CreateStudentRequest::default()
    };

    assert!(page.submit().await, "{:?}", page.status);
    assert_eq!(app.router().location().url, REGISTRATION_SUCCESS_PATH);
    assert!(!app.session().is_authenticated());
}
