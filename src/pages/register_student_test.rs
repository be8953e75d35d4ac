use serde_json::json;

use super::*;
use crate::test_helpers::{Harness, harness, student_json};

fn page(h: &Harness) -> StudentRegistrationPage {
    let auth = AuthService::new(h.client.clone(), h.session.clone());
    let mut page = StudentRegistrationPage::new(auth, h.navigator.clone());
    page.form = CreateStudentRequest {
        name: " Ann Lee ".into(),
        email: "a@b.com".into(),
        password: "secret123".into(),
        field_of_study: "Computer Science".into(),
        education_level: "Undergraduate".into(),
        learning_goals: "Learn Rust".into(),
        ..CreateStudentRequest::default()
    };
    page.skills_input = "rust, , sql ".into();
    page
}

#[tokio::test]
async fn valid_form_registers_and_redirects() {
    let h = harness();
    h.transport.push_json(201, json!({"status": "success", "data": student_json()}));
    let mut page = page(&h);

    assert!(page.submit().await);

    let body = h.transport.last_request().body.unwrap();
    assert_eq!(body["name"], "Ann Lee");
    assert_eq!(body["fieldOfStudy"], "Computer Science");
    assert_eq!(body["skills"], json!(["rust", "sql"]));
    assert_eq!(h.transport.last_request().url.path(), "/api/auth/register/student");
    assert_eq!(h.navigator.visits(), vec![REGISTRATION_SUCCESS_PATH.to_owned()]);
    assert!(page.form.password.is_empty());
    assert!(!h.session.is_authenticated());
}

#[tokio::test]
async fn short_password_is_rejected_locally() {
    let h = harness();
    let mut page = page(&h);
    page.form.password = "short".into();

    assert!(!page.submit().await);

    assert!(page.status.field_error("password").is_some());
    assert!(page.status.error.is_some());
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn backend_field_errors_are_shown() {
    let h = harness();
    h.transport.push_json(
        400,
        json!({"status": "error", "message": "Validation failed", "errors": [{"field": "email", "message": "Email already registered"}]}),
    );
    let mut page = page(&h);

    assert!(!page.submit().await);

    assert_eq!(page.status.error.as_deref(), Some("Validation failed"));
    assert_eq!(page.status.field_error("email"), Some("Email already registered"));
    assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn server_outage_uses_registration_message() {
    let h = harness();
    h.transport.push_raw(503, "");
    let mut page = page(&h);

    assert!(!page.submit().await);
    assert_eq!(page.status.error.as_deref(), Some("Registration failed"));
}
