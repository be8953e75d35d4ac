use reqwest::Method;
use serde_json::json;

use super::*;
use crate::error::ErrorKind;
use crate::test_helpers::{Harness, harness, student_json};

fn service(h: &Harness) -> StudentService {
    StudentService::new(h.client.clone())
}

#[tokio::test]
async fn get_returns_profile() {
    let h = harness();
    h.transport.push_json(200, json!({"status": "success", "data": student_json()}));

    let student = service(&h).get(&UserId::new("s-1")).await.unwrap();
    assert_eq!(student.field_of_study, "Computer Science");
    assert_eq!(student.user.display_name(), "Ann Lee");
    assert_eq!(h.transport.last_request().url.path(), "/api/students/s-1");
}

#[tokio::test]
async fn get_without_data_is_an_error() {
    let h = harness();
    h.transport.push_json(200, json!({"status": "success"}));
    let err = service(&h).get(&UserId::new("s-1")).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unknown);
    assert_eq!(err.message, "Failed to load student: Malformed server response: student response has no data");
}

#[tokio::test]
async fn list_and_search() {
    let h = harness();
    h.transport.push_json(200, json!({"status": "success", "data": [student_json()]}));
    h.transport.push_json(200, json!({"status": "success", "data": []}));
    let students = service(&h);

    assert_eq!(students.list().await.unwrap().len(), 1);
    assert!(students.search("rust").await.unwrap().is_empty());

    let requests = h.transport.requests();
    assert_eq!(requests[0].url.path(), "/api/students");
    assert_eq!(requests[1].url.query(), Some("query=rust"));
}

#[tokio::test]
async fn create_posts_request_and_surfaces_field_errors() {
    let h = harness();
    h.transport.push_json(
        400,
        json!({"status": "error", "message": "Validation failed", "errors": [{"field": "email", "message": "Email already registered"}]}),
    );
    let request = CreateStudentRequest { name: "Ann".into(), email: "a@b.com".into(), ..CreateStudentRequest::default() };

    let err = service(&h).create(&request).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "Validation failed");
    assert_eq!(err.field_message("email"), Some("Email already registered"));
    assert_eq!(h.transport.last_request().method, Method::POST);
}

#[tokio::test]
async fn update_and_delete() {
    let h = harness();
    let profile: StudentProfile = serde_json::from_value(student_json()).unwrap();
    h.transport.push_json(200, json!({"status": "success", "data": student_json()}));
    h.transport.push_json(200, json!({"status": "success", "message": "Deleted"}));
    let students = service(&h);

    assert_eq!(students.update(&UserId::new("s-1"), &profile).await.unwrap(), profile);
    students.delete(&UserId::new("s-1")).await.unwrap();

    let methods: Vec<Method> = h.transport.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec![Method::PUT, Method::DELETE]);
}

#[tokio::test]
async fn verify_email_sends_token_as_query() {
    let h = harness();
    h.transport.push_json(200, json!({"status": "success", "message": "Email verified"}));

    service(&h).verify_email("abc+123/xyz").await.unwrap();

    let url = h.transport.last_request().url;
    assert_eq!(url.path(), "/api/students/verify");
    assert_eq!(url.query(), Some("token=abc%2B123%2Fxyz"));
}

#[tokio::test]
async fn verify_email_rejects_blank_token_locally() {
    let h = harness();
    let err = service(&h).verify_email("  ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn expired_verification_token_reports_backend_message() {
    let h = harness();
    h.transport.push_json(400, json!({"status": "error", "message": "Verification token expired"}));
    let err = service(&h).verify_email("old").await.unwrap_err();
    assert_eq!(err.message, "Verification token expired");
}

#[tokio::test]
async fn resend_verification_posts_email() {
    let h = harness();
    service(&h).resend_verification(" a@b.com ").await.unwrap();

    let req = h.transport.last_request();
    assert_eq!(req.url.path(), "/api/students/resend-verification");
    assert_eq!(req.body, Some(json!({"email": "a@b.com"})));
}

#[tokio::test]
async fn resend_verification_rejects_bad_address() {
    let h = harness();
    let err = service(&h).resend_verification("not-an-email").await.unwrap_err();
    assert_eq!(err.field_message("email"), Some("Invalid email format"));
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn id_is_encoded_as_a_single_path_segment() {
    let h = harness();
    h.transport.push_json(200, json!({"status": "success", "data": student_json()}));

    service(&h).get(&UserId::new("1?admin=true")).await.unwrap();

    let url = h.transport.last_request().url;
    assert_eq!(url.path(), "/api/students/1%3Fadmin%3Dtrue");
    assert_eq!(url.query(), None);
}
