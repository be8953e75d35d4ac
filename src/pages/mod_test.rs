use super::*;
use crate::error::ErrorKind;

#[test]
fn begin_blocks_second_submit() {
    let mut status = PageStatus::default();
    assert!(status.begin());
    assert!(status.busy);
    assert!(!status.begin());
}

#[test]
fn fail_exposes_message_and_fields() {
    let mut status = PageStatus::default();
    status.begin();
    let mut err = ApiError::new(ErrorKind::Validation, "Fix the form");
    err.field_errors.push(FieldError::new("email", "taken"));

    status.fail(&err);

    assert!(!status.busy);
    assert_eq!(status.error.as_deref(), Some("Fix the form"));
    assert_eq!(status.field_error("email"), Some("taken"));
    assert_eq!(status.field_error("name"), None);
}

#[test]
fn begin_clears_previous_error() {
    let mut status = PageStatus::default();
    status.reject(vec![FieldError::new("email", "Email is required")]);
    assert_eq!(status.error.as_deref(), Some("Email is required"));

    assert!(status.begin());
    assert!(status.error.is_none());
    assert!(status.field_errors.is_empty());
    status.succeed();
    assert!(!status.busy);
}
