use super::*;

fn valid_student() -> CreateStudentRequest {
    CreateStudentRequest {
        name: "Ann Lee".into(),
        email: "ann@example.com".into(),
        password: "correct-horse".into(),
        field_of_study: "Computer Science".into(),
        education_level: "Undergraduate".into(),
        learning_goals: "Learn Rust".into(),
        skills: vec!["Java".into()],
        is_available_for_mentorship: false,
    }
}

fn valid_application() -> MentorApplication {
    MentorApplication {
        fullname: "Mia Novak".into(),
        email: "mia@example.com".into(),
        linkedin: "https://www.linkedin.com/in/mia".into(),
        position: "Staff Engineer".into(),
        company: "Acme".into(),
        experience: "10 years".into(),
        specialization: "Backend".into(),
        skills: "Rust, Go".into(),
        bio: "Builds things".into(),
        help: "Career advice".into(),
        rate: "50".into(),
        calendar: String::new(),
    }
}

fn fields(errors: &[FieldError]) -> Vec<&str> {
    errors.iter().map(|e| e.field.as_str()).collect()
}

// =============================================================================
// is_valid_email
// =============================================================================

#[test]
fn email_accepts_common_addresses() {
    assert!(is_valid_email("a@b.com"));
    assert!(is_valid_email("  first.last+tag@sub.example.org "));
}

#[test]
fn email_rejects_malformed_addresses() {
    for bad in ["", "plain", "@example.com", "a@", "a@example", "a@@example.com", "a b@example.com", "a@.com"] {
        assert!(!is_valid_email(bad), "expected {bad:?} to be rejected");
    }
}

// =============================================================================
// format_file_size
// =============================================================================

#[test]
fn file_size_units() {
    assert_eq!(format_file_size(512), "512 B");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(2 * 1024 * 1024), "2.0 MB");
}

// =============================================================================
// CreateStudentRequest
// =============================================================================

#[test]
fn valid_student_has_no_errors() {
    assert!(valid_student().validate().is_empty());
}

#[test]
fn student_errors_in_form_order() {
    let request = CreateStudentRequest { password: "short".into(), email: "nope".into(), ..valid_student() };
    let errors = request.validate();
    assert_eq!(fields(&errors), vec!["email", "password"]);
    assert_eq!(errors[1].message, "Password must be at least 8 characters");
}

#[test]
fn student_length_limits() {
    let request = CreateStudentRequest { education_level: "x".repeat(51), ..valid_student() };
    let errors = request.validate();
    assert_eq!(fields(&errors), vec!["educationLevel"]);
    assert!(errors[0].message.contains("50"));
}

#[test]
fn blank_student_reports_every_required_field() {
    let errors = CreateStudentRequest::default().validate();
    assert_eq!(
        fields(&errors),
        vec!["name", "email", "password", "fieldOfStudy", "educationLevel", "learningGoals"]
    );
}

#[test]
fn student_serializes_camel_case_and_debug_redacts_password() {
    let value = serde_json::to_value(valid_student()).unwrap();
    assert_eq!(value["fieldOfStudy"], "Computer Science");
    assert_eq!(value["isAvailableForMentorship"], false);
    let debug = format!("{:?}", valid_student());
    assert!(!debug.contains("correct-horse"));
}

#[test]
fn trimmed_drops_blank_skills() {
    let request = CreateStudentRequest {
        name: "  Ann ".into(),
        skills: vec![" Rust ".into(), "   ".into()],
        ..valid_student()
    };
    let trimmed = request.trimmed();
    assert_eq!(trimmed.name, "Ann");
    assert_eq!(trimmed.skills, vec!["Rust".to_owned()]);
}

#[test]
fn parse_skills_splits_commas() {
    assert_eq!(parse_skills("Rust, Go,, SQL "), vec!["Rust", "Go", "SQL"]);
    assert!(parse_skills("  ").is_empty());
}

// =============================================================================
// ProfilePhoto
// =============================================================================

#[test]
fn photo_validation() {
    assert!(ProfilePhoto::new("me.png", "image/png", vec![1, 2, 3]).validate().is_ok());
    assert!(ProfilePhoto::new("me.png", "image/png", Vec::new()).validate().is_err());

    let err = ProfilePhoto::new("cv.pdf", "application/pdf", vec![1]).validate().unwrap_err();
    assert_eq!(err.field, "photo");

    let big = ProfilePhoto::new("big.jpg", "image/jpeg", vec![0; MAX_PHOTO_BYTES + 1]);
    assert!(big.validate().unwrap_err().message.contains("5.0 MB"));
}

#[test]
fn photo_base64() {
    let photo = ProfilePhoto::new("a.gif", "image/gif", b"hello".to_vec());
    assert_eq!(photo.to_base64(), "aGVsbG8=");
    assert_eq!(photo.size_label(), "5 B");
    assert!(!format!("{photo:?}").contains("104"));
}

// =============================================================================
// MentorApplication
// =============================================================================

#[test]
fn valid_application_passes_both_steps() {
    let app = valid_application();
    assert!(app.validate_personal().is_empty());
    assert!(app.validate_professional().is_empty());
}

#[test]
fn personal_step_checks_links_and_email() {
    let app = MentorApplication { email: "mia".into(), linkedin: "linkedin/mia".into(), ..valid_application() };
    assert_eq!(fields(&app.validate_personal()), vec!["email", "linkedin"]);
}

#[test]
fn professional_step_requires_fields() {
    let app = MentorApplication { company: " ".into(), rate: String::new(), ..valid_application() };
    assert_eq!(fields(&app.validate_professional()), vec!["company", "rate"]);
}

#[test]
fn to_request_encodes_photo_and_drops_blank_optionals() {
    let photo = ProfilePhoto::new("me.jpg", " image/jpeg ", b"hello".to_vec());
    let request = valid_application().to_request(&photo);
    assert_eq!(request.photo, "aGVsbG8=");
    assert_eq!(request.photo_content_type, "image/jpeg");
    assert!(request.calendar.is_none());

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["photoContentType"], "image/jpeg");
    assert!(value.get("calendar").is_none());
    assert_eq!(value["linkedin"], "https://www.linkedin.com/in/mia");
}
