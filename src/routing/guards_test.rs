use super::*;
use crate::models::user::{MENTOR_DASHBOARD, STUDENT_DASHBOARD};
use crate::routing::match_route;
use crate::test_helpers::{memory_store, mentor, student};

fn route(path: &str) -> &'static Route {
    match_route(path).route
}

// =============================================================================
// AuthGuard
// =============================================================================

#[test]
fn auth_guard_allows_signed_in_user() {
    let session = memory_store();
    session.set_session(student(), "tok".into());
    let guard = AuthGuard::new(session);
    assert_eq!(guard.can_activate(route("/profile"), "/profile"), GuardDecision::Allow);
}

#[test]
fn auth_guard_redirects_with_return_url() {
    let guard = AuthGuard::new(memory_store());
    assert_eq!(
        guard.can_activate(route("/profile/edit"), "/profile/edit?tab=photo"),
        GuardDecision::Redirect("/login?returnUrl=%2Fprofile%2Fedit%3Ftab%3Dphoto".into())
    );
}

#[test]
fn auth_guard_rejects_user_without_token() {
    let session = memory_store();
    session.set_session(student(), String::new());
    let guard = AuthGuard::new(session);
    assert!(matches!(guard.can_activate(route("/profile"), "/profile"), GuardDecision::Redirect(_)));
}

// =============================================================================
// RoleGuard
// =============================================================================

#[test]
fn role_guard_sends_student_to_own_dashboard() {
    let session = memory_store();
    session.set_session(student(), "tok".into());
    let guard = RoleGuard::new(session);
    assert_eq!(
        guard.can_activate(route(MENTOR_DASHBOARD), MENTOR_DASHBOARD),
        GuardDecision::Redirect(STUDENT_DASHBOARD.into())
    );
}

#[test]
fn role_guard_sends_mentor_to_own_dashboard() {
    let session = memory_store();
    session.set_session(mentor(), "tok".into());
    let guard = RoleGuard::new(session);
    assert_eq!(
        guard.can_activate(route(STUDENT_DASHBOARD), STUDENT_DASHBOARD),
        GuardDecision::Redirect(MENTOR_DASHBOARD.into())
    );
}

#[test]
fn role_guard_allows_matching_role() {
    let session = memory_store();
    session.set_session(student(), "tok".into());
    let guard = RoleGuard::new(session);
    assert_eq!(guard.can_activate(route(STUDENT_DASHBOARD), STUDENT_DASHBOARD), GuardDecision::Allow);
}

#[test]
fn role_guard_redirects_anonymous_to_login() {
    let guard = RoleGuard::new(memory_store());
    assert_eq!(
        guard.can_activate(route(MENTOR_DASHBOARD), MENTOR_DASHBOARD),
        GuardDecision::Redirect("/login?returnUrl=%2Fcabinet-mentor".into())
    );
}

#[test]
fn role_guard_allows_route_without_role() {
    let session = memory_store();
    session.set_session(mentor(), "tok".into());
    let guard = RoleGuard::new(session);
    assert_eq!(guard.can_activate(route("/profile"), "/profile"), GuardDecision::Allow);
}
