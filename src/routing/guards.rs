//! Route guards: navigation predicates over the session store.

#[cfg(test)]
#[path = "guards_test.rs"]
mod guards_test;

use super::{LOGIN_PATH, Route, login_redirect};
use crate::session::SessionStore;

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Decides whether `url` (which matched `route`) may be entered.
pub trait RouteGuard: Send + Sync {
    fn can_activate(&self, route: &Route, url: &str) -> GuardDecision;
}

/// Allows signed-in users; everyone else goes to login with a return URL.
pub struct AuthGuard {
    session: SessionStore,
}

impl AuthGuard {
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl RouteGuard for AuthGuard {
    fn can_activate(&self, _route: &Route, url: &str) -> GuardDecision {
        if self.session.is_authenticated() {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect(login_redirect(url))
        }
    }
}

/// Allows users whose role matches the route's; others go to their own
/// dashboard.
pub struct RoleGuard {
    session: SessionStore,
}

impl RoleGuard {
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }
}

impl RouteGuard for RoleGuard {
    fn can_activate(&self, route: &Route, url: &str) -> GuardDecision {
        let session = self.session.snapshot().session;
        if !session.is_authenticated() {
            return GuardDecision::Redirect(login_redirect(url));
        }
        let Some(expected) = route.role else {
            return GuardDecision::Allow;
        };
        match session.role() {
            Some(actual) if actual == expected => GuardDecision::Allow,
            Some(actual) => {
                tracing::debug!(route = route.name, expected = %expected, actual = %actual, "role mismatch");
                GuardDecision::Redirect(actual.dashboard_path().to_owned())
            }
            None => GuardDecision::Redirect(LOGIN_PATH.to_owned()),
        }
    }
}
