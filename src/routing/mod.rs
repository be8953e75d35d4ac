//! Client-side routing: route table, guard evaluation and navigation.
//!
//! ARCHITECTURE
//! ============
//! `Router` owns the current location. `navigate(url)` matches the path
//! against [`ROUTES`], runs each route guard in order, and follows any
//! redirect a guard returns, up to [`MAX_REDIRECT_HOPS`]. Interceptors and
//! pages only see the [`Navigator`] trait, so tests substitute a recorder.


pub mod guards;

use std::sync::{Mutex, PoisonError};

use url::form_urlencoded;

use crate::models::Role;
use crate::models::user::{MENTOR_DASHBOARD, STUDENT_DASHBOARD};
use crate::session::SessionStore;
use guards::{AuthGuard, GuardDecision, RoleGuard, RouteGuard};

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTRATION_SELECTOR_PATH: &str = "/registration-selector";
pub const REGISTER_STUDENT_PATH: &str = "/register-student";
pub const REGISTER_MENTOR_PATH: &str = "/register-mentor";
pub const MENTOR_LIST_PATH: &str = "/mentor-list";
pub const VERIFY_EMAIL_PATH: &str = "/verify-email";
pub const REGISTRATION_SUCCESS_PATH: &str = "/registration-success";
pub const PROFILE_PATH: &str = "/profile";
pub const PROFILE_EDIT_PATH: &str = "/profile/edit";

/// Query parameter carrying the page to return to after login.
pub const RETURN_URL_PARAM: &str = "returnUrl";

/// Guard redirects followed before navigation gives up.
pub const MAX_REDIRECT_HOPS: usize = 5;

/// Something that can move the user to another URL.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

// =============================================================================
// ROUTE TABLE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    Auth,
    Role,
}

/// A static route. `pattern` segments starting with `:` capture a parameter;
/// `**` matches anything.
#[derive(Debug, PartialEq, Eq)]
pub struct Route {
    pub name: &'static str,
    pub pattern: &'static str,
    pub guards: &'static [GuardKind],
    /// Role required by [`RoleGuard`].
    pub role: Option<Role>,
}

const fn open(name: &'static str, pattern: &'static str) -> Route {
    Route { name, pattern, guards: &[], role: None }
}

const fn authed(name: &'static str, pattern: &'static str) -> Route {
    Route { name, pattern, guards: &[GuardKind::Auth], role: None }
}

const fn for_role(name: &'static str, pattern: &'static str, role: Role) -> Route {
    Route { name, pattern, guards: &[GuardKind::Auth, GuardKind::Role], role: Some(role) }
}

pub static ROUTES: &[Route] = &[
    open("home", HOME_PATH),
    open("login", LOGIN_PATH),
    open("registration-selector", REGISTRATION_SELECTOR_PATH),
    open("register-student", REGISTER_STUDENT_PATH),
    open("register-mentor", REGISTER_MENTOR_PATH),
    for_role("cabinet-student", STUDENT_DASHBOARD, Role::Student),
    for_role("cabinet-mentor", MENTOR_DASHBOARD, Role::Mentor),
    open("mentor-list", MENTOR_LIST_PATH),
    open("mentor-details", "/mentor/:id"),
    open("verify-email", VERIFY_EMAIL_PATH),
    open("registration-success", REGISTRATION_SUCCESS_PATH),
    authed("profile", PROFILE_PATH),
    authed("profile-edit", PROFILE_EDIT_PATH),
    NOT_FOUND_ROUTE,
];

/// Wildcard; always last.
pub const NOT_FOUND_ROUTE: Route = open("not-found", "**");

/// A route matched against a concrete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static Route,
    pub params: Vec<(String, String)>,
}

impl RouteMatch {
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// First route in [`ROUTES`] matching `path`.
#[must_use]
pub fn match_route(path: &str) -> RouteMatch {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    ROUTES
        .iter()
        .find_map(|route| match_pattern(route.pattern, &segments).map(|params| RouteMatch { route, params }))
        .unwrap_or(RouteMatch { route: &NOT_FOUND_ROUTE, params: Vec::new() })
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<Vec<(String, String)>> {
    if pattern == "**" {
        return Some(Vec::new());
    }
    let expected: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if expected.len() != segments.len() {
        return None;
    }
    let mut params = Vec::new();
    for (want, got) in expected.iter().zip(segments) {
        if let Some(name) = want.strip_prefix(':') {
            params.push((name.to_owned(), (*got).to_owned()));
        } else if want != got {
            return None;
        }
    }
    Some(params)
}

// =============================================================================
// URL HELPERS
// =============================================================================

/// Path component of `url` (everything before `?` or `#`).
#[must_use]
pub fn path_of(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    match &url[..end] {
        "" => HOME_PATH,
        path => path,
    }
}

/// Decoded value of query parameter `name` in `url`.
#[must_use]
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or_default();
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// `/login?returnUrl=<requested>`.
#[must_use]
pub fn login_redirect(requested: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair(RETURN_URL_PARAM, requested)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

/// Only same-origin paths are followed after login. Control characters are
/// rejected outright since browsers strip them (`/\t/evil` becomes `//evil`).
#[must_use]
pub fn is_safe_return_url(url: &str) -> bool {
    url.starts_with('/')
        && !url.starts_with("//")
        && !url.contains('\\')
        && !url.chars().any(char::is_control)
}

// =============================================================================
// ROUTER
// =============================================================================

/// Where the last navigation landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub url: String,
    pub route: &'static Route,
    pub params: Vec<(String, String)>,
}

pub struct Router {
    auth_guard: Box<dyn RouteGuard>,
    role_guard: Box<dyn RouteGuard>,
    state: Mutex<RouterState>,
}

struct RouterState {
    current: Location,
    history: Vec<String>,
}

impl Router {
    /// A router positioned at the home route.
    #[must_use]
    pub fn new(session: SessionStore) -> Self {
        Self::with_guards(Box::new(AuthGuard::new(session.clone())), Box::new(RoleGuard::new(session)))
    }

    /// A router evaluating [`GuardKind::Auth`] and [`GuardKind::Role`] with
    /// the given guards.
    #[must_use]
    pub fn with_guards(auth_guard: Box<dyn RouteGuard>, role_guard: Box<dyn RouteGuard>) -> Self {
        let home = match_route(HOME_PATH);
        Self {
            auth_guard,
            role_guard,
            state: Mutex::new(RouterState {
                current: Location { url: HOME_PATH.to_owned(), route: home.route, params: home.params },
                history: Vec::new(),
            }),
        }
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.lock().current.clone()
    }

    /// Every URL landed on, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Run guards for `url`, following redirects, without moving.
    #[must_use]
    pub fn resolve(&self, url: &str) -> Location {
        let mut target = url.to_owned();
        for _ in 0..=MAX_REDIRECT_HOPS {
            let matched = match_route(path_of(&target));
            match self.check_guards(matched.route, &target) {
                GuardDecision::Allow => {
                    return Location { url: target, route: matched.route, params: matched.params };
                }
                GuardDecision::Redirect(next) => {
                    tracing::debug!(from = %target, to = %next, route = matched.route.name, "guard redirected");
                    target = next;
                }
            }
        }
        tracing::warn!(requested = url, "too many guard redirects; falling back to home");
        let home = match_route(HOME_PATH);
        Location { url: HOME_PATH.to_owned(), route: home.route, params: home.params }
    }

    fn check_guards(&self, route: &Route, url: &str) -> GuardDecision {
        for kind in route.guards {
            let guard = match kind {
                GuardKind::Auth => self.auth_guard.as_ref(),
                GuardKind::Role => self.role_guard.as_ref(),
            };
            if let GuardDecision::Redirect(to) = guard.can_activate(route, url) {
                return GuardDecision::Redirect(to);
            }
        }
        GuardDecision::Allow
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for Router {
    fn navigate(&self, url: &str) {
        let location = self.resolve(url);
        tracing::debug!(requested = url, landed = %location.url, route = location.route.name, "navigated");
        let mut state = self.lock();
        state.history.push(location.url.clone());
        state.current = location;
    }
}
