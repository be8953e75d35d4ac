//! Session store, the single source of truth for who is signed in.
//!
//! DESIGN
//! ======
//! The store owns the current [`Session`] behind a mutex and republishes
//! every change on a `watch` channel. Each mutation bumps a generation
//! counter; requests capture the generation they were sent under so a
//! late 401/403 can only invalidate the session it belongs to, and a burst
//! of concurrent 403s clears (and redirects) once.
//!
//! TRADE-OFFS
//! ==========
//! Racing logins are last-writer-wins: whichever response is applied last
//! owns the session. Persistence failures are logged and swallowed; the
//! in-memory session stays authoritative for the running process.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use super::storage::Storage;
use crate::models::{Role, UserRecord};

/// Storage key for the JSON-serialized [`UserRecord`].
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Storage key for the raw bearer token.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

// =============================================================================
// SESSION
// =============================================================================

/// The signed-in user and their bearer token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<UserRecord>,
    pub token: Option<String>,
}

impl Session {
    /// Both a user and a non-empty token are present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(UserRecord::role)
    }
}

/// A session together with the generation it was published under.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub session: Session,
    pub generation: u64,
}

// =============================================================================
// STORE
// =============================================================================

/// Shared handle to the session. Cloning shares the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: Mutex<SessionSnapshot>,
    storage: Arc<dyn Storage>,
    events: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    /// Build a store and rehydrate it from `storage`.
    ///
    /// A persisted user that fails to parse is treated as absent and both
    /// keys are cleared; this never fails.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let (session, corrupt) = rehydrate(storage.as_ref());
        let snapshot = SessionSnapshot { session, generation: 0 };
        let (events, _) = watch::channel(snapshot.clone());
        let store = Self { inner: Arc::new(StoreInner { state: Mutex::new(snapshot), storage, events }) };
        if corrupt {
            store.clear_session();
        }
        let session = store.snapshot().session;
        tracing::debug!(authenticated = session.is_authenticated(), role = ?session.role(), "session rehydrated");
        store
    }

    // -------------------------------------------------------------------------
    // READERS
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn current_user(&self) -> Option<UserRecord> {
        self.lock().session.user.clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().session.token.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_authenticated()
    }

    /// Role of the current user, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.lock().session.role()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().clone()
    }

    /// Receive every subsequent session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.events.subscribe()
    }

    // -------------------------------------------------------------------------
    // MUTATORS (auth service and error interceptor only)
    // -------------------------------------------------------------------------

    /// Replace the session and persist it.
    pub(crate) fn set_session(&self, user: UserRecord, token: String) {
        let mut state = self.lock();
        self.persist(&user, &token);
        state.session = Session { user: Some(user), token: Some(token) };
        state.generation += 1;
        tracing::info!(
            role = ?state.session.role(),
            generation = state.generation,
            "session established"
        );
        self.inner.events.send_replace(state.clone());
    }

    /// Drop the session from memory and storage.
    pub(crate) fn clear_session(&self) {
        let mut state = self.lock();
        self.clear_locked(&mut state);
    }

    /// Clear the session only if it is still at `generation`.
    ///
    /// Returns `true` when this call performed the clear.
    pub(crate) fn invalidate(&self, generation: u64) -> bool {
        let mut state = self.lock();
        if state.generation != generation {
            tracing::debug!(
                requested = generation,
                current = state.generation,
                "stale session invalidation ignored"
            );
            return false;
        }
        self.clear_locked(&mut state);
        true
    }

    fn clear_locked(&self, state: &mut SessionSnapshot) {
        for key in [CURRENT_USER_KEY, AUTH_TOKEN_KEY] {
            if let Err(e) = self.inner.storage.remove_item(key) {
                tracing::warn!(key, error = %e, "failed to remove persisted session entry");
            }
        }
        state.session = Session::default();
        state.generation += 1;
        tracing::info!(generation = state.generation, "session cleared");
        self.inner.events.send_replace(state.clone());
    }

    fn persist(&self, user: &UserRecord, token: &str) {
        match serde_json::to_string(user) {
            Ok(raw) => {
                if let Err(e) = self.inner.storage.set_item(CURRENT_USER_KEY, &raw) {
                    tracing::warn!(error = %e, "failed to persist current user");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode current user"),
        }
        if let Err(e) = self.inner.storage.set_item(AUTH_TOKEN_KEY, token) {
            tracing::warn!(error = %e, "failed to persist auth token");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionSnapshot> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read the persisted session. The flag reports a corrupt user entry.
fn rehydrate(storage: &dyn Storage) -> (Session, bool) {
    let token = storage
        .get_item(AUTH_TOKEN_KEY)
        .filter(|t| !t.trim().is_empty());
    let Some(raw) = storage.get_item(CURRENT_USER_KEY) else {
        return (Session { user: None, token }, false);
    };
    match serde_json::from_str::<UserRecord>(&raw) {
        Ok(user) => (Session { user: Some(user), token }, false),
        Err(e) => {
            tracing::warn!(error = %e, "persisted user is malformed; starting signed out");
            (Session::default(), true)
        }
    }
}
