//! Client bootstrap.
//!
//! DESIGN
//! ======
//! `App` owns one of everything: the session store, the router (which is
//! also the `Navigator` handed to interceptors and pages), the API client
//! and the services on top of it. Pages are built on demand from these
//! handles; all of them are cheap clones sharing the same state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `from_env` → `ClientConfig` → storage + transport → `assemble`. Tests call
//! `assemble` directly with a memory store and a scripted transport.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::net::{ApiClient, ReqwestTransport, Transport};
use crate::pages::{
    LoginPage, MentorListPage, MentorRegistrationPage, StudentDashboard, StudentRegistrationPage, VerifyEmailPage,
};
use crate::routing::{Location, Navigator, Router};
use crate::services::{AuthService, MentorService, StudentService};
use crate::session::{FileStorage, MemoryStorage, SessionStore, Storage};

/// Install the fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

pub struct App {
    config: ClientConfig,
    session: SessionStore,
    router: Arc<Router>,
    client: ApiClient,
    auth: AuthService,
    mentors: MentorService,
    students: StudentService,
}

impl App {
    /// # Errors
    ///
    /// Config, storage or HTTP client failures.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns an error if the session file cannot be read or the HTTP
    /// client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let storage: Arc<dyn Storage> = match &config.session_file {
            Some(path) => Arc::new(FileStorage::open(path.clone())?),
            None => Arc::new(MemoryStorage::new()),
        };
        let transport = Arc::new(ReqwestTransport::new(config.timeouts)?);
        Ok(Self::assemble(config, storage, transport))
    }

    /// Wire everything over the given storage and transport.
    #[must_use]
    pub fn assemble(config: ClientConfig, storage: Arc<dyn Storage>, transport: Arc<dyn Transport>) -> Self {
        let session = SessionStore::load(storage);
        let router = Arc::new(Router::new(session.clone()));
        let client = ApiClient::new(config.api_base_url.clone(), transport, session.clone(), router.clone());
        let auth = AuthService::new(client.clone(), session.clone());
        let mentors = MentorService::new(client.clone());
        let students = StudentService::new(client.clone());
        tracing::info!(
            api = %config.api_base_url,
            persistent = config.session_file.is_some(),
            authenticated = session.is_authenticated(),
            "client ready"
        );
        Self { config, session, router, client, auth, mentors, students }
    }

    // -------------------------------------------------------------------------
    // HANDLES
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    #[must_use]
    pub fn mentors(&self) -> &MentorService {
        &self.mentors
    }

    #[must_use]
    pub fn students(&self) -> &StudentService {
        &self.students
    }

    /// Navigate through the guards and return where the router landed.
    pub fn navigate(&self, url: &str) -> Location {
        self.router.navigate(url);
        self.router.location()
    }

    // -------------------------------------------------------------------------
    // PAGES
    // -------------------------------------------------------------------------

    /// Login page opened at `url` (which may carry `returnUrl`).
    #[must_use]
    pub fn login_page(&self, url: &str) -> LoginPage {
        LoginPage::open(self.auth.clone(), self.navigator(), url)
    }

    #[must_use]
    pub fn student_registration_page(&self) -> StudentRegistrationPage {
        StudentRegistrationPage::new(self.auth.clone(), self.navigator())
    }

    #[must_use]
    pub fn mentor_registration_page(&self) -> MentorRegistrationPage {
        MentorRegistrationPage::new(self.auth.clone(), self.navigator())
    }

    #[must_use]
    pub fn student_dashboard(&self) -> StudentDashboard {
        StudentDashboard::new(self.auth.clone(), self.students.clone(), self.navigator())
    }

    #[must_use]
    pub fn mentor_list_page(&self) -> MentorListPage {
        MentorListPage::new(self.mentors.clone())
    }

    #[must_use]
    pub fn verify_email_page(&self, url: &str) -> VerifyEmailPage {
        VerifyEmailPage::open(self.students.clone(), self.navigator(), url)
    }

    fn navigator(&self) -> Arc<dyn Navigator> {
        self.router.clone()
    }
}
