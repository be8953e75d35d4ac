//! Auth service: login, provider login, registration and logout.
//!
//! DESIGN
//! ======
//! The only writer of the session besides the error interceptor. A
//! successful login stores `{user, token}`; the token is looked up in
//! `data.token` first and then in the envelope's top-level `token`, and
//! nowhere else.
//!
//! Registration does not require a token: accounts that still need e-mail
//! verification come back without one and the session is left untouched.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde::Serialize;

use crate::error::{ApiError, ErrorKind};
use crate::models::{AuthPayload, AuthRequest, OAuthProvider, OAuthRequest, Role, UserRecord};
use crate::net::{ApiClient, ApiEnvelope};
use crate::session::SessionStore;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    session: SessionStore,
}

impl AuthService {
    #[must_use]
    pub fn new(client: ApiClient, session: SessionStore) -> Self {
        Self { client, session }
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn current_user(&self) -> Option<UserRecord> {
        self.session.current_user()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.session.role()
    }

    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without a token is `Unknown`.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserRecord, ApiError> {
        let request = AuthRequest { email: email.trim().to_owned(), password: password.to_owned() };
        let envelope: ApiEnvelope<AuthPayload> = self
            .client
            .post("/auth/login", &request)
            .await
            .map_err(|e| e.or_message(LOGIN_FAILED))?;
        self.establish(envelope, LOGIN_FAILED)
    }

    /// `POST /auth/oauth2/{provider}` with an opaque provider token.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`]; a success without a token is `Unknown`.
    pub async fn login_with_provider(
        &self,
        provider_token: &str,
        role: Role,
        provider: OAuthProvider,
    ) -> Result<UserRecord, ApiError> {
        let failed = format!("Sign-in with {} failed", provider_label(provider));
        let request = OAuthRequest { token: provider_token.to_owned(), user_type: role };
        let envelope: ApiEnvelope<AuthPayload> = self
            .client
            .post(&format!("/auth/oauth2/{provider}"), &request)
            .await
            .map_err(|e| e.or_message(&failed))?;
        self.establish(envelope, &failed)
    }

    /// `POST /auth/register/{role}`. Signs the user in only when the
    /// response carries a token.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`].
    pub async fn register<P>(&self, role: Role, payload: &P) -> Result<UserRecord, ApiError>
    where
        P: Serialize + Sync + ?Sized,
    {
        let envelope: ApiEnvelope<AuthPayload> = self
            .client
            .post(&format!("/auth/register/{role}"), payload)
            .await
            .map_err(|e| e.or_message(REGISTRATION_FAILED))?;
        let (user, token) = unpack(envelope, "registration").map_err(|e| e.or_message(REGISTRATION_FAILED))?;

        match token {
            Some(token) => self.session.set_session(user.clone(), token),
            None => tracing::info!(role = %role, "registered; awaiting e-mail verification"),
        }
        Ok(user)
    }

    /// Drop the session locally. No request is made.
    pub fn logout(&self) {
        self.session.clear_session();
    }

    fn establish(&self, envelope: ApiEnvelope<AuthPayload>, failed: &str) -> Result<UserRecord, ApiError> {
        let (user, token) = unpack(envelope, "login").map_err(|e| e.or_message(failed))?;
        let Some(token) = token else {
            tracing::warn!(role = %user.role(), "auth response carried no token");
            return Err(ApiError::new(ErrorKind::Unknown, format!("{failed}: no token in response")));
        };
        self.session.set_session(user.clone(), token);
        Ok(user)
    }
}

fn unpack(envelope: ApiEnvelope<AuthPayload>, what: &str) -> Result<(UserRecord, Option<String>), ApiError> {
    let top_level = envelope.token.clone().filter(|t| !t.is_empty());
    let payload = envelope.into_data(what).inspect_err(|e| {
        if !e.server_message {
            tracing::warn!(error = %e, "unusable {what} response");
        }
    })?;
    Ok((payload.user, payload.token.or(top_level)))
}

fn provider_label(provider: OAuthProvider) -> &'static str {
    match provider {
        OAuthProvider::Google => "Google",
        OAuthProvider::LinkedIn => "LinkedIn",
    }
}
