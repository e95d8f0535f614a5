//! Auth session store.
//!
//! State machine over the authenticated identity:
//!
//! ```text
//! Bootstrapping ──stored token revalidates──▶ Authenticated(role)
//!       │ no record / stale token (purged)
//!       ▼
//! Unauthenticated ──credentials ok, email unverified──▶ VerificationPending
//!       │ ▲                                                   │
//!       │ └────────────── logout ◀────────┐                   │ code accepted
//!       └──login/register ok──▶ Authenticated ◀───────────────┘
//! ```
//!
//! The store catches both failure channels at the boundary (transport
//! errors and backend rejections) and converts them into [`AuthOutcome`]
//! values, so the views never pair a try/catch with a success-flag check.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::hub::{AuthReply, Credentials, HubClient, HubError, ProfileUpdate, Registration};
use crate::models::Session;
use crate::storage::{KeyValueStore, keys};

/// Default view to land on after logout.
const DEFAULT_LOGOUT_REDIRECT: &str = "/login";

/// Authentication state for the current client context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Durable storage is being checked and the stored token revalidated.
    #[default]
    Bootstrapping,
    /// No session.
    Unauthenticated,
    /// Credentials were accepted but the account email is unverified.
    /// No session exists in this state - only the pending address.
    VerificationPending { email: String },
    /// Logged in.
    Authenticated(Session),
}

/// Result of a login / registration / verification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A session was established and persisted.
    Success,
    /// Control should pass to the email verification flow.
    VerificationRequired { email: String },
    /// The attempt failed; `error` is displayable.
    Failed { error: String },
}

/// Errors from session operations that are not auth attempts.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not logged in")]
    NotAuthenticated,

    #[error("no verification is pending")]
    NoVerificationPending,

    #[error(transparent)]
    Api(#[from] HubError),
}

/// Owner of the current session.
///
/// Mirrors the session to durable storage on every change; reads never hit
/// storage after construction.
pub struct SessionStore {
    client: HubClient,
    storage: Arc<dyn KeyValueStore>,
    state: watch::Sender<AuthState>,
}

impl SessionStore {
    /// Create a store in the `Bootstrapping` state.
    ///
    /// Call [`SessionStore::bootstrap`] to resolve it; until then protected
    /// operations report `NotAuthenticated`.
    #[must_use]
    pub fn new(client: HubClient, storage: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(AuthState::Bootstrapping);
        Self {
            client,
            storage,
            state,
        }
    }

    // =========================================================================
    // Readers
    // =========================================================================

    /// Snapshot of the current auth state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// The current session, if authenticated.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        match &*self.state.borrow() {
            AuthState::Authenticated(session) => Some(session.clone()),
            _ => None,
        }
    }

    /// Whether a session is currently established.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(&*self.state.borrow(), AuthState::Authenticated(_))
    }

    /// Email awaiting verification, if any.
    #[must_use]
    pub fn pending_email(&self) -> Option<String> {
        match &*self.state.borrow() {
            AuthState::VerificationPending { email } => Some(email.clone()),
            _ => None,
        }
    }

    /// Observe auth state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Resolve the initial `Bootstrapping` state.
    ///
    /// Loads the stored session record and revalidates its token against
    /// the backend. A valid token yields `Authenticated` with *fresh*
    /// profile data; anything else (no record, corrupt record, rejected
    /// token, transport failure) purges the record and yields
    /// `Unauthenticated`.
    pub async fn bootstrap(&self) -> AuthState {
        self.set(AuthState::Bootstrapping);

        let Some(stored) = self.load_record() else {
            self.set(AuthState::Unauthenticated);
            return self.state();
        };

        match self.client.me(stored.token()).await {
            Ok(profile) => {
                match Session::new(profile, stored.token().to_owned()) {
                    Some(fresh) => {
                        debug!(user_id = %fresh.user_id, "session revalidated");
                        self.persist(&fresh);
                        self.set(AuthState::Authenticated(fresh));
                    }
                    // Unreachable in practice: the stored token was non-empty.
                    None => {
                        self.purge();
                        self.set(AuthState::Unauthenticated);
                    }
                }
            }
            Err(e) => {
                info!(error = %e, "stored session rejected, purging");
                self.purge();
                self.set(AuthState::Unauthenticated);
            }
        }

        self.state()
    }

    /// Attempt a login. Safe to invoke repeatedly.
    pub async fn login(&self, credentials: Credentials) -> AuthOutcome {
        match self.client.login(&credentials).await {
            Ok(reply) => self.apply_reply(reply),
            Err(e) => {
                warn!(error = %e, "login request failed");
                AuthOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Attempt a registration. Safe to invoke repeatedly.
    pub async fn register(&self, registration: Registration) -> AuthOutcome {
        match self.client.register(&registration).await {
            Ok(reply) => self.apply_reply(reply),
            Err(e) => {
                warn!(error = %e, "registration request failed");
                AuthOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Submit the verification code for the pending email.
    ///
    /// On acceptance the backend issues a fresh token and profile, which
    /// are persisted and become the session.
    pub async fn verify_email(&self, code: &str) -> AuthOutcome {
        let Some(email) = self.pending_email() else {
            return AuthOutcome::Failed {
                error: SessionError::NoVerificationPending.to_string(),
            };
        };

        match self.client.verify_email(&email, code).await {
            Ok(AuthReply::Authenticated { token, user }) => self.establish(user, token),
            Ok(AuthReply::VerificationRequired { .. }) => AuthOutcome::Failed {
                error: "verification code rejected".to_string(),
            },
            Ok(AuthReply::Rejected { message }) => AuthOutcome::Failed { error: message },
            Err(e) => AuthOutcome::Failed {
                error: e.to_string(),
            },
        }
    }

    /// Ask the backend to resend the verification code for the pending
    /// email.
    ///
    /// # Errors
    ///
    /// Returns an error if no verification is pending or the request fails.
    pub async fn resend_code(&self) -> Result<(), SessionError> {
        let email = self
            .pending_email()
            .ok_or(SessionError::NoVerificationPending)?;
        self.client.resend_code(&email).await?;
        Ok(())
    }

    /// Log out: purge the session from memory and durable storage.
    ///
    /// Idempotent. Returns the view the caller should navigate to.
    pub fn logout(&self, redirect: Option<&str>) -> String {
        self.purge();
        self.set(AuthState::Unauthenticated);
        info!("logged out");
        redirect.unwrap_or(DEFAULT_LOGOUT_REDIRECT).to_owned()
    }

    // =========================================================================
    // Profile & password passthroughs
    // =========================================================================

    /// Update profile fields and/or password; refreshes the persisted
    /// session in place.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the update is rejected.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<(), SessionError> {
        let session = self.session().ok_or(SessionError::NotAuthenticated)?;
        let profile = self.client.update_profile(&update, session.token()).await?;

        if let Some(refreshed) = Session::new(profile, session.token().to_owned()) {
            self.persist(&refreshed);
            self.set(AuthState::Authenticated(refreshed));
        }
        Ok(())
    }

    /// Re-confirm the current password.
    ///
    /// # Errors
    ///
    /// Returns an error if not logged in or the password does not match.
    pub async fn verify_password(&self, password: &str) -> Result<(), SessionError> {
        let session = self.session().ok_or(SessionError::NotAuthenticated)?;
        self.client
            .verify_password(password, session.token())
            .await?;
        Ok(())
    }

    /// Request a password-reset email. Does not require a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn forgot_password(&self, email: &str) -> Result<(), SessionError> {
        self.client.forgot_password(email).await?;
        Ok(())
    }

    /// Redeem a password-reset token; may establish a session directly.
    pub async fn reset_password(&self, reset_token: &str, password: &str) -> AuthOutcome {
        match self.client.reset_password(reset_token, password).await {
            Ok(reply) => self.apply_reply(reply),
            Err(e) => AuthOutcome::Failed {
                error: e.to_string(),
            },
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply_reply(&self, reply: AuthReply) -> AuthOutcome {
        match reply {
            AuthReply::Authenticated { token, user } => self.establish(user, token),
            AuthReply::VerificationRequired { email } => {
                self.set(AuthState::VerificationPending {
                    email: email.clone(),
                });
                AuthOutcome::VerificationRequired { email }
            }
            AuthReply::Rejected { message } => AuthOutcome::Failed { error: message },
        }
    }

    fn establish(&self, user: crate::hub::UserProfile, token: String) -> AuthOutcome {
        match Session::new(user, token) {
            Some(session) => {
                info!(user_id = %session.user_id, role = %session.role, "session established");
                self.persist(&session);
                self.set(AuthState::Authenticated(session));
                AuthOutcome::Success
            }
            None => AuthOutcome::Failed {
                error: "backend returned an empty token".to_string(),
            },
        }
    }

    fn set(&self, state: AuthState) {
        self.state.send_replace(state);
    }

    fn load_record(&self) -> Option<Session> {
        let raw = self.storage.get(keys::SESSION)?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) if session.is_valid() => Some(session),
            Ok(_) => {
                warn!("stored session has no token, purging");
                self.purge();
                None
            }
            Err(e) => {
                warn!(error = %e, "stored session unreadable, purging");
                self.purge();
                None
            }
        }
    }

    fn persist(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(json) => self.storage.put(keys::SESSION, &json),
            Err(e) => warn!(error = %e, "failed to serialize session"),
        }
    }

    fn purge(&self) {
        self.storage.remove(keys::SESSION);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::HubConfig;
    use crate::storage::MemoryStore;

    fn store_with_no_backend() -> SessionStore {
        // Points at a closed port: auth attempts fail at the transport, which
        // is exactly what these tests need.
        let config = HubConfig::new("http://127.0.0.1:9", "/tmp/unused");
        SessionStore::new(HubClient::new(&config), Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_initial_state_is_bootstrapping() {
        let store = store_with_no_backend();
        assert_eq!(store.state(), AuthState::Bootstrapping);
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_bootstrap_without_record_is_unauthenticated() {
        let store = store_with_no_backend();
        assert_eq!(store.bootstrap().await, AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_login_transport_failure_is_failed_outcome() {
        let store = store_with_no_backend();
        store.bootstrap().await;

        let outcome = store
            .login(Credentials {
                email: "ada@example.com".to_owned(),
                password: "pw".to_owned(),
            })
            .await;

        assert!(matches!(outcome, AuthOutcome::Failed { .. }));
        assert_eq!(store.state(), AuthState::Unauthenticated);
    }

    #[test]
    fn test_logout_is_idempotent_and_returns_redirect() {
        let store = store_with_no_backend();
        assert_eq!(store.logout(None), "/login");
        assert_eq!(store.logout(Some("/")), "/");
        assert_eq!(store.state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_verify_email_without_pending_fails() {
        let store = store_with_no_backend();
        let outcome = store.verify_email("123456").await;
        assert!(matches!(outcome, AuthOutcome::Failed { .. }));
    }

    #[tokio::test]
    async fn test_resend_code_without_pending_errors() {
        let store = store_with_no_backend();
        assert!(matches!(
            store.resend_code().await,
            Err(SessionError::NoVerificationPending)
        ));
    }
}
