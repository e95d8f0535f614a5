//! Session model.
//!
//! The authenticated identity for the current client context. Mirrored to
//! durable storage so a session survives restarts; the token inside is the
//! bearer credential for every protected endpoint.

use serde::{Deserialize, Serialize};

use creators_hub_core::{Email, Role, UserId};

use crate::hub::UserProfile;

/// An authenticated session.
///
/// Invariant: the token is never empty. Construction goes through
/// [`Session::new`], which rejects empty tokens; records rehydrated from
/// storage are validated the same way before use.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    token: String,
}

impl Session {
    /// Build a session from a profile and bearer token.
    ///
    /// Returns `None` for an empty token - a session without a credential
    /// is not a session.
    #[must_use]
    pub fn new(user: UserProfile, token: String) -> Option<Self> {
        if token.is_empty() {
            return None;
        }
        Some(Self {
            user_id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            token,
        })
    }

    /// The bearer token for protected API calls.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether this session unlocks the admin console.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Validate a record rehydrated from storage.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty()
    }
}

// Manual Debug to keep the token out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
