//! Creators Hub REST API client.
//!
//! # Architecture
//!
//! - One method per backend endpoint; the backend is the source of truth -
//!   no local sync, no retries, no response caching
//! - Bearer tokens are passed per call for protected endpoints
//! - The backend's two failure channels (transport errors vs. well-formed
//!   `{success: false, error}` bodies) are collapsed into a single
//!   [`HubError`], so callers handle failures uniformly instead of pairing
//!   a catch with a success-flag check
//!
//! The auth endpoints are the one deliberate wrinkle: the backend signals
//! `requiresVerification` inside error bodies (a 401 can still carry it),
//! so those envelopes are parsed from the body regardless of HTTP status
//! and surfaced as a typed [`AuthReply`] rather than an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use creators_hub_storefront::hub::HubClient;
//!
//! let client = HubClient::new(&config);
//!
//! let products = client.products(&ProductQuery::default()).await?;
//! let reply = client.login(&Credentials {
//!     email: "ada@example.com".into(),
//!     password: "hunter2!".into(),
//! }).await?;
//! ```

mod client;
pub mod types;

pub use client::HubClient;
pub use types::{
    AuthReply, Credentials, OrderDraft, ProductPayload, ProductQuery, ProfileUpdate,
    Registration, UserProfile,
};

use thiserror::Error;

/// Errors that can occur when talking to the Hub backend.
#[derive(Debug, Error)]
pub enum HubError {
    /// Transport failure: the request never completed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected shape.
    #[error("unexpected response shape: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend responded with a well-formed error.
    #[error("hub api error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Error message from the response body, or the raw body when the
        /// backend did not produce one.
        message: String,
    },
}

impl HubError {
    /// Whether the backend rejected the bearer token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = HubError::Api {
            status: 404,
            message: "Product not found".to_string(),
        };
        assert_eq!(err.to_string(), "hub api error (404): Product not found");
    }

    #[test]
    fn test_is_unauthorized() {
        let err = HubError::Api {
            status: 401,
            message: "Not authorized".to_string(),
        };
        assert!(err.is_unauthorized());

        let err = HubError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.is_unauthorized());
    }
}
