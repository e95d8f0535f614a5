//! Client-side state stores.
//!
//! Each store follows the same contract: a single logical owner applies
//! mutations in dispatch order, and any number of readers observe snapshots
//! (via accessors or a `watch` subscription). Session and cart persist to
//! durable storage independently of each other - a cart outlives a login or
//! logout in the same client context.

pub mod cart;
pub mod session;
pub mod settings;

pub use cart::{CartLine, CartStore};
pub use session::{AuthOutcome, AuthState, SessionError, SessionStore};
pub use settings::SettingsStore;
