//! Integration tests for Creators Hub.
//!
//! The whole client stack (gateway, stores, checkout, admin client) runs
//! against an in-process stub of the Hub backend, so `cargo test` needs no
//! live deployment.
//!
//! # Test Categories
//!
//! - `auth_flows` - login/registration/verification state machine
//! - `cart_checkout` - cart persistence and the checkout flow
//! - `admin_console` - product CRUD, order management, team, settings

// Test-support crate: panicking on broken fixtures is the point, and the
// stub's handlers index into loosely-typed JSON on purpose.
#![allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::indexing_slicing)]

pub mod stub;

use std::sync::Arc;

use creators_hub_storefront::storage::{KeyValueStore, MemoryStore};
use creators_hub_storefront::{AppState, HubConfig};

pub use stub::StubHub;

/// One stub backend plus a client stack wired to it.
pub struct TestContext {
    pub stub: StubHub,
    pub storage: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestContext {
    /// Spawn a stub backend and a fresh client stack over empty storage.
    pub async fn new() -> Self {
        let stub = StubHub::spawn().await;
        let storage = Arc::new(MemoryStore::new());
        let config = HubConfig::new(stub.url(), "unused-data-dir");
        let state =
            AppState::with_storage(config, Arc::clone(&storage) as Arc<dyn KeyValueStore>);

        Self {
            stub,
            storage,
            state,
        }
    }

    /// Simulate a client restart: a brand-new `AppState` over the same
    /// durable storage and backend. The caller still needs to
    /// `bootstrap()` the new session store, exactly like a real launch.
    #[must_use]
    pub fn reload(&self) -> AppState {
        let config = HubConfig::new(self.stub.url(), "unused-data-dir");
        AppState::with_storage(config, Arc::clone(&self.storage) as Arc<dyn KeyValueStore>)
    }
}
