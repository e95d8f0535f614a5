//! Application state shared across the views.

use std::sync::Arc;

use crate::config::HubConfig;
use crate::hub::HubClient;
use crate::storage::{FileStore, KeyValueStore};
use crate::stores::{CartStore, SessionStore, SettingsStore};

/// Application state shared across all views.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// gateway client and the three stores. The stores share one durable
/// storage backend but persist under independent keys.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: HubConfig,
    storage: Arc<dyn KeyValueStore>,
    client: HubClient,
    session: SessionStore,
    cart: CartStore,
    settings: SettingsStore,
}

impl AppState {
    /// Create application state with file-backed durable storage under the
    /// configured data directory.
    #[must_use]
    pub fn new(config: HubConfig) -> Self {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.data_dir));
        Self::with_storage(config, storage)
    }

    /// Create application state over an explicit storage backend (tests use
    /// an in-memory one).
    #[must_use]
    pub fn with_storage(config: HubConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let client = HubClient::new(&config);
        let session = SessionStore::new(client.clone(), Arc::clone(&storage));
        let cart = CartStore::new(Arc::clone(&storage));
        let settings = SettingsStore::new(client.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                client,
                session,
                cart,
                settings,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &HubConfig {
        &self.inner.config
    }

    /// Get a reference to the durable storage backend.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.storage
    }

    /// Get a reference to the Hub API client.
    #[must_use]
    pub fn client(&self) -> &HubClient {
        &self.inner.client
    }

    /// Get a reference to the auth session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the settings store.
    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }
}
