//! Settings store.
//!
//! Process-wide cache of store configuration: fetched once on first use,
//! replaced wholesale by [`SettingsStore::refresh`] after an admin update.
//! There is no offline fallback - when no settings are loaded,
//! [`SettingsStore::format_price`] degrades to a hardcoded `$` prefix.

use std::sync::{PoisonError, RwLock};

use rust_decimal::Decimal;
use tracing::debug;

use creators_hub_core::{Currency, StoreSettings};

use crate::hub::{HubClient, HubError};

/// Read-mostly holder of the active store configuration.
pub struct SettingsStore {
    client: HubClient,
    current: RwLock<Option<StoreSettings>>,
}

impl SettingsStore {
    /// Create an empty store; nothing is fetched until [`Self::load`].
    #[must_use]
    pub fn new(client: HubClient) -> Self {
        Self {
            client,
            current: RwLock::new(None),
        }
    }

    /// The cached settings, if any have been loaded.
    #[must_use]
    pub fn current(&self) -> Option<StoreSettings> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Return the cached settings, fetching them on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if no settings are cached and the fetch fails; the
    /// store stays usable (`format_price` falls back to `$`).
    pub async fn load(&self) -> Result<StoreSettings, HubError> {
        if let Some(settings) = self.current() {
            return Ok(settings);
        }
        self.refresh().await
    }

    /// Re-fetch and replace the cached settings wholesale.
    ///
    /// Last write wins; there is no partial merge.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; the previous cache is kept.
    pub async fn refresh(&self) -> Result<StoreSettings, HubError> {
        let settings = self.client.settings().await?;
        debug!(store_name = %settings.store_name, currency = %settings.currency, "settings refreshed");

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(settings.clone());
        Ok(settings)
    }

    /// Format an amount in the store's active currency.
    ///
    /// Two fixed decimal places with thousands grouping; a plain `$` prefix
    /// when no settings are loaded.
    #[must_use]
    pub fn format_price(&self, amount: Decimal) -> String {
        self.current().map_or_else(
            || Currency::Usd.format_amount(amount),
            |settings| settings.currency.format_amount(amount),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::HubConfig;
    use creators_hub_core::SocialMedia;

    fn unreachable_store() -> SettingsStore {
        let config = HubConfig::new("http://127.0.0.1:9", "/tmp/unused");
        SettingsStore::new(HubClient::new(&config))
    }

    fn ngn_settings() -> StoreSettings {
        StoreSettings {
            store_name: "Creators Hub".to_owned(),
            currency: Currency::Ngn,
            support_email: "help@creatorshub.example".to_owned(),
            address: String::new(),
            social_media: SocialMedia::default(),
        }
    }

    #[test]
    fn test_format_price_falls_back_to_dollar() {
        let store = unreachable_store();
        assert_eq!(store.format_price(Decimal::new(199, 1)), "$19.90");
    }

    #[test]
    fn test_format_price_uses_active_currency() {
        let store = unreachable_store();
        *store.current.write().unwrap() = Some(ngn_settings());
        assert_eq!(store.format_price(Decimal::new(199, 1)), "₦19.90");
        assert_eq!(store.format_price(Decimal::new(12345, 1)), "₦1,234.50");
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_cache() {
        let store = unreachable_store();
        *store.current.write().unwrap() = Some(ngn_settings());

        assert!(store.refresh().await.is_err());
        assert_eq!(store.current().unwrap().currency, Currency::Ngn);
    }
}
