//! Store configuration as served by the Hub backend.

use serde::{Deserialize, Serialize};

use crate::types::money::Currency;

/// Social media links shown in the storefront footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SocialMedia {
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub youtube: String,
}

/// Store-wide configuration.
///
/// Read-mostly: fetched once at startup and replaced wholesale after an
/// admin update (last write wins, no partial merge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_name: String,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub support_email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub social_media: SocialMedia,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_settings() {
        let json = r#"{
            "storeName": "Creators Hub",
            "currency": "NGN",
            "supportEmail": "help@creatorshub.example",
            "address": "12 Admiralty Way, Lekki",
            "socialMedia": {"twitter": "https://x.com/creatorshub"}
        }"#;
        let settings: StoreSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.currency, Currency::Ngn);
        assert_eq!(settings.social_media.twitter, "https://x.com/creatorshub");
        assert!(settings.social_media.youtube.is_empty());
    }
}
