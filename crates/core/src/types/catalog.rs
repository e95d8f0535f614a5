//! Catalog domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A product in the store catalog.
///
/// This doubles as the wire shape for the Hub backend's product endpoints.
/// The backend names its primary key `_id` on some endpoints and `id` on
/// others; the alias below normalizes both spellings into the one canonical
/// field so nothing downstream ever branches on which was present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Canonical product identifier.
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    /// Hosted image URL.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: String,
    /// Creator niches this product is tagged with. Older backend payloads
    /// used the plural `niches` key.
    #[serde(default, alias = "niches")]
    pub niche: Vec<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub count_in_stock: Option<u32>,
}
