//! Cart store.
//!
//! Pure client-side accumulator: the only server round-trip involving the
//! cart is checkout, and that lives elsewhere. Every mutation synchronously
//! persists the full line list; construction rehydrates it, so the cart
//! survives restarts and is independent of the session.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::warn;

use creators_hub_core::{Product, ProductId};

use crate::storage::{KeyValueStore, keys};

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price as listed when the line was added.
    pub unit_price: Decimal,
    pub image: String,
    pub quantity: u32,
}

impl CartLine {
    /// Line total: unit price times quantity.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Owner of the in-progress order.
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    lines: watch::Sender<Vec<CartLine>>,
}

impl CartStore {
    /// Create a store, rehydrating any persisted line list.
    ///
    /// A missing or unreadable record rehydrates as an empty cart.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let initial = storage
            .get(keys::CART)
            .and_then(|raw| match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => Some(lines),
                Err(e) => {
                    warn!(error = %e, "stored cart unreadable, starting empty");
                    None
                }
            })
            .unwrap_or_default();

        let (lines, _) = watch::channel(initial);
        Self { storage, lines }
    }

    // =========================================================================
    // Readers
    // =========================================================================

    /// Snapshot of the current lines.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.borrow().clone()
    }

    /// Total number of items across all lines, recomputed on every read.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.lines
            .borrow()
            .iter()
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.borrow().iter().map(CartLine::total).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    /// Observe line-list changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartLine>> {
        self.lines.subscribe()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a product: an existing line increments by one, otherwise a new
    /// line is appended with quantity 1.
    pub fn add(&self, product: &Product) {
        self.apply(|lines| {
            if let Some(line) = lines.iter_mut().find(|line| line.product_id == product.id) {
                line.quantity = line.quantity.saturating_add(1);
            } else {
                lines.push(CartLine {
                    product_id: product.id.clone(),
                    name: product.name.clone(),
                    unit_price: product.price,
                    image: product.image.clone(),
                    quantity: 1,
                });
            }
        });
    }

    /// Set a line's quantity. Zero removes the line entirely - the cart
    /// never retains zero-quantity records.
    pub fn update_quantity(&self, id: &ProductId, quantity: u32) {
        self.apply(|lines| {
            if quantity == 0 {
                lines.retain(|line| line.product_id != *id);
            } else if let Some(line) = lines.iter_mut().find(|line| line.product_id == *id) {
                line.quantity = quantity;
            }
        });
    }

    /// Remove a line unconditionally.
    pub fn remove(&self, id: &ProductId) {
        self.apply(|lines| lines.retain(|line| line.product_id != *id));
    }

    /// Empty the cart.
    pub fn clear(&self) {
        self.apply(Vec::clear);
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Apply a mutation and synchronously persist the full line list.
    fn apply(&self, mutate: impl FnOnce(&mut Vec<CartLine>)) {
        self.lines.send_modify(mutate);
        self.persist();
    }

    fn persist(&self) {
        let lines = self.lines.borrow();
        match serde_json::to_string(&*lines) {
            Ok(json) => self.storage.put(keys::CART, &json),
            Err(e) => warn!(error = %e, "failed to serialize cart"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn product(id: &str, name: &str, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price,
            image: String::new(),
            description: String::new(),
            category: String::new(),
            brand: String::new(),
            niche: Vec::new(),
            is_featured: false,
            count_in_stock: None,
        }
    }

    #[test]
    fn test_add_twice_increments_single_line() {
        let cart = CartStore::new(Arc::new(MemoryStore::new()));
        let p = product("p-1", "Ring Light", Decimal::new(2500, 2));

        cart.add(&p);
        cart.add(&p);

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().unwrap().quantity, 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_update_quantity_zero_removes_line() {
        let cart = CartStore::new(Arc::new(MemoryStore::new()));
        let p = product("p-1", "Ring Light", Decimal::new(2500, 2));
        cart.add(&p);

        cart.update_quantity(&p.id, 0);

        assert!(cart.lines().iter().all(|line| line.product_id != p.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_exact_value() {
        let cart = CartStore::new(Arc::new(MemoryStore::new()));
        let p = product("p-1", "Ring Light", Decimal::new(2500, 2));
        cart.add(&p);

        cart.update_quantity(&p.id, 5);
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_subtotal_and_clear() {
        let cart = CartStore::new(Arc::new(MemoryStore::new()));
        let a = product("p-a", "A", Decimal::new(2500, 2)); // 25.00
        let b = product("p-b", "B", Decimal::new(1000, 2)); // 10.00

        cart.add(&a);
        cart.add(&b);
        cart.add(&b);

        assert_eq!(cart.subtotal(), Decimal::new(4500, 2)); // 45.00
        assert_eq!(cart.count(), 3);

        cart.clear();
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_persist_and_rehydrate_roundtrip() {
        let storage = Arc::new(MemoryStore::new());
        let cart = CartStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStore>);
        let p = product("p-1", "Ring Light", Decimal::new(2500, 2));
        cart.add(&p);
        cart.add(&p);

        let persisted = storage.get(keys::CART).unwrap();

        // Simulated reload: a fresh store over the same storage.
        let reloaded = CartStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStore>);
        assert_eq!(reloaded.lines(), cart.lines());

        // The rehydrated state re-serializes to the same bytes.
        assert_eq!(serde_json::to_string(&reloaded.lines()).unwrap(), persisted);
    }

    #[test]
    fn test_corrupt_record_rehydrates_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.put(keys::CART, "{not json");

        let cart = CartStore::new(Arc::clone(&storage) as Arc<dyn KeyValueStore>);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_is_unconditional() {
        let cart = CartStore::new(Arc::new(MemoryStore::new()));
        let p = product("p-1", "Ring Light", Decimal::new(2500, 2));
        cart.add(&p);
        cart.update_quantity(&p.id, 4);

        cart.remove(&p.id);
        assert!(cart.is_empty());

        // Removing an absent line is a no-op.
        cart.remove(&p.id);
        assert!(cart.is_empty());
    }
}
