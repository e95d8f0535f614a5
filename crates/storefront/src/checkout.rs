//! Checkout: turn the cart into an order draft and place it.
//!
//! The one flow where the cart meets the network. Draft totals are computed
//! client-side (the storefront has always shown them before submission);
//! the backend revalidates and owns the persisted order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use creators_hub_core::{OrderId, OrderItem, ShippingAddress, commerce};

use crate::hub::{HubError, types::OrderDraft};
use crate::state::AppState;
use crate::storage::keys;
use crate::stores::CartLine;

/// Shipping details collected at checkout.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    /// Defaults to [`commerce::DEFAULT_COUNTRY`] when empty.
    pub country: String,
}

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requires a session.
    #[error("log in to complete your purchase")]
    NotAuthenticated,

    /// Nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// The backend rejected the draft or the request failed.
    #[error(transparent)]
    Api(#[from] HubError),
}

/// Record of the most recently placed order, for the success view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastOrder {
    pub id: OrderId,
    pub items: Vec<CartLine>,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}

impl AppState {
    /// Place an order from the current cart.
    ///
    /// On success the `last-order` record is written, the cart is cleared,
    /// and the new order's id is returned.
    ///
    /// # Errors
    ///
    /// Returns an error when not logged in, when the cart is empty, or when
    /// the backend rejects the draft. The cart is left untouched on every
    /// error path so the shopper can retry.
    pub async fn checkout(&self, form: CheckoutForm) -> Result<OrderId, CheckoutError> {
        let session = self
            .session()
            .session()
            .ok_or(CheckoutError::NotAuthenticated)?;

        let lines = self.cart().lines();
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let subtotal = self.cart().subtotal();
        let shipping = commerce::flat_shipping();
        let tax = (subtotal * commerce::tax_rate()).round_dp(2);
        let total = subtotal + tax + shipping;

        let order_items: Vec<OrderItem> = lines
            .iter()
            .map(|line| OrderItem {
                product: line.product_id.clone(),
                name: line.name.clone(),
                qty: line.quantity,
                image: line.image.clone(),
                price: line.unit_price,
            })
            .collect();

        let country = if form.country.is_empty() {
            commerce::DEFAULT_COUNTRY.to_owned()
        } else {
            form.country
        };

        let draft = OrderDraft {
            order_items,
            shipping_address: ShippingAddress {
                address: form.address,
                city: form.city,
                postal_code: form.postal_code,
                country,
            },
            // The only method the payment provider integration supports.
            payment_method: "Credit Card".to_owned(),
            items_price: subtotal,
            tax_price: tax,
            shipping_price: shipping,
            total_price: total,
        };

        let order_id = self.client().create_order(&draft, session.token()).await?;
        info!(order_id = %order_id, total = %total, "order placed");

        let record = LastOrder {
            id: order_id.clone(),
            items: lines,
            subtotal,
            shipping,
            total,
            placed_at: Utc::now(),
        };
        if let Ok(json) = serde_json::to_string(&record) {
            self.storage().put(keys::LAST_ORDER, &json);
        }

        self.cart().clear();
        Ok(order_id)
    }

    /// The most recently placed order, if one has been recorded.
    #[must_use]
    pub fn last_order(&self) -> Option<LastOrder> {
        let raw = self.storage().get(keys::LAST_ORDER)?;
        serde_json::from_str(&raw).ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::HubConfig;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn state_with_no_backend() -> AppState {
        let config = HubConfig::new("http://127.0.0.1:9", "/tmp/unused");
        AppState::with_storage(config, Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_checkout_requires_session() {
        let state = state_with_no_backend();
        let result = state
            .checkout(CheckoutForm {
                address: "1 Maker Way".to_owned(),
                city: "Lagos".to_owned(),
                postal_code: "100001".to_owned(),
                country: String::new(),
            })
            .await;
        assert!(matches!(result, Err(CheckoutError::NotAuthenticated)));
    }

    #[test]
    fn test_last_order_absent_by_default() {
        let state = state_with_no_backend();
        assert!(state.last_order().is_none());
    }
}
