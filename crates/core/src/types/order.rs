//! Order domain types.
//!
//! Orders are server-owned: this layer renders what the backend returns and
//! issues transition requests ("mark delivered"), never computing state
//! transitions or totals for persisted orders itself.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::{OrderId, ProductId, UserId};
use crate::types::status::OrderStatus;

/// One product entry within an order, denormalized at purchase time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product purchased.
    pub product: ProductId,
    pub name: String,
    pub qty: u32,
    #[serde(default)]
    pub image: String,
    /// Unit price at purchase time.
    pub price: Decimal,
}

/// Shipping destination captured at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

/// Minimal owner summary embedded in admin order listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUser {
    #[serde(alias = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A placed order as reported by the Hub backend.
///
/// `status` and the `is_paid`/`is_delivered` flags are independent,
/// backend-owned vocabularies; neither is derived from the other here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub user: Option<OrderUser>,
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub items_price: Decimal,
    pub tax_price: Decimal,
    pub shipping_price: Decimal,
    pub total_price: Decimal,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_order() {
        let json = r#"{
            "_id": "ord-1",
            "user": {"_id": "u-1", "name": "Ada", "email": "ada@example.com"},
            "orderItems": [
                {"product": "p-1", "name": "Ring Light", "qty": 2, "image": "", "price": 25.0}
            ],
            "shippingAddress": {
                "address": "1 Maker Way", "city": "Lagos",
                "postalCode": "100001", "country": "USA"
            },
            "paymentMethod": "Credit Card",
            "itemsPrice": 50.0,
            "taxPrice": 0.0,
            "shippingPrice": 10.0,
            "totalPrice": 60.0,
            "isPaid": false,
            "isDelivered": false,
            "status": "processing",
            "createdAt": "2026-05-01T12:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id.as_str(), "ord-1");
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total_price, Decimal::new(60, 0));
        assert!(!order.is_delivered);
        assert!(order.delivered_at.is_none());
        assert_eq!(order.user.unwrap().id.as_str(), "u-1");
    }
}
