//! Wire types for the Hub backend's JSON contract.
//!
//! Identifier normalization happens here: backend payloads spell the
//! primary key `_id` or `id` depending on the endpoint, and every wire
//! struct aliases both into the canonical `id` field. Downstream stores and
//! views never see the difference.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use creators_hub_core::{Email, OrderItem, Role, ShippingAddress, UserId};

// =============================================================================
// Requests
// =============================================================================

/// Login credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// New-account registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Partial profile update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Catalog filters for `GET /products`.
///
/// Parameter names follow the backend contract (`isFeatured`, `search`).
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub niche: Option<String>,
    pub featured: Option<bool>,
    pub search: Option<String>,
}

impl ProductQuery {
    /// Render the filters as query pairs, skipping unset fields.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(niche) = &self.niche {
            pairs.push(("niche", niche.clone()));
        }
        if let Some(featured) = self.featured {
            pairs.push(("isFeatured", featured.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Product create/update payload for the admin endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub price: Decimal,
    pub image: String,
    pub description: String,
    pub category: String,
    pub brand: String,
    pub niche: Vec<String>,
    pub is_featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_in_stock: Option<u32>,
}

/// Order draft posted at checkout.
///
/// Totals are computed client-side for the draft, as the storefront always
/// has; the backend revalidates and owns the persisted figures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub items_price: Decimal,
    pub tax_price: Decimal,
    pub shipping_price: Decimal,
    pub total_price: Decimal,
}

// =============================================================================
// Responses
// =============================================================================

/// Authenticated user profile as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    pub email: Email,
    #[serde(default)]
    pub role: Role,
}

/// Normalized outcome of an auth endpoint.
///
/// The backend can signal "credentials fine, email unverified" inside an
/// error body, so this is a tri-state rather than a plain `Result`.
#[derive(Debug, Clone)]
pub enum AuthReply {
    /// Credentials accepted; a fresh token and profile were issued.
    Authenticated { token: String, user: UserProfile },
    /// Credentials accepted but the account's email is unverified.
    VerificationRequired { email: String },
    /// The backend rejected the request.
    Rejected { message: String },
}

/// Raw auth endpoint envelope, parsed from the body regardless of status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub requires_verification: bool,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AuthEnvelope {
    /// Collapse the envelope into a typed reply.
    ///
    /// `fallback_email` covers backends that set `requiresVerification`
    /// without echoing the address (the caller knows what it submitted).
    pub(crate) fn into_reply(self, fallback_email: Option<&str>) -> AuthReply {
        if self.requires_verification {
            let email = self
                .email
                .or_else(|| fallback_email.map(str::to_owned))
                .unwrap_or_default();
            return AuthReply::VerificationRequired { email };
        }

        if self.success
            && let (Some(token), Some(user)) = (self.token, self.user)
            && !token.is_empty()
        {
            return AuthReply::Authenticated { token, user };
        }

        AuthReply::Rejected {
            message: self
                .error
                .unwrap_or_else(|| "authentication failed".to_string()),
        }
    }
}

/// Standard `{success, data}` envelope for read endpoints.
#[derive(Debug, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: T,
}

/// `GET /auth/me` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct MeEnvelope {
    #[serde(default)]
    pub success: bool,
    pub user: UserProfile,
}

/// Order listing envelope; older backend builds used an `orders` key.
#[derive(Debug, Deserialize)]
pub struct OrdersEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(alias = "orders")]
    pub data: Vec<creators_hub_core::Order>,
}

/// `GET /users` envelope.
#[derive(Debug, Deserialize)]
pub struct UsersEnvelope {
    #[serde(default)]
    pub success: bool,
    pub users: Vec<UserProfile>,
}

/// Order creation reply; tolerant of both `{success, order}` and a bare
/// order document.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedOrderEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, alias = "_id")]
    pub id: Option<creators_hub_core::OrderId>,
    #[serde(default)]
    pub order: Option<CreatedOrderRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedOrderRef {
    #[serde(alias = "_id")]
    pub id: creators_hub_core::OrderId,
}

/// `POST /upload` reply.
#[derive(Debug, Deserialize)]
pub(crate) struct UploadEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Bare acknowledgement reply (`{success, error?}`).
#[derive(Debug, Deserialize)]
pub struct AckEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Error body shape the backend uses for 4xx/5xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default, alias = "message")]
    pub error: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_envelope_verification_required_from_error_body() {
        // A 401 body: success is false but the flag still matters.
        let envelope: AuthEnvelope = serde_json::from_str(
            r#"{"success": false, "error": "Email not verified", "requiresVerification": true}"#,
        )
        .unwrap();
        let reply = envelope.into_reply(Some("ada@example.com"));
        match reply {
            AuthReply::VerificationRequired { email } => assert_eq!(email, "ada@example.com"),
            other => panic!("expected VerificationRequired, got {other:?}"),
        }
    }

    #[test]
    fn test_auth_envelope_authenticated() {
        let envelope: AuthEnvelope = serde_json::from_str(
            r#"{
                "success": true,
                "token": "tok-123",
                "user": {"_id": "u-1", "name": "Ada", "email": "ada@example.com", "role": "admin"}
            }"#,
        )
        .unwrap();
        match envelope.into_reply(None) {
            AuthReply::Authenticated { token, user } => {
                assert_eq!(token, "tok-123");
                assert_eq!(user.role, Role::Admin);
            }
            other => panic!("expected Authenticated, got {other:?}"),
        }
    }

    #[test]
    fn test_auth_envelope_empty_token_is_rejected() {
        let envelope: AuthEnvelope = serde_json::from_str(
            r#"{
                "success": true,
                "token": "",
                "user": {"_id": "u-1", "name": "Ada", "email": "ada@example.com", "role": "user"}
            }"#,
        )
        .unwrap();
        assert!(matches!(
            envelope.into_reply(None),
            AuthReply::Rejected { .. }
        ));
    }

    #[test]
    fn test_product_query_pairs() {
        let query = ProductQuery {
            category: Some("lighting".to_owned()),
            featured: Some(true),
            ..ProductQuery::default()
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("category", "lighting".to_owned()),
                ("isFeatured", "true".to_owned())
            ]
        );
    }

    #[test]
    fn test_orders_envelope_accepts_legacy_key() {
        let envelope: OrdersEnvelope =
            serde_json::from_str(r#"{"success": true, "orders": []}"#).unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_empty());
    }
}
