//! Admin REST API client.
//!
//! Owns the back-office endpoints the storefront client never touches.
//! Same conventions as the storefront gateway: one method per endpoint,
//! bearer auth per call, both failure channels collapsed into
//! [`HubError`]. Destructive team operations (role change, account
//! deletion) additionally carry the acting admin's password for backend
//! re-confirmation.

use std::sync::Arc;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, instrument};

use creators_hub_core::{Order, OrderId, Product, ProductId, Role, StoreSettings, UserId};
use creators_hub_storefront::HubConfig;
use creators_hub_storefront::hub::HubError;
use creators_hub_storefront::hub::types::{
    AckEnvelope, DataEnvelope, ErrorBody, OrdersEnvelope, ProductPayload, UserProfile,
    UsersEnvelope,
};

/// Errors from admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Changing your own role is refused client-side.
    #[error("you cannot change your own role")]
    OwnRoleChange,

    /// Deleting your own account is refused client-side.
    #[error("you cannot delete your own account")]
    OwnAccountDelete,

    /// The backend rejected the request or the request failed.
    #[error(transparent)]
    Api(#[from] HubError),
}

/// Client for the admin endpoints of the Hub backend.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl AdminClient {
    /// Create a new admin API client.
    #[must_use]
    pub fn new(config: &HubConfig) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.clone(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, HubError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| body.chars().take(200).collect());
            debug!(status = %status, message = %message, "admin api error");
            return Err(HubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn execute_ack(&self, request: RequestBuilder) -> Result<(), HubError> {
        let envelope: AckEnvelope = self.execute(request).await?;
        if envelope.success {
            Ok(())
        } else {
            Err(HubError::Api {
                status: 200,
                message: envelope
                    .error
                    .unwrap_or_else(|| "request rejected".to_string()),
            })
        }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is rejected or the request fails.
    #[instrument(skip(self, payload, token), fields(name = %payload.name))]
    pub async fn create_product(
        &self,
        payload: &ProductPayload,
        token: &str,
    ) -> Result<Product, HubError> {
        let envelope: DataEnvelope<Product> = self
            .execute(
                self.inner
                    .client
                    .post(self.url("/products"))
                    .bearer_auth(token)
                    .json(payload),
            )
            .await?;
        info!(product_id = %envelope.data.id, "product created");
        Ok(envelope.data)
    }

    /// Update a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self, payload, token), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        payload: &ProductPayload,
        token: &str,
    ) -> Result<Product, HubError> {
        let envelope: DataEnvelope<Product> = self
            .execute(
                self.inner
                    .client
                    .put(self.url(&format!("/products/{id}")))
                    .bearer_auth(token)
                    .json(payload),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self, token), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId, token: &str) -> Result<(), HubError> {
        self.execute_ack(
            self.inner
                .client
                .delete(self.url(&format!("/products/{id}")))
                .bearer_auth(token),
        )
        .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List all orders across customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn orders(&self, token: &str) -> Result<Vec<Order>, HubError> {
        let envelope: OrdersEnvelope = self
            .execute(
                self.inner
                    .client
                    .get(self.url("/orders"))
                    .bearer_auth(token),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Mark an order as delivered.
    ///
    /// A transition *request*: the backend owns the order's state and
    /// returns the updated document.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self, token), fields(order_id = %id))]
    pub async fn mark_delivered(&self, id: &OrderId, token: &str) -> Result<Order, HubError> {
        let envelope: DataEnvelope<Order> = self
            .execute(
                self.inner
                    .client
                    .put(self.url(&format!("/orders/{id}/deliver")))
                    .bearer_auth(token),
            )
            .await?;
        info!(order_id = %id, "order marked delivered");
        Ok(envelope.data)
    }

    // =========================================================================
    // Customers & team
    // =========================================================================

    /// List all user accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn users(&self, token: &str) -> Result<Vec<UserProfile>, HubError> {
        let envelope: UsersEnvelope = self
            .execute(self.inner.client.get(self.url("/users")).bearer_auth(token))
            .await?;
        Ok(envelope.users)
    }

    /// Change a user's role.
    ///
    /// Carries the acting admin's password for backend re-confirmation.
    /// Changing your own role is refused before any request is made (the
    /// backend refuses it too; this just fails faster).
    ///
    /// # Errors
    ///
    /// Returns an error if the target is the acting admin, the password
    /// does not re-confirm, or the request fails.
    #[instrument(skip(self, password, token), fields(target = %target, role = %role))]
    pub async fn update_user_role(
        &self,
        acting: &UserId,
        target: &UserId,
        role: Role,
        password: &str,
        token: &str,
    ) -> Result<(), AdminError> {
        if acting == target {
            return Err(AdminError::OwnRoleChange);
        }

        self.execute_ack(
            self.inner
                .client
                .put(self.url(&format!("/users/{target}")))
                .bearer_auth(token)
                .json(&serde_json::json!({ "role": role, "password": password })),
        )
        .await?;
        info!(target = %target, role = %role, "user role updated");
        Ok(())
    }

    /// Delete a user account.
    ///
    /// Carries the acting admin's password for backend re-confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is the acting admin, the password
    /// does not re-confirm, or the request fails.
    #[instrument(skip(self, password, token), fields(target = %target))]
    pub async fn delete_user(
        &self,
        acting: &UserId,
        target: &UserId,
        password: &str,
        token: &str,
    ) -> Result<(), AdminError> {
        if acting == target {
            return Err(AdminError::OwnAccountDelete);
        }

        self.execute_ack(
            self.inner
                .client
                .delete(self.url(&format!("/users/{target}")))
                .bearer_auth(token)
                .json(&serde_json::json!({ "password": password })),
        )
        .await?;
        info!(target = %target, "user deleted");
        Ok(())
    }

    // =========================================================================
    // Analytics & settings
    // =========================================================================

    /// Fetch the analytics dashboard payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn analytics(&self, token: &str) -> Result<crate::types::AnalyticsReport, HubError> {
        let envelope: DataEnvelope<crate::types::AnalyticsReport> = self
            .execute(
                self.inner
                    .client
                    .get(self.url("/analytics"))
                    .bearer_auth(token),
            )
            .await?;
        Ok(envelope.data)
    }

    /// Replace the store settings.
    ///
    /// Callers should `refresh()` their settings store afterwards; the
    /// update here does not touch any cached copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is rejected or the request fails.
    #[instrument(skip(self, settings, token))]
    pub async fn update_settings(
        &self,
        settings: &StoreSettings,
        token: &str,
    ) -> Result<StoreSettings, HubError> {
        let envelope: DataEnvelope<StoreSettings> = self
            .execute(
                self.inner
                    .client
                    .put(self.url("/settings"))
                    .bearer_auth(token)
                    .json(settings),
            )
            .await?;
        info!(store_name = %envelope.data.store_name, "settings updated");
        Ok(envelope.data)
    }
}
