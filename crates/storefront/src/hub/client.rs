//! Hub REST API client implementation.

use std::sync::Arc;

use reqwest::RequestBuilder;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use creators_hub_core::{Order, OrderId, Product, ProductId, StoreSettings};

use crate::config::HubConfig;

use super::HubError;
use super::types::{
    AckEnvelope, AuthEnvelope, AuthReply, CreatedOrderEnvelope, Credentials, DataEnvelope,
    ErrorBody, MeEnvelope, OrderDraft, OrdersEnvelope, ProductQuery, ProfileUpdate, Registration,
    UploadEnvelope, UserProfile,
};

// =============================================================================
// HubClient
// =============================================================================

/// Client for the Creators Hub backend API.
///
/// Stateless: one HTTP request per method call, no retries, no caching, no
/// request timeout beyond the transport's own. Cheaply cloneable.
#[derive(Clone)]
pub struct HubClient {
    inner: Arc<HubClientInner>,
}

struct HubClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl HubClient {
    /// Create a new Hub API client.
    #[must_use]
    pub fn new(config: &HubConfig) -> Self {
        Self {
            inner: Arc::new(HubClientInner {
                client: reqwest::Client::new(),
                base_url: config.api_url.clone(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.inner.client.get(self.url(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.inner.client.post(self.url(path))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.inner.client.put(self.url(path))
    }

    /// Execute a request, collapsing both failure channels into [`HubError`].
    ///
    /// Non-2xx responses are converted into [`HubError::Api`] with the
    /// message extracted from the backend's error body when present.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, HubError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| body.chars().take(200).collect());
            debug!(status = %status, message = %message, "hub api error");
            return Err(HubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Execute an auth request, parsing the envelope from the body
    /// regardless of HTTP status (a 401 can still carry
    /// `requiresVerification`).
    async fn execute_auth(
        &self,
        request: RequestBuilder,
        fallback_email: Option<&str>,
    ) -> Result<AuthReply, HubError> {
        let response = request.send().await?;
        let body = response.text().await?;
        let envelope: AuthEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.into_reply(fallback_email))
    }

    /// Execute a request whose reply is just an acknowledgement.
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
    // Auth
    // =========================================================================

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable body; an
    /// application-level rejection is an [`AuthReply`], not an error.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthReply, HubError> {
        self.execute_auth(
            self.post("/auth/login").json(credentials),
            Some(&credentials.email),
        )
        .await
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable body.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<AuthReply, HubError> {
        self.execute_auth(
            self.post("/auth/register").json(registration),
            Some(&registration.email),
        )
        .await
    }

    /// Fetch the profile for a bearer token (session bootstrap).
    ///
    /// # Errors
    ///
    /// Returns an error if the token is stale or the request fails.
    #[instrument(skip(self, token))]
    pub async fn me(&self, token: &str) -> Result<UserProfile, HubError> {
        let envelope: MeEnvelope = self.execute(self.get("/auth/me").bearer_auth(token)).await?;
        if !envelope.success {
            return Err(HubError::Api {
                status: 200,
                message: "session rejected".to_string(),
            });
        }
        Ok(envelope.user)
    }

    /// Update the authenticated user's profile and/or password.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected or the request fails.
    #[instrument(skip(self, update, token))]
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
        token: &str,
    ) -> Result<UserProfile, HubError> {
        let envelope: MeEnvelope = self
            .execute(self.put("/auth/profile").bearer_auth(token).json(update))
            .await?;
        if !envelope.success {
            return Err(HubError::Api {
                status: 200,
                message: "profile update rejected".to_string(),
            });
        }
        Ok(envelope.user)
    }

    /// Re-confirm the authenticated user's password (used before sensitive
    /// admin operations).
    ///
    /// # Errors
    ///
    /// Returns an error if the password does not match or the request fails.
    #[instrument(skip(self, password, token))]
    pub async fn verify_password(&self, password: &str, token: &str) -> Result<(), HubError> {
        self.execute_ack(
            self.post("/auth/verify-password")
                .bearer_auth(token)
                .json(&serde_json::json!({ "password": password })),
        )
        .await
    }

    /// Request a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn forgot_password(&self, email: &str) -> Result<(), HubError> {
        self.execute_ack(
            self.post("/auth/forgotpassword")
                .json(&serde_json::json!({ "email": email })),
        )
        .await
    }

    /// Redeem a password-reset token.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable body.
    #[instrument(skip(self, reset_token, password))]
    pub async fn reset_password(
        &self,
        reset_token: &str,
        password: &str,
    ) -> Result<AuthReply, HubError> {
        self.execute_auth(
            self.put(&format!("/auth/resetpassword/{reset_token}"))
                .json(&serde_json::json!({ "password": password })),
            None,
        )
        .await
    }

    /// Submit an email verification code.
    ///
    /// On success the backend issues a fresh token and profile, so the
    /// reply can move straight to `Authenticated`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an unparseable body.
    #[instrument(skip(self, code), fields(email = %email))]
    pub async fn verify_email(&self, email: &str, code: &str) -> Result<AuthReply, HubError> {
        self.execute_auth(
            self.post("/auth/verify-email")
                .json(&serde_json::json!({ "email": email, "code": code })),
            Some(email),
        )
        .await
    }

    /// Ask the backend to resend the verification code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn resend_code(&self, email: &str) -> Result<(), HubError> {
        self.execute_ack(
            self.post("/auth/resend-code")
                .json(&serde_json::json!({ "email": email })),
        )
        .await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// List products matching the given filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, query))]
    pub async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, HubError> {
        let envelope: DataEnvelope<Vec<Product>> = self
            .execute(self.get("/products").query(&query.query_pairs()))
            .await?;
        debug!(count = envelope.data.len(), "fetched products");
        Ok(envelope.data)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<Product, HubError> {
        let envelope: DataEnvelope<Product> =
            self.execute(self.get(&format!("/products/{id}"))).await?;
        Ok(envelope.data)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Place an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is rejected or the request fails.
    #[instrument(skip(self, draft, token))]
    pub async fn create_order(&self, draft: &OrderDraft, token: &str) -> Result<OrderId, HubError> {
        let envelope: CreatedOrderEnvelope = self
            .execute(self.post("/orders").bearer_auth(token).json(draft))
            .await?;

        envelope
            .id
            .or_else(|| envelope.order.map(|o| o.id))
            .ok_or_else(|| HubError::Api {
                status: 200,
                message: if envelope.success {
                    "order created but no id returned".to_string()
                } else {
                    "failed to create order".to_string()
                },
            })
    }

    /// List the authenticated user's own orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn my_orders(&self, token: &str) -> Result<Vec<Order>, HubError> {
        let envelope: OrdersEnvelope = self
            .execute(self.get("/orders/myorders").bearer_auth(token))
            .await?;
        Ok(envelope.data)
    }

    /// Get a single order by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self, token), fields(order_id = %id))]
    pub async fn order(&self, id: &OrderId, token: &str) -> Result<Order, HubError> {
        let envelope: DataEnvelope<Order> = self
            .execute(self.get(&format!("/orders/{id}")).bearer_auth(token))
            .await?;
        Ok(envelope.data)
    }

    // =========================================================================
    // Settings & uploads
    // =========================================================================

    /// Fetch store settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn settings(&self) -> Result<StoreSettings, HubError> {
        let envelope: DataEnvelope<StoreSettings> = self.execute(self.get("/settings")).await?;
        Ok(envelope.data)
    }

    /// Upload an image; returns the hosted URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload is rejected or the request fails.
    #[instrument(skip(self, bytes), fields(filename = %filename, size = bytes.len()))]
    pub async fn upload_image(&self, filename: &str, bytes: Vec<u8>) -> Result<String, HubError> {
        let part = Part::bytes(bytes).file_name(filename.to_owned());
        let form = Form::new().part("image", part);

        let envelope: UploadEnvelope = self.execute(self.post("/upload").multipart(form)).await?;

        if !envelope.success {
            return Err(HubError::Api {
                status: 200,
                message: envelope.error.unwrap_or_else(|| "upload failed".to_string()),
            });
        }

        envelope.url.ok_or_else(|| HubError::Api {
            status: 200,
            message: "upload succeeded but no url returned".to_string(),
        })
    }
}
