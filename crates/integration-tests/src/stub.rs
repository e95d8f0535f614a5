//! In-process stub of the Creators Hub backend.
//!
//! Implements just enough of the REST contract for the client stack to run
//! end-to-end: the same envelopes, the same Mongo-style `_id` spelling in
//! documents, the same `requiresVerification` signal inside 401 bodies.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

/// Verification code the stub issues to every unverified account.
pub const VERIFICATION_CODE: &str = "482913";

/// Seeded admin account.
pub const ADMIN_EMAIL: &str = "admin@creatorshub.example";
pub const ADMIN_PASSWORD: &str = "orbit-falcon-9921";

/// Seeded verified customer account.
pub const USER_EMAIL: &str = "ada@example.com";
pub const USER_PASSWORD: &str = "lumen-paradox-33";

/// Seeded unverified account.
pub const UNVERIFIED_EMAIL: &str = "newbie@example.com";
pub const UNVERIFIED_PASSWORD: &str = "fresh-start-77";

/// Seeded product ids.
pub const RING_LIGHT_ID: &str = "p-ring-light";
pub const BOOM_ARM_ID: &str = "p-boom-arm";

#[derive(Clone)]
struct StubUser {
    id: String,
    name: String,
    email: String,
    password: String,
    role: String,
    verified: bool,
}

struct StoredOrder {
    owner_id: String,
    doc: Value,
}

/// Shared state behind the stub's routes.
pub struct StubState {
    products: Mutex<Vec<Value>>,
    users: Mutex<Vec<StubUser>>,
    tokens: Mutex<HashMap<String, String>>,
    orders: Mutex<Vec<StoredOrder>>,
    settings: Mutex<Value>,
}

impl StubState {
    fn seeded() -> Self {
        let products = vec![
            json!({
                "_id": RING_LIGHT_ID,
                "name": "Ring Light",
                "price": 25.0,
                "image": "https://cdn.creatorshub.example/ring-light.jpg",
                "description": "18-inch bi-color ring light",
                "category": "lighting",
                "brand": "Lumina",
                "niche": ["streaming", "video"],
                "isFeatured": true,
                "countInStock": 12
            }),
            json!({
                "_id": BOOM_ARM_ID,
                "name": "Boom Arm",
                "price": 10.0,
                "image": "https://cdn.creatorshub.example/boom-arm.jpg",
                "description": "Desk-clamp microphone boom arm",
                "category": "audio",
                "brand": "Clampco",
                "niche": ["podcasting"],
                "isFeatured": false,
                "countInStock": 40
            }),
        ];

        let users = vec![
            StubUser {
                id: "u-admin".to_owned(),
                name: "Site Admin".to_owned(),
                email: ADMIN_EMAIL.to_owned(),
                password: ADMIN_PASSWORD.to_owned(),
                role: "admin".to_owned(),
                verified: true,
            },
            StubUser {
                id: "u-ada".to_owned(),
                name: "Ada".to_owned(),
                email: USER_EMAIL.to_owned(),
                password: USER_PASSWORD.to_owned(),
                role: "user".to_owned(),
                verified: true,
            },
            StubUser {
                id: "u-newbie".to_owned(),
                name: "Newbie".to_owned(),
                email: UNVERIFIED_EMAIL.to_owned(),
                password: UNVERIFIED_PASSWORD.to_owned(),
                role: "user".to_owned(),
                verified: false,
            },
        ];

        let settings = json!({
            "storeName": "Creators Hub",
            "currency": "NGN",
            "supportEmail": "help@creatorshub.example",
            "address": "12 Admiralty Way, Lekki",
            "socialMedia": {
                "twitter": "https://x.com/creatorshub",
                "whatsapp": "", "instagram": "", "linkedin": "", "youtube": ""
            }
        });

        Self {
            products: Mutex::new(products),
            users: Mutex::new(users),
            tokens: Mutex::new(HashMap::new()),
            orders: Mutex::new(Vec::new()),
            settings: Mutex::new(settings),
        }
    }

    fn mint_token(&self, user_id: &str) -> String {
        let token = format!("tok-{:016x}", rand::random::<u64>());
        self.tokens
            .lock()
            .unwrap()
            .insert(token.clone(), user_id.to_owned());
        token
    }

    fn user_for_token(&self, headers: &HeaderMap) -> Option<StubUser> {
        let auth = headers.get("authorization")?.to_str().ok()?;
        let token = auth.strip_prefix("Bearer ")?;
        let user_id = self.tokens.lock().unwrap().get(token)?.clone();
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
    }
}

fn user_json(user: &StubUser) -> Value {
    json!({
        "_id": user.id,
        "name": user.name,
        "email": user.email,
        "role": user.role,
    })
}

fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "error": message })))
}

fn forbidden() -> (StatusCode, Json<Value>) {
    error_response(StatusCode::FORBIDDEN, "Not authorized as admin")
}

/// A running stub backend.
pub struct StubHub {
    addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubHub {
    /// Bind an ephemeral port and start serving.
    pub async fn spawn() -> Self {
        let state = Arc::new(StubState::seeded());
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Base URL to point `HUB_API_URL` at.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Invalidate every issued token (simulates server-side expiry).
    pub fn revoke_all_tokens(&self) {
        self.state.tokens.lock().unwrap().clear();
    }
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/me", get(me))
        .route("/auth/profile", put(update_profile))
        .route("/auth/verify-password", post(verify_password))
        .route("/auth/forgotpassword", post(forgot_password))
        .route("/auth/resetpassword/{token}", put(reset_password))
        .route("/auth/verify-email", post(verify_email))
        .route("/auth/resend-code", post(resend_code))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/myorders", get(my_orders))
        .route("/orders/{id}", get(get_order))
        .route("/orders/{id}/deliver", put(deliver_order))
        .route("/users", get(list_users))
        .route("/users/{id}", put(update_user).delete(delete_user))
        .route("/analytics", get(analytics))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/upload", post(upload))
        .with_state(state)
}

// =============================================================================
// Auth handlers
// =============================================================================

async fn login(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default().to_owned();
    let password = body["password"].as_str().unwrap_or_default();

    let user = state
        .users
        .lock()
        .unwrap()
        .iter()
        .find(|u| u.email == email)
        .cloned();

    let Some(user) = user else {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials");
    };
    if user.password != password {
        return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    if !user.verified {
        // The flag rides inside a 401 body, exactly like the real backend.
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "error": "Email not verified",
                "requiresVerification": true,
                "email": user.email,
            })),
        );
    }

    let token = state.mint_token(&user.id);
    (
        StatusCode::OK,
        Json(json!({ "success": true, "token": token, "user": user_json(&user) })),
    )
}

async fn register(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let name = body["name"].as_str().unwrap_or_default().to_owned();
    let email = body["email"].as_str().unwrap_or_default().to_owned();
    let password = body["password"].as_str().unwrap_or_default().to_owned();

    let mut users = state.users.lock().unwrap();
    if users.iter().any(|u| u.email == email) {
        return error_response(StatusCode::BAD_REQUEST, "User already exists");
    }

    users.push(StubUser {
        id: format!("u-{}", Uuid::new_v4().simple()),
        name,
        email: email.clone(),
        password,
        role: "user".to_owned(),
        verified: false,
    });

    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "requiresVerification": true, "email": email })),
    )
}

async fn me(State(state): State<Arc<StubState>>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match state.user_for_token(&headers) {
        Some(user) => (
            StatusCode::OK,
            Json(json!({ "success": true, "user": user_json(&user) })),
        ),
        None => error_response(StatusCode::UNAUTHORIZED, "Not authorized"),
    }
}

async fn update_profile(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(user) = state.user_for_token(&headers) else {
        return error_response(StatusCode::UNAUTHORIZED, "Not authorized");
    };

    let mut users = state.users.lock().unwrap();
    let Some(stored) = users.iter_mut().find(|u| u.id == user.id) else {
        return error_response(StatusCode::NOT_FOUND, "User not found");
    };

    if let Some(name) = body["name"].as_str() {
        stored.name = name.to_owned();
    }
    if let Some(email) = body["email"].as_str() {
        stored.email = email.to_owned();
    }
    if let Some(password) = body["password"].as_str() {
        stored.password = password.to_owned();
    }

    let doc = user_json(stored);
    (
        StatusCode::OK,
        Json(json!({ "success": true, "user": doc })),
    )
}

async fn verify_password(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(user) = state.user_for_token(&headers) else {
        return error_response(StatusCode::UNAUTHORIZED, "Not authorized");
    };
    if body["password"].as_str() == Some(user.password.as_str()) {
        (StatusCode::OK, Json(json!({ "success": true })))
    } else {
        error_response(StatusCode::UNAUTHORIZED, "Invalid password")
    }
}

async fn forgot_password(Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn reset_password(
    State(state): State<Arc<StubState>>,
    Path(reset_token): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    // Reset tokens are "reset-<user id>" in the stub.
    let Some(user_id) = reset_token.strip_prefix("reset-").map(str::to_owned) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid or expired token");
    };

    let mut users = state.users.lock().unwrap();
    let Some(stored) = users.iter_mut().find(|u| u.id == user_id) else {
        return error_response(StatusCode::BAD_REQUEST, "Invalid or expired token");
    };
    if let Some(password) = body["password"].as_str() {
        stored.password = password.to_owned();
    }
    let doc = user_json(stored);
    let id = stored.id.clone();
    drop(users);

    let token = state.mint_token(&id);
    (
        StatusCode::OK,
        Json(json!({ "success": true, "token": token, "user": doc })),
    )
}

async fn verify_email(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default();
    let code = body["code"].as_str().unwrap_or_default();

    if code != VERIFICATION_CODE {
        return error_response(StatusCode::BAD_REQUEST, "Invalid verification code");
    }

    let mut users = state.users.lock().unwrap();
    let Some(stored) = users.iter_mut().find(|u| u.email == email) else {
        return error_response(StatusCode::NOT_FOUND, "User not found");
    };
    stored.verified = true;
    let doc = user_json(stored);
    let id = stored.id.clone();
    drop(users);

    let token = state.mint_token(&id);
    (
        StatusCode::OK,
        Json(json!({ "success": true, "token": token, "user": doc })),
    )
}

async fn resend_code(Json(_body): Json<Value>) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "success": true })))
}

// =============================================================================
// Product handlers
// =============================================================================

async fn list_products(
    State(state): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    let products = state.products.lock().unwrap();
    let filtered: Vec<Value> = products
        .iter()
        .filter(|p| {
            params
                .get("category")
                .is_none_or(|c| p["category"].as_str() == Some(c))
        })
        .filter(|p| {
            params.get("niche").is_none_or(|n| {
                p["niche"]
                    .as_array()
                    .is_some_and(|niches| niches.iter().any(|v| v.as_str() == Some(n)))
            })
        })
        .filter(|p| {
            params
                .get("isFeatured")
                .is_none_or(|f| p["isFeatured"].as_bool() == f.parse().ok())
        })
        .filter(|p| {
            params.get("search").is_none_or(|s| {
                p["name"]
                    .as_str()
                    .is_some_and(|name| name.to_lowercase().contains(&s.to_lowercase()))
            })
        })
        .cloned()
        .collect();

    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": filtered })),
    )
}

async fn get_product(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    let products = state.products.lock().unwrap();
    match products.iter().find(|p| p["_id"].as_str() == Some(&id)) {
        Some(product) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": product })),
        ),
        None => error_response(StatusCode::NOT_FOUND, "Product not found"),
    }
}

async fn create_product(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !state
        .user_for_token(&headers)
        .is_some_and(|u| u.role == "admin")
    {
        return forbidden();
    }

    body["_id"] = Value::String(format!("p-{}", Uuid::new_v4().simple()));
    state.products.lock().unwrap().push(body.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": body })),
    )
}

async fn update_product(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !state
        .user_for_token(&headers)
        .is_some_and(|u| u.role == "admin")
    {
        return forbidden();
    }

    let mut products = state.products.lock().unwrap();
    let Some(stored) = products.iter_mut().find(|p| p["_id"].as_str() == Some(&id)) else {
        return error_response(StatusCode::NOT_FOUND, "Product not found");
    };
    body["_id"] = Value::String(id);
    *stored = body.clone();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": body })),
    )
}

async fn delete_product(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state
        .user_for_token(&headers)
        .is_some_and(|u| u.role == "admin")
    {
        return forbidden();
    }

    let mut products = state.products.lock().unwrap();
    let before = products.len();
    products.retain(|p| p["_id"].as_str() != Some(&id));
    if products.len() == before {
        return error_response(StatusCode::NOT_FOUND, "Product not found");
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

// =============================================================================
// Order handlers
// =============================================================================

async fn create_order(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(user) = state.user_for_token(&headers) else {
        return error_response(StatusCode::UNAUTHORIZED, "Not authorized");
    };

    let items = body["orderItems"].as_array().cloned().unwrap_or_default();
    if items.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No order items");
    }

    let id = format!("ord-{}", Uuid::new_v4().simple());
    let doc = json!({
        "_id": id,
        "user": { "_id": user.id, "name": user.name, "email": user.email },
        "orderItems": items,
        "shippingAddress": body["shippingAddress"],
        "paymentMethod": body["paymentMethod"],
        "itemsPrice": body["itemsPrice"],
        "taxPrice": body["taxPrice"],
        "shippingPrice": body["shippingPrice"],
        "totalPrice": body["totalPrice"],
        "isPaid": false,
        "isDelivered": false,
        "status": "pending",
        "createdAt": Utc::now().to_rfc3339(),
    });

    state.orders.lock().unwrap().push(StoredOrder {
        owner_id: user.id,
        doc: doc.clone(),
    });

    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "_id": id, "order": doc })),
    )
}

async fn my_orders(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let Some(user) = state.user_for_token(&headers) else {
        return error_response(StatusCode::UNAUTHORIZED, "Not authorized");
    };

    let orders = state.orders.lock().unwrap();
    let mine: Vec<Value> = orders
        .iter()
        .filter(|o| o.owner_id == user.id)
        .map(|o| o.doc.clone())
        .collect();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": mine })),
    )
}

async fn list_orders(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state
        .user_for_token(&headers)
        .is_some_and(|u| u.role == "admin")
    {
        return forbidden();
    }

    let orders = state.orders.lock().unwrap();
    let all: Vec<Value> = orders.iter().map(|o| o.doc.clone()).collect();
    (StatusCode::OK, Json(json!({ "success": true, "data": all })))
}

async fn get_order(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let Some(user) = state.user_for_token(&headers) else {
        return error_response(StatusCode::UNAUTHORIZED, "Not authorized");
    };

    let orders = state.orders.lock().unwrap();
    let found = orders
        .iter()
        .filter(|o| user.role == "admin" || o.owner_id == user.id)
        .find(|o| o.doc["_id"].as_str() == Some(&id));
    match found {
        Some(order) => (
            StatusCode::OK,
            Json(json!({ "success": true, "data": order.doc })),
        ),
        None => error_response(StatusCode::NOT_FOUND, "Order not found"),
    }
}

async fn deliver_order(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state
        .user_for_token(&headers)
        .is_some_and(|u| u.role == "admin")
    {
        return forbidden();
    }

    let mut orders = state.orders.lock().unwrap();
    let Some(order) = orders.iter_mut().find(|o| o.doc["_id"].as_str() == Some(&id)) else {
        return error_response(StatusCode::NOT_FOUND, "Order not found");
    };

    order.doc["isDelivered"] = Value::Bool(true);
    order.doc["deliveredAt"] = Value::String(Utc::now().to_rfc3339());
    order.doc["status"] = Value::String("delivered".to_owned());
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": order.doc })),
    )
}

// =============================================================================
// User management handlers
// =============================================================================

async fn list_users(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state
        .user_for_token(&headers)
        .is_some_and(|u| u.role == "admin")
    {
        return forbidden();
    }

    let users = state.users.lock().unwrap();
    let docs: Vec<Value> = users.iter().map(user_json).collect();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "users": docs })),
    )
}

async fn update_user(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(acting) = state.user_for_token(&headers) else {
        return error_response(StatusCode::UNAUTHORIZED, "Not authorized");
    };
    if acting.role != "admin" {
        return forbidden();
    }
    // Destructive team operations re-confirm the acting admin's password.
    if body["password"].as_str() != Some(acting.password.as_str()) {
        return error_response(StatusCode::UNAUTHORIZED, "Password confirmation failed");
    }
    if acting.id == id {
        return error_response(StatusCode::BAD_REQUEST, "You cannot change your own role");
    }

    let mut users = state.users.lock().unwrap();
    let Some(stored) = users.iter_mut().find(|u| u.id == id) else {
        return error_response(StatusCode::NOT_FOUND, "User not found");
    };
    if let Some(role) = body["role"].as_str() {
        stored.role = role.to_owned();
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn delete_user(
    State(state): State<Arc<StubState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let Some(acting) = state.user_for_token(&headers) else {
        return error_response(StatusCode::UNAUTHORIZED, "Not authorized");
    };
    if acting.role != "admin" {
        return forbidden();
    }
    if body["password"].as_str() != Some(acting.password.as_str()) {
        return error_response(StatusCode::UNAUTHORIZED, "Password confirmation failed");
    }
    if acting.id == id {
        return error_response(StatusCode::BAD_REQUEST, "You cannot delete your own account");
    }

    let mut users = state.users.lock().unwrap();
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        return error_response(StatusCode::NOT_FOUND, "User not found");
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

// =============================================================================
// Analytics, settings, upload
// =============================================================================

async fn analytics(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    if !state
        .user_for_token(&headers)
        .is_some_and(|u| u.role == "admin")
    {
        return forbidden();
    }

    let orders = state.orders.lock().unwrap();

    // Draft money fields arrive as JSON strings (decimal-as-string wire
    // convention), so accept both spellings.
    fn money(value: &Value) -> f64 {
        value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
            .unwrap_or(0.0)
    }

    let mut revenue = 0.0;
    let mut by_product: HashMap<String, (u64, f64)> = HashMap::new();
    let mut by_status: HashMap<String, u64> = HashMap::new();

    for order in orders.iter() {
        revenue += money(&order.doc["totalPrice"]);
        let status = order.doc["status"].as_str().unwrap_or("pending").to_owned();
        *by_status.entry(status).or_default() += 1;

        for item in order.doc["orderItems"].as_array().into_iter().flatten() {
            let name = item["name"].as_str().unwrap_or("unknown").to_owned();
            let qty = item["qty"].as_u64().unwrap_or(0);
            let price = money(&item["price"]);
            let entry = by_product.entry(name).or_default();
            entry.0 += qty;
            #[allow(clippy::cast_precision_loss)]
            {
                entry.1 += price * qty as f64;
            }
        }
    }

    let top_products: Vec<Value> = by_product
        .into_iter()
        .map(|(name, (sales, revenue))| json!({ "name": name, "sales": sales, "revenue": revenue }))
        .collect();
    let order_status: Vec<Value> = by_status
        .into_iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "dailyRevenue": [{ "date": "Today", "revenue": revenue }],
                "topProducts": top_products,
                "orderStatus": order_status,
            }
        })),
    )
}

async fn get_settings(State(state): State<Arc<StubState>>) -> (StatusCode, Json<Value>) {
    let settings = state.settings.lock().unwrap().clone();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": settings })),
    )
}

async fn update_settings(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !state
        .user_for_token(&headers)
        .is_some_and(|u| u.role == "admin")
    {
        return forbidden();
    }

    // Wholesale replace: the stored document becomes exactly what was sent.
    *state.settings.lock().unwrap() = body.clone();
    (
        StatusCode::OK,
        Json(json!({ "success": true, "data": body })),
    )
}

async fn upload(mut multipart: Multipart) -> (StatusCode, Json<Value>) {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("image") {
            let filename = field.file_name().unwrap_or("upload.bin").to_owned();
            let bytes = field.bytes().await.unwrap_or_default();
            if bytes.is_empty() {
                return error_response(StatusCode::BAD_REQUEST, "Empty upload");
            }
            return (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "url": format!("https://cdn.creatorshub.example/uploads/{filename}"),
                })),
            );
        }
    }
    error_response(StatusCode::BAD_REQUEST, "No image field")
}
