//! Admin console flows against the stub backend.

use rust_decimal::Decimal;

use creators_hub_admin::{AdminClient, AdminError};
use creators_hub_core::{Currency, ProductId, Role, UserId};
use creators_hub_integration_tests::{TestContext, stub};
use creators_hub_storefront::HubError;
use creators_hub_storefront::hub::{Credentials, ProductQuery, types::ProductPayload};
use creators_hub_storefront::models::Session;

async fn login_admin(ctx: &TestContext) -> Session {
    ctx.state.session().bootstrap().await;
    ctx.state
        .session()
        .login(Credentials {
            email: stub::ADMIN_EMAIL.to_owned(),
            password: stub::ADMIN_PASSWORD.to_owned(),
        })
        .await;
    let session = ctx.state.session().session().expect("admin session");
    assert!(session.is_admin());
    session
}

async fn login_user(ctx: &TestContext) -> Session {
    ctx.state.session().bootstrap().await;
    ctx.state
        .session()
        .login(Credentials {
            email: stub::USER_EMAIL.to_owned(),
            password: stub::USER_PASSWORD.to_owned(),
        })
        .await;
    ctx.state.session().session().expect("user session")
}

fn tripod_payload() -> ProductPayload {
    ProductPayload {
        name: "Carbon Tripod".to_owned(),
        price: Decimal::new(8999, 2),
        image: String::new(),
        description: "Lightweight travel tripod".to_owned(),
        category: "camera".to_owned(),
        brand: "Strut".to_owned(),
        niche: vec!["video".to_owned()],
        is_featured: false,
        count_in_stock: Some(5),
    }
}

#[tokio::test]
async fn product_crud_roundtrip() {
    let ctx = TestContext::new().await;
    let session = login_admin(&ctx).await;
    let admin = AdminClient::new(ctx.state.config());
    let token = session.token();

    // Create
    let created = admin
        .create_product(&tripod_payload(), token)
        .await
        .expect("create");
    assert_eq!(created.name, "Carbon Tripod");

    // Visible in the public catalog
    let listed = ctx
        .state
        .client()
        .products(&ProductQuery::default())
        .await
        .expect("list");
    assert!(listed.iter().any(|p| p.id == created.id));

    // Update
    let mut payload = tripod_payload();
    payload.price = Decimal::new(7999, 2);
    let updated = admin
        .update_product(&created.id, &payload, token)
        .await
        .expect("update");
    assert_eq!(updated.price, Decimal::new(7999, 2));

    // Delete
    admin.delete_product(&created.id, token).await.expect("delete");
    let err = ctx
        .state
        .client()
        .product(&created.id)
        .await
        .expect_err("deleted product should 404");
    assert!(matches!(err, HubError::Api { status: 404, .. }));
}

#[tokio::test]
async fn non_admin_token_is_rejected_server_side() {
    let ctx = TestContext::new().await;
    let session = login_user(&ctx).await;
    let admin = AdminClient::new(ctx.state.config());

    // The client-side role gate is UX only; the backend is the authority.
    let err = admin
        .create_product(&tripod_payload(), session.token())
        .await
        .expect_err("user token must be refused");
    assert!(matches!(err, HubError::Api { status: 403, .. }));
}

#[tokio::test]
async fn mark_delivered_updates_backend_owned_fields() {
    let ctx = TestContext::new().await;

    // A customer places an order...
    login_user(&ctx).await;
    let ring_light = ctx
        .state
        .client()
        .product(&ProductId::new(stub::RING_LIGHT_ID))
        .await
        .expect("product");
    ctx.state.cart().add(&ring_light);
    let order_id = ctx
        .state
        .checkout(creators_hub_storefront::checkout::CheckoutForm {
            address: "1 Maker Way".to_owned(),
            city: "Lagos".to_owned(),
            postal_code: "100001".to_owned(),
            country: String::new(),
        })
        .await
        .expect("checkout");
    ctx.state.session().logout(None);

    // ...and an admin marks it delivered.
    let session = login_admin(&ctx).await;
    let admin = AdminClient::new(ctx.state.config());

    let all = admin.orders(session.token()).await.expect("orders");
    assert!(all.iter().any(|o| o.id == order_id));

    let delivered = admin
        .mark_delivered(&order_id, session.token())
        .await
        .expect("deliver");
    assert!(delivered.is_delivered);
    assert!(delivered.delivered_at.is_some());
    assert_eq!(
        delivered.status,
        creators_hub_core::OrderStatus::Delivered
    );
}

#[tokio::test]
async fn role_change_requires_password_reconfirmation() {
    let ctx = TestContext::new().await;
    let session = login_admin(&ctx).await;
    let admin = AdminClient::new(ctx.state.config());
    let target = UserId::new("u-ada");

    // Wrong password: backend refuses.
    let err = admin
        .update_user_role(
            &session.user_id,
            &target,
            Role::Admin,
            "wrong-password",
            session.token(),
        )
        .await
        .expect_err("wrong password must be refused");
    assert!(matches!(
        err,
        AdminError::Api(HubError::Api { status: 401, .. })
    ));

    // Correct password: the role changes.
    admin
        .update_user_role(
            &session.user_id,
            &target,
            Role::Admin,
            stub::ADMIN_PASSWORD,
            session.token(),
        )
        .await
        .expect("role change");

    let users = admin.users(session.token()).await.expect("users");
    let ada = users
        .iter()
        .find(|u| u.id == target)
        .expect("ada listed");
    assert_eq!(ada.role, Role::Admin);
}

#[tokio::test]
async fn own_account_operations_are_refused() {
    let ctx = TestContext::new().await;
    let session = login_admin(&ctx).await;
    let admin = AdminClient::new(ctx.state.config());

    let err = admin
        .update_user_role(
            &session.user_id,
            &session.user_id,
            Role::User,
            stub::ADMIN_PASSWORD,
            session.token(),
        )
        .await
        .expect_err("own role change refused");
    assert!(matches!(err, AdminError::OwnRoleChange));

    let err = admin
        .delete_user(
            &session.user_id,
            &session.user_id,
            stub::ADMIN_PASSWORD,
            session.token(),
        )
        .await
        .expect_err("own delete refused");
    assert!(matches!(err, AdminError::OwnAccountDelete));
}

#[tokio::test]
async fn delete_user_removes_the_account() {
    let ctx = TestContext::new().await;
    let session = login_admin(&ctx).await;
    let admin = AdminClient::new(ctx.state.config());
    let target = UserId::new("u-newbie");

    admin
        .delete_user(
            &session.user_id,
            &target,
            stub::ADMIN_PASSWORD,
            session.token(),
        )
        .await
        .expect("delete user");

    let users = admin.users(session.token()).await.expect("users");
    assert!(users.iter().all(|u| u.id != target));
}

#[tokio::test]
async fn settings_update_replaces_wholesale_and_refresh_picks_it_up() {
    let ctx = TestContext::new().await;
    let session = login_admin(&ctx).await;
    let admin = AdminClient::new(ctx.state.config());

    let loaded = ctx.state.settings().load().await.expect("settings");
    assert_eq!(loaded.currency, Currency::Ngn);
    assert_eq!(
        ctx.state.settings().format_price(Decimal::new(199, 1)),
        "₦19.90"
    );

    let mut updated = loaded;
    updated.currency = Currency::Gbp;
    updated.store_name = "Creators Hub EU".to_owned();
    admin
        .update_settings(&updated, session.token())
        .await
        .expect("update settings");

    // The cached copy is stale until an explicit refresh...
    assert_eq!(
        ctx.state.settings().format_price(Decimal::new(199, 1)),
        "₦19.90"
    );

    // ...which replaces it wholesale.
    let refreshed = ctx.state.settings().refresh().await.expect("refresh");
    assert_eq!(refreshed.store_name, "Creators Hub EU");
    assert_eq!(
        ctx.state.settings().format_price(Decimal::new(199, 1)),
        "£19.90"
    );
}

#[tokio::test]
async fn analytics_aggregates_orders() {
    let ctx = TestContext::new().await;

    // Place one order as a customer.
    login_user(&ctx).await;
    let boom_arm = ctx
        .state
        .client()
        .product(&ProductId::new(stub::BOOM_ARM_ID))
        .await
        .expect("product");
    ctx.state.cart().add(&boom_arm);
    ctx.state.cart().add(&boom_arm);
    ctx.state
        .checkout(creators_hub_storefront::checkout::CheckoutForm {
            address: "1 Maker Way".to_owned(),
            city: "Lagos".to_owned(),
            postal_code: "100001".to_owned(),
            country: String::new(),
        })
        .await
        .expect("checkout");
    ctx.state.session().logout(None);

    let session = login_admin(&ctx).await;
    let admin = AdminClient::new(ctx.state.config());
    let report = admin.analytics(session.token()).await.expect("analytics");

    // 2 x 10.00 + 10.00 shipping
    let revenue: Decimal = report.daily_revenue.iter().map(|d| d.revenue).sum();
    assert_eq!(revenue, Decimal::new(3000, 2));

    let boom = report
        .top_products
        .iter()
        .find(|p| p.name == "Boom Arm")
        .expect("boom arm in top products");
    assert_eq!(boom.sales, 2);

    let pending = report
        .order_status
        .iter()
        .find(|b| b.name == "pending")
        .expect("pending bucket");
    assert_eq!(pending.value, 1);
}

#[tokio::test]
async fn image_upload_returns_hosted_url() {
    let ctx = TestContext::new().await;

    let url = ctx
        .state
        .client()
        .upload_image("ring-light.jpg", b"\xff\xd8\xff\xe0fake-jpeg".to_vec())
        .await
        .expect("upload");
    assert_eq!(
        url,
        "https://cdn.creatorshub.example/uploads/ring-light.jpg"
    );
}
