//! Auth session store flows against the stub backend.

use creators_hub_core::Role;
use creators_hub_integration_tests::{TestContext, stub};
use creators_hub_storefront::hub::{Credentials, ProfileUpdate, Registration};
use creators_hub_storefront::storage::{KeyValueStore, keys};
use creators_hub_storefront::stores::{AuthOutcome, AuthState};

fn user_credentials() -> Credentials {
    Credentials {
        email: stub::USER_EMAIL.to_owned(),
        password: stub::USER_PASSWORD.to_owned(),
    }
}

#[tokio::test]
async fn login_with_valid_credentials_establishes_session() {
    let ctx = TestContext::new().await;
    ctx.state.session().bootstrap().await;

    let outcome = ctx.state.session().login(user_credentials()).await;
    assert_eq!(outcome, AuthOutcome::Success);

    let session = ctx.state.session().session().expect("session expected");
    assert_eq!(session.role, Role::User);
    assert!(!session.token().is_empty());
    assert!(!session.is_admin());

    // Mirrored to durable storage.
    assert!(ctx.storage.get(keys::SESSION).is_some());
}

#[tokio::test]
async fn login_with_wrong_password_fails_without_session() {
    let ctx = TestContext::new().await;
    ctx.state.session().bootstrap().await;

    let outcome = ctx
        .state
        .session()
        .login(Credentials {
            email: stub::USER_EMAIL.to_owned(),
            password: "wrong".to_owned(),
        })
        .await;

    assert!(matches!(outcome, AuthOutcome::Failed { .. }));
    assert!(ctx.state.session().session().is_none());
    assert!(ctx.storage.get(keys::SESSION).is_none());
}

#[tokio::test]
async fn login_unverified_account_requires_verification_and_creates_no_session() {
    let ctx = TestContext::new().await;
    ctx.state.session().bootstrap().await;

    let outcome = ctx
        .state
        .session()
        .login(Credentials {
            email: stub::UNVERIFIED_EMAIL.to_owned(),
            password: stub::UNVERIFIED_PASSWORD.to_owned(),
        })
        .await;

    assert_eq!(
        outcome,
        AuthOutcome::VerificationRequired {
            email: stub::UNVERIFIED_EMAIL.to_owned()
        }
    );
    assert_eq!(
        ctx.state.session().state(),
        AuthState::VerificationPending {
            email: stub::UNVERIFIED_EMAIL.to_owned()
        }
    );
    // Only the pending email is held; nothing persisted.
    assert!(ctx.storage.get(keys::SESSION).is_none());
}

#[tokio::test]
async fn registration_then_email_verification_authenticates() {
    let ctx = TestContext::new().await;
    ctx.state.session().bootstrap().await;

    let outcome = ctx
        .state
        .session()
        .register(Registration {
            name: "Grace".to_owned(),
            email: "grace@example.com".to_owned(),
            password: "grace-pass-11".to_owned(),
        })
        .await;
    assert_eq!(
        outcome,
        AuthOutcome::VerificationRequired {
            email: "grace@example.com".to_owned()
        }
    );

    // Wrong code first.
    let outcome = ctx.state.session().verify_email("000000").await;
    assert!(matches!(outcome, AuthOutcome::Failed { .. }));
    assert!(ctx.state.session().pending_email().is_some());

    // Right code: the backend issues a fresh token and profile.
    let outcome = ctx.state.session().verify_email(stub::VERIFICATION_CODE).await;
    assert_eq!(outcome, AuthOutcome::Success);

    let session = ctx.state.session().session().expect("session expected");
    assert_eq!(session.email.as_str(), "grace@example.com");
    assert!(ctx.storage.get(keys::SESSION).is_some());
}

#[tokio::test]
async fn bootstrap_revalidates_stored_session() {
    let ctx = TestContext::new().await;
    ctx.state.session().bootstrap().await;
    ctx.state.session().login(user_credentials()).await;

    // Simulated reload: fresh state over the same storage.
    let reloaded = ctx.reload();
    assert_eq!(reloaded.session().state(), AuthState::Bootstrapping);

    let state = reloaded.session().bootstrap().await;
    match state {
        AuthState::Authenticated(session) => {
            assert_eq!(session.email.as_str(), stub::USER_EMAIL);
            assert_eq!(session.role, Role::User);
        }
        other => panic!("expected Authenticated, got {other:?}"),
    }
}

#[tokio::test]
async fn bootstrap_purges_stale_token() {
    let ctx = TestContext::new().await;
    ctx.state.session().bootstrap().await;
    ctx.state.session().login(user_credentials()).await;
    assert!(ctx.storage.get(keys::SESSION).is_some());

    // Server-side expiry invalidates the stored token.
    ctx.stub.revoke_all_tokens();

    let reloaded = ctx.reload();
    assert_eq!(
        reloaded.session().bootstrap().await,
        AuthState::Unauthenticated
    );
    assert!(ctx.storage.get(keys::SESSION).is_none());
}

#[tokio::test]
async fn logout_purges_memory_and_storage() {
    let ctx = TestContext::new().await;
    ctx.state.session().bootstrap().await;
    ctx.state.session().login(user_credentials()).await;

    let redirect = ctx.state.session().logout(None);
    assert_eq!(redirect, "/login");
    assert!(ctx.state.session().session().is_none());
    assert!(ctx.storage.get(keys::SESSION).is_none());

    // A subsequent bootstrap finds no valid session.
    let reloaded = ctx.reload();
    assert_eq!(
        reloaded.session().bootstrap().await,
        AuthState::Unauthenticated
    );
}

#[tokio::test]
async fn corrupt_stored_session_bootstraps_unauthenticated() {
    let ctx = TestContext::new().await;
    ctx.storage.put(keys::SESSION, "{definitely not json");

    assert_eq!(
        ctx.state.session().bootstrap().await,
        AuthState::Unauthenticated
    );
    // The unreadable record was purged.
    assert!(ctx.storage.get(keys::SESSION).is_none());
}

#[tokio::test]
async fn profile_update_refreshes_persisted_session() {
    let ctx = TestContext::new().await;
    ctx.state.session().bootstrap().await;
    ctx.state.session().login(user_credentials()).await;

    ctx.state
        .session()
        .update_profile(ProfileUpdate {
            name: Some("Ada Lovelace".to_owned()),
            ..ProfileUpdate::default()
        })
        .await
        .expect("profile update");

    let session = ctx.state.session().session().expect("session expected");
    assert_eq!(session.name, "Ada Lovelace");

    // The stored record reflects the new name after a reload.
    let reloaded = ctx.reload();
    match reloaded.session().bootstrap().await {
        AuthState::Authenticated(session) => assert_eq!(session.name, "Ada Lovelace"),
        other => panic!("expected Authenticated, got {other:?}"),
    }
}

#[tokio::test]
async fn verify_password_reconfirms_current_credentials() {
    let ctx = TestContext::new().await;
    ctx.state.session().bootstrap().await;
    ctx.state.session().login(user_credentials()).await;

    assert!(
        ctx.state
            .session()
            .verify_password(stub::USER_PASSWORD)
            .await
            .is_ok()
    );
    assert!(ctx.state.session().verify_password("wrong").await.is_err());
}
