//! Route guard decisions for live sessions.

use buy01_integration_tests::{ADMIN_EMAIL, CLIENT_EMAIL, MockBackend, PASSWORD, SELLER_EMAIL};
use buy01_storefront::GuardDecision;
use buy01_storefront::guard::ROUTES;
use buy01_storefront::services::{AUTH_CHECK_FAILED, Credentials};

async fn backend() -> MockBackend {
    MockBackend::start().await.expect("Failed to start mock backend")
}

fn redirect(to: &str, return_url: Option<&str>) -> GuardDecision {
    GuardDecision::Redirect {
        to: to.to_string(),
        return_url: return_url.map(str::to_string),
    }
}

#[tokio::test]
async fn test_signed_out_is_sent_to_auth() {
    let backend = backend().await;
    let client = backend.client().expect("client");

    assert_eq!(
        client.can_activate("/products/new").await,
        redirect("/auth", Some("/products/new"))
    );
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_client_is_confined() {
    let backend = backend().await;
    let client = backend.client().expect("client");
    client
        .sign_in(&Credentials::new(CLIENT_EMAIL, PASSWORD))
        .await
        .expect("sign in");

    assert!(client.can_activate("/").await.is_allowed());
    assert!(client.can_activate("/profil").await.is_allowed());
    assert_eq!(client.can_activate("/dashboard").await, redirect("/", None));
    assert_eq!(
        client.can_activate("/products/myproduct").await,
        redirect("/", None)
    );
}

#[tokio::test]
async fn test_seller_and_admin_reach_every_route() {
    let backend = backend().await;

    for email in [SELLER_EMAIL, ADMIN_EMAIL] {
        let client = backend.client().expect("client");
        client
            .sign_in(&Credentials::new(email, PASSWORD))
            .await
            .expect("sign in");

        for route in ROUTES.iter().filter(|r| r.guarded) {
            assert!(
                client.can_activate(route.path).await.is_allowed(),
                "{email} should reach {}",
                route.path
            );
        }
    }
}

#[tokio::test]
async fn test_every_guard_check_hits_the_backend() {
    let backend = backend().await;
    let client = backend.client().expect("client");
    client
        .sign_in(&Credentials::new(SELLER_EMAIL, PASSWORD))
        .await
        .expect("sign in");
    let before = backend.request_count("GET /api/users/me");

    client.can_activate("/dashboard").await;
    client.can_activate("/profil").await;

    assert_eq!(backend.request_count("GET /api/users/me"), before + 2);
}

#[tokio::test]
async fn test_revoked_token_redirects_to_auth() {
    let backend = backend().await;
    let client = backend.client().expect("client");
    client
        .sign_in(&Credentials::new(SELLER_EMAIL, PASSWORD))
        .await
        .expect("sign in");

    backend.revoke_sessions();

    assert_eq!(
        client.can_activate("/dashboard").await,
        redirect("/auth", Some("/dashboard"))
    );
    assert!(client.token().is_none());
}

#[tokio::test]
async fn test_backend_failure_redirects_but_keeps_session() {
    let backend = backend().await;
    let client = backend.client().expect("client");
    client
        .sign_in(&Credentials::new(SELLER_EMAIL, PASSWORD))
        .await
        .expect("sign in");

    backend.faults(|f| f.whoami_status = Some(503));

    assert_eq!(
        client.can_activate("/dashboard").await,
        redirect("/auth", Some("/dashboard"))
    );
    assert!(client.token().is_some());
    let message = client.notifier().latest().expect("status message");
    assert_eq!(message.error.as_deref(), Some(AUTH_CHECK_FAILED));
}
