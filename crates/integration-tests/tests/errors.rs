//! Error translation and admin access across the wire.

use std::sync::Arc;
use std::time::Duration;

use buy01_core::{ProductId, UserId};
use buy01_integration_tests::{
    ADMIN_EMAIL, CLIENT_EMAIL, CLIENT_ID, MockBackend, PASSWORD, SELLER_EMAIL,
};
use buy01_storefront::services::Credentials;
use buy01_storefront::{ApiError, MemoryStorage, StorefrontClient, StorefrontConfig};

async fn signed_in(email: &str) -> (MockBackend, StorefrontClient) {
    let backend = MockBackend::start().await.expect("Failed to start mock backend");
    let client = backend.client().expect("client");
    client
        .sign_in(&Credentials::new(email, PASSWORD))
        .await
        .expect("sign in");
    (backend, client)
}

#[tokio::test]
async fn test_authenticated_calls_without_token_send_nothing() {
    let backend = MockBackend::start().await.expect("Failed to start mock backend");
    let client = backend.client().expect("client");

    assert!(matches!(client.my_products().await, Err(ApiError::NoToken)));
    assert!(matches!(
        client.delete_product(&ProductId::new("p1")).await,
        Err(ApiError::NoToken)
    ));
    assert!(matches!(client.users().await, Err(ApiError::NoToken)));
    assert!(backend.requests().is_empty());

    // the public listing needs no token
    assert_eq!(client.products().await.expect("products").len(), 2);
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let (_backend, client) = signed_in(SELLER_EMAIL).await;

    let err = client
        .product(&ProductId::new("does-not-exist"))
        .await
        .expect_err("missing product");

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "Resource not found.");
}

#[tokio::test]
async fn test_ids_are_percent_encoded() {
    let (backend, client) = signed_in(SELLER_EMAIL).await;

    let _ = client.product(&ProductId::new("a b/c")).await;

    assert!(
        backend
            .requests()
            .iter()
            .any(|r| r == "GET /api/products/a%20b%2Fc")
    );
}

#[tokio::test]
async fn test_admin_lists_and_deletes_users() {
    let (backend, client) = signed_in(ADMIN_EMAIL).await;

    let users = client.users().await.expect("users");
    assert_eq!(users.len(), 3);

    client
        .delete_user(&UserId::new(CLIENT_ID))
        .await
        .expect("delete user");
    assert!(backend.user(CLIENT_EMAIL).is_none());
    assert_eq!(client.users().await.expect("users").len(), 2);
}

#[tokio::test]
async fn test_non_admin_is_forbidden() {
    let (_backend, client) = signed_in(SELLER_EMAIL).await;

    let err = client.users().await.expect_err("forbidden");

    assert_eq!(err.status(), Some(403));
    assert!(err.is_unauthorized());
    assert_eq!(
        err.user_message(),
        "You don't have permission to perform this action."
    );
}

#[tokio::test]
async fn test_unreachable_backend_is_a_network_error() {
    let mut config = StorefrontConfig::for_api_url("http://127.0.0.1:1").expect("config");
    config.request_timeout = Duration::from_secs(2);
    let client =
        StorefrontClient::with_storage(&config, Arc::new(MemoryStorage::new())).expect("client");

    let err = client.products().await.expect_err("connection refused");

    assert!(err.is_transient());
    assert_eq!(err.status(), Some(0));
    assert_eq!(
        err.user_message(),
        "Network error. Please check your connection."
    );
}
