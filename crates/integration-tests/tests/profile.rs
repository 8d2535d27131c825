//! Profile loading and the two-step profile form.

use buy01_integration_tests::{CLIENT_EMAIL, MockBackend, PASSWORD, SELLER_EMAIL};
use buy01_storefront::services::users::{AVATAR_UPDATED, PROFILE_LOADED, PROFILE_UPDATED};
use buy01_storefront::services::{Credentials, UserUpdate};
use buy01_storefront::{ApiError, FormError, ProfileForm, StorefrontClient, Upload};
use secrecy::SecretString;

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
async fn test_load_profile_publishes_success() {
    let (_backend, client) = signed_in(SELLER_EMAIL).await;

    let user = client.load_profile().await.expect("profile");

    assert_eq!(user.email.as_str(), SELLER_EMAIL);
    assert!(user.created_at.is_some());
    let message = client.notifier().latest().expect("status message");
    assert_eq!(message.success.as_deref(), Some(PROFILE_LOADED));
}

#[tokio::test]
async fn test_profile_requires_token() {
    let backend = MockBackend::start().await.expect("Failed to start mock backend");
    let client = backend.client().expect("client");

    let err = client.profile().await.expect_err("no token");

    assert!(matches!(err, ApiError::NoToken));
    assert_eq!(
        err.user_message(),
        "No authentication token found. Please log in again."
    );
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_update_profile_fields() {
    let (backend, client) = signed_in(SELLER_EMAIL).await;
    let user = client.load_profile().await.expect("profile");

    let mut form = ProfileForm::from_user(&user);
    form.name = "Jane Martin".to_string();
    form.password = Some(SecretString::from("new-secret".to_string()));

    let outcome = form.submit(&client).await.expect("update");

    assert_eq!(outcome.message, PROFILE_UPDATED);
    assert_eq!(form.original().name, "Jane Martin");
    assert!(form.password.is_none());
    assert_eq!(
        client.current_user().map(|u| u.name),
        Some("Jane Martin".to_string())
    );

    let stored = backend.user(SELLER_EMAIL).expect("seller");
    assert_eq!(stored.name, "Jane Martin");
    assert_eq!(stored.password, "new-secret");
    assert_eq!(backend.request_count("PUT /api/users/update/avatar"), 0);
}

#[tokio::test]
async fn test_avatar_only_update() {
    let (backend, client) = signed_in(CLIENT_EMAIL).await;
    let user = client.load_profile().await.expect("profile");

    let mut form = ProfileForm::from_user(&user);
    form.avatar = Some(Upload::new("me.webp", "image/webp", vec![1, 2, 3, 4]));

    let outcome = form.submit(&client).await.expect("update");

    assert_eq!(outcome.message, AVATAR_UPDATED);
    assert!(form.avatar.is_none());
    assert_eq!(
        form.original().avatar.as_deref(),
        Some("/media/avatars/me.webp")
    );
    assert_eq!(backend.request_count("PUT /api/users/update/u-"), 0);
}

#[tokio::test]
async fn test_unchanged_profile_is_rejected_locally() {
    let (backend, client) = signed_in(SELLER_EMAIL).await;
    let user = client.load_profile().await.expect("profile");
    let before = backend.requests().len();

    let mut form = ProfileForm::from_user(&user);
    let err = form.submit(&client).await.expect_err("nothing to update");

    assert_eq!(err.user_message(), "Nothing to update.");
    assert_eq!(backend.requests().len(), before);
}

#[tokio::test]
async fn test_email_conflict_keeps_avatar_step() {
    let (backend, client) = signed_in(SELLER_EMAIL).await;
    let user = client.load_profile().await.expect("profile");

    let mut form = ProfileForm::from_user(&user);
    form.email = CLIENT_EMAIL.to_string();
    form.avatar = Some(Upload::new("jane.png", "image/png", vec![9, 9, 9]));

    let err = form.submit(&client).await.expect_err("conflict");

    assert!(matches!(err, FormError::Partial(_)));
    assert!(err.user_message().starts_with("Your Email is already registered."));
    assert_eq!(backend.request_count("PUT /api/users/update/avatar"), 1);
    assert_eq!(
        backend.user(SELLER_EMAIL).and_then(|u| u.avatar),
        Some("/media/avatars/jane.png".to_string())
    );
}

#[tokio::test]
async fn test_empty_update_is_a_validation_error() {
    let (_backend, client) = signed_in(SELLER_EMAIL).await;

    let err = client
        .update_profile(&UserUpdate::default())
        .await
        .expect_err("empty update");

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(err.user_message(), "Nothing to update.");
}
