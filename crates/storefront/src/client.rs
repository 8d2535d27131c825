//! HTTP client for the Buy01 backend.
//!
//! [`StorefrontClient`] owns everything a session needs: the HTTP client,
//! the endpoint table, persistent storage, the observable session state and
//! the status message bus. Endpoint-specific operations live in
//! [`crate::services`] as further `impl StorefrontClient` blocks.

use std::sync::Arc;
use std::time::Duration;

use buy01_core::User;
use reqwest::{Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::api::ApiUrls;
use crate::config::StorefrontConfig;
use crate::error::{ApiError, ErrorBody};
use crate::state::{Notifier, SessionState};
use crate::storage::{CURRENT_USER_KEY, FileStorage, SessionStorage, TOKEN_KEY};
use crate::token;

/// Client for the Buy01 REST backend.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    http: reqwest::Client,
    api: ApiUrls,
    storage: Arc<dyn SessionStorage>,
    session: SessionState,
    notifier: Notifier,
    upload_delay: Duration,
}

impl std::fmt::Debug for StorefrontClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontClient")
            .field("api", &self.inner.api.base())
            .field("signed_in", &self.inner.session.is_signed_in())
            .field("upload_delay", &self.inner.upload_delay)
            .finish_non_exhaustive()
    }
}

impl StorefrontClient {
    /// Create a client whose session is persisted in `config.session_file`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the session file cannot be read or the
    /// HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let storage = FileStorage::open(&config.session_file)?;
        Self::with_storage(config, Arc::new(storage))
    }

    /// Create a client on top of an existing storage backend.
    ///
    /// Restores the cached user and the signed-in flag from storage. A stored
    /// token whose `exp` has passed is removed first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the HTTP client fails to build.
    pub fn with_storage(
        config: &StorefrontConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ApiError::Client(format!("Failed to build HTTP client: {e}")))?;

        let session = restore_session(storage.as_ref());

        Ok(Self {
            inner: Arc::new(StorefrontClientInner {
                http,
                api: ApiUrls::new(&config.api_url),
                storage,
                session,
                notifier: Notifier::new(),
                upload_delay: config.upload_delay,
            }),
        })
    }

    /// Endpoint table.
    #[must_use]
    pub fn api(&self) -> &ApiUrls {
        &self.inner.api
    }

    /// Observable session state.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.inner.session
    }

    /// App-wide status message bus.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.inner.session.current_user()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.inner.session.is_signed_in()
    }

    /// Stored bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.inner.storage.get(TOKEN_KEY).map(SecretString::from)
    }

    // =========================================================================
    // Session bookkeeping
    // =========================================================================

    pub(crate) fn store_token(&self, token: &str) -> Result<(), ApiError> {
        self.inner.storage.set(TOKEN_KEY, token)?;
        Ok(())
    }

    /// Replace the cached user in memory and in storage.
    pub(crate) fn cache_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => {
                if let Err(e) = self.inner.storage.set(CURRENT_USER_KEY, &json) {
                    warn!(error = %e, "Failed to persist current user");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize current user"),
        }
        self.inner.session.set_user(Some(user.clone()));
    }

    /// Drop the token and cached user. With `clear_all`, wipe the storage too.
    pub(crate) fn clear_session(&self, clear_all: bool) {
        let storage = &self.inner.storage;
        for key in [CURRENT_USER_KEY, TOKEN_KEY] {
            if let Err(e) = storage.remove(key) {
                warn!(key, error = %e, "Failed to remove session key");
            }
        }
        if clear_all && let Err(e) = storage.clear() {
            warn!(error = %e, "Failed to clear session storage");
        }
        self.inner.session.set_user(None);
        self.inner.session.set_signed_in(false);
    }

    /// Wait between the requests of a sequential batch.
    pub(crate) async fn pause_between_requests(&self) {
        if !self.inner.upload_delay.is_zero() {
            tokio::time::sleep(self.inner.upload_delay).await;
        }
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    /// Unauthenticated request.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.inner.http.request(method, url)
    }

    /// Request carrying the stored bearer token.
    ///
    /// Fails with `ApiError::NoToken` before anything is sent when no token
    /// is stored.
    pub(crate) fn authed(&self, method: Method, url: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.token().ok_or(ApiError::NoToken)?;
        Ok(self.request(method, url).bearer_auth(token.expose_secret()))
    }

    /// Send a request and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Send a request whose response body is ignored.
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Request succeeded");
            return Ok(());
        }
        Err(self.parse_error(response).await)
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes)
                .map_err(|e| ApiError::Decode(format!("Failed to parse response: {e}")));
        }

        Err(self.parse_error(response).await)
    }

    /// Parse an error response, keeping the `message` field of a JSON body.
    async fn parse_error(&self, response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message);

        warn!(status, message = message.as_deref().unwrap_or(""), "Backend returned an error");
        ApiError::Status { status, message }
    }
}

/// Rebuild the session from storage.
fn restore_session(storage: &dyn SessionStorage) -> SessionState {
    let mut token = storage.get(TOKEN_KEY);
    if token.as_deref().is_some_and(token::is_expired) {
        debug!("Dropping expired token");
        if let Err(e) = storage.remove(TOKEN_KEY) {
            warn!(error = %e, "Failed to remove expired token");
        }
        token = None;
    }

    let user = storage
        .get(CURRENT_USER_KEY)
        .and_then(|json| match serde_json::from_str::<User>(&json) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable cached user");
                None
            }
        });

    SessionState::new(user, token.is_some())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::token::tests::jwt;

    fn config() -> StorefrontConfig {
        StorefrontConfig::for_api_url("http://127.0.0.1:9").unwrap()
    }

    fn cached_user_json() -> String {
        r#"{"id":"u1","email":"jane@shop.com","name":"Jane","role":"CLIENT"}"#.to_string()
    }

    #[test]
    fn test_bootstrap_restores_cached_user_and_token() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "opaque-token").unwrap();
        storage.set(CURRENT_USER_KEY, &cached_user_json()).unwrap();

        let client = StorefrontClient::with_storage(&config(), storage).unwrap();
        assert!(client.is_signed_in());
        assert_eq!(client.current_user().unwrap().name, "Jane");
    }

    #[test]
    fn test_bootstrap_without_token_is_signed_out() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CURRENT_USER_KEY, &cached_user_json()).unwrap();

        let client = StorefrontClient::with_storage(&config(), storage).unwrap();
        assert!(!client.is_signed_in());
        assert!(client.current_user().is_some());
    }

    #[test]
    fn test_bootstrap_drops_expired_token() {
        let storage = Arc::new(MemoryStorage::new());
        let expired = jwt(&serde_json::json!({ "exp": 1 }));
        storage.set(TOKEN_KEY, &expired).unwrap();

        let client = StorefrontClient::with_storage(&config(), storage.clone()).unwrap();
        assert!(!client.is_signed_in());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_bootstrap_ignores_unreadable_user() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CURRENT_USER_KEY, "{broken").unwrap();

        let client = StorefrontClient::with_storage(&config(), storage).unwrap();
        assert!(client.current_user().is_none());
    }

    #[test]
    fn test_authed_without_token_fails_before_sending() {
        let client =
            StorefrontClient::with_storage(&config(), Arc::new(MemoryStorage::new())).unwrap();
        let url = client.api().current_user();
        assert!(matches!(
            client.authed(Method::GET, &url),
            Err(ApiError::NoToken)
        ));
    }

    #[test]
    fn test_clear_session_resets_state() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "t").unwrap();
        storage.set(CURRENT_USER_KEY, &cached_user_json()).unwrap();
        storage.set("unrelated", "x").unwrap();

        let client = StorefrontClient::with_storage(&config(), storage.clone()).unwrap();
        client.clear_session(true);

        assert!(!client.is_signed_in());
        assert!(client.current_user().is_none());
        assert!(storage.get("unrelated").is_none());
    }

    #[test]
    fn test_debug_hides_token() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(TOKEN_KEY, "super-secret-token").unwrap();
        let client = StorefrontClient::with_storage(&config(), storage).unwrap();
        let debug_output = format!("{client:?}");
        assert!(!debug_output.contains("super-secret-token"));
        assert!(debug_output.contains("127.0.0.1:9"));
    }
}
