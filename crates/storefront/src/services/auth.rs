//! Sign in, sign up, sign out and token validation.

use buy01_core::{Role, User};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::client::StorefrontClient;
use crate::error::ApiError;
use crate::upload::Upload;

/// Published when the token could not be checked for reasons other than
/// rejection (network failure, server error).
pub const AUTH_CHECK_FAILED: &str = "Auth check failed: wait a moment and will retry";

/// Email and password for the login endpoint.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Account details for the register endpoint.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

impl StorefrontClient {
    /// Sign in and refresh the cached user.
    ///
    /// On success the token is stored, the session is marked signed in and
    /// [`check_auth`](Self::check_auth) loads the user. The returned user is
    /// `None` when that check could not complete.
    ///
    /// # Errors
    ///
    /// - `ApiError::Status` if the backend rejects the credentials
    /// - `ApiError::MissingToken` if the response carries no token; the
    ///   session is left untouched
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Option<User>, ApiError> {
        let body = LoginRequest {
            email: credentials.email.trim(),
            password: credentials.password.expose_secret(),
        };
        let request = self.request(Method::POST, &self.api().login()).json(&body);
        let response: LoginResponse = self.send_json(request).await?;

        let token = response
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(ApiError::MissingToken)?;

        self.store_token(&token)?;
        self.session().set_signed_in(true);
        info!("Signed in");

        self.check_auth().await;
        Ok(self.current_user())
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    ///
    /// - `ApiError::Validation` if the avatar fails the avatar rules
    /// - `ApiError::Status` if the backend rejects the registration
    #[instrument(skip(self, registration, avatar), fields(email = %registration.email, role = %registration.role))]
    pub async fn sign_up(
        &self,
        registration: &Registration,
        avatar: Option<Upload>,
    ) -> Result<User, ApiError> {
        let data = serde_json::to_string(&RegisterRequest {
            name: registration.name.trim(),
            email: registration.email.trim(),
            password: registration.password.expose_secret(),
            role: registration.role,
        })
        .map_err(|e| ApiError::Client(e.to_string()))?;

        let mut form = Form::new().part("data", json_part(data)?);
        if let Some(avatar) = avatar {
            avatar.validate_avatar()?;
            form = form.part("avatar", avatar.into_part()?);
        }

        let request = self
            .request(Method::POST, &self.api().register())
            .multipart(form);
        let user: User = self.send_json(request).await?;
        info!(user_id = %user.id, "Account created");
        Ok(user)
    }

    /// Validate the stored token against the profile endpoint.
    ///
    /// - no token: signed out, no request
    /// - 2xx: user cached, signed in
    /// - 401/403: token and cached user removed, signed out
    /// - anything else: [`AUTH_CHECK_FAILED`] published, token kept
    #[instrument(skip(self))]
    pub async fn check_auth(&self) -> bool {
        let request = match self.authed(Method::GET, &self.api().current_user()) {
            Ok(request) => request,
            Err(_) => {
                debug!("No stored token");
                self.session().set_signed_in(false);
                return false;
            }
        };

        match self.send_json::<User>(request).await {
            Ok(user) => {
                debug!(user_id = %user.id, "Token accepted");
                self.cache_user(&user);
                self.session().set_signed_in(true);
                true
            }
            Err(e) if e.is_unauthorized() => {
                info!(status = ?e.status(), "Stored token rejected");
                self.clear_session(false);
                false
            }
            Err(e) => {
                warn!(error = %e, "Auth check failed");
                self.notifier().error(AUTH_CHECK_FAILED);
                false
            }
        }
    }

    /// Drop the token, the cached user and every other stored key.
    #[instrument(skip(self))]
    pub fn sign_out(&self) {
        self.clear_session(true);
        info!("Signed out");
    }
}

/// Multipart part holding a JSON document.
pub(crate) fn json_part(json: String) -> Result<Part, ApiError> {
    Part::text(json)
        .mime_str("application/json")
        .map_err(|e| ApiError::Client(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("jane@shop.com", "hunter22");
        let debug_output = format!("{credentials:?}");
        assert!(debug_output.contains("jane@shop.com"));
        assert!(!debug_output.contains("hunter22"));
    }

    #[test]
    fn test_register_request_shape() {
        let json = serde_json::to_value(RegisterRequest {
            name: "Jane",
            email: "jane@shop.com",
            password: "password123",
            role: Role::Seller,
        })
        .unwrap_or_default();
        assert_eq!(json["role"], "SELLER");
        assert_eq!(json["email"], "jane@shop.com");
    }

    #[test]
    fn test_login_response_without_token() {
        let response: Result<LoginResponse, _> =
            serde_json::from_str(r#"{"error":"Invalid credentials"}"#);
        assert!(response.is_ok_and(|r| r.token.is_none()));
    }
}
