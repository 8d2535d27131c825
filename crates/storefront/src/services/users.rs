//! Profile and avatar operations for the signed-in user.

use buy01_core::User;
use reqwest::Method;
use reqwest::multipart::Form;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::client::StorefrontClient;
use crate::error::ApiError;
use crate::retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES, retry_transient};
use crate::upload::Upload;

pub const PROFILE_LOADED: &str = "Profile loaded successfully!";
pub const PROFILE_UPDATED: &str = "Profile updated successfully!";
pub const AVATAR_UPDATED: &str = "Avatar updated successfully!";

/// Changed profile fields. Unset fields are left untouched by the backend.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

impl UserUpdate {
    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

#[derive(Serialize)]
struct UserUpdateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

impl<'a> From<&'a UserUpdate> for UserUpdateRequest<'a> {
    fn from(update: &'a UserUpdate) -> Self {
        Self {
            name: update.name.as_deref().map(str::trim),
            email: update.email.as_deref().map(str::trim),
            password: update.password.as_ref().map(ExposeSecret::expose_secret),
        }
    }
}

impl StorefrontClient {
    /// Fetch the signed-in user's profile and cache it.
    ///
    /// # Errors
    ///
    /// - `ApiError::NoToken` if no token is stored
    /// - `ApiError::Status` if the backend rejects the request
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User, ApiError> {
        let request = self.authed(Method::GET, &self.api().current_user())?;
        let user: User = self.send_json(request).await?;
        debug!(user_id = %user.id, "Loaded profile");
        self.cache_user(&user);
        Ok(user)
    }

    /// [`profile`](Self::profile) with retries on network and 5xx failures.
    ///
    /// # Errors
    ///
    /// Returns the last error once retries are exhausted.
    pub async fn load_profile(&self) -> Result<User, ApiError> {
        let user = retry_transient(|| self.profile(), DEFAULT_MAX_RETRIES, DEFAULT_BASE_DELAY).await?;
        self.notifier().success(PROFILE_LOADED);
        Ok(user)
    }

    /// Update profile fields of the signed-in user.
    ///
    /// Uses the cached user's id, fetching the profile first when nothing is
    /// cached.
    ///
    /// # Errors
    ///
    /// - `ApiError::Validation` if `update` has no field set
    /// - `ApiError::NoToken` if no token is stored
    /// - `ApiError::Status` if the backend rejects the update
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<User, ApiError> {
        if update.is_empty() {
            return Err(ApiError::Validation("Nothing to update.".to_string()));
        }

        let user_id = match self.current_user() {
            Some(user) => user.id,
            None => self.profile().await?.id,
        };

        let request = self
            .authed(Method::PUT, &self.api().update_user(user_id.as_str()))?
            .json(&UserUpdateRequest::from(update));
        let user: User = self.send_json(request).await?;

        info!(user_id = %user.id, "Profile updated");
        self.cache_user(&user);
        self.notifier().success(PROFILE_UPDATED);
        Ok(user)
    }

    /// Replace the signed-in user's avatar.
    ///
    /// # Errors
    ///
    /// - `ApiError::Validation` if the file fails the avatar rules; nothing
    ///   is sent
    /// - `ApiError::NoToken` if no token is stored
    /// - `ApiError::Status` if the backend rejects the upload
    #[instrument(skip(self, avatar), fields(file = %avatar.file_name, size = avatar.len()))]
    pub async fn update_avatar(&self, avatar: Upload) -> Result<User, ApiError> {
        avatar.validate_avatar()?;

        let form = Form::new().part("avatar", avatar.into_part()?);
        let request = self
            .authed(Method::PUT, &self.api().update_avatar())?
            .multipart(form);
        let user: User = self.send_json(request).await?;

        info!(user_id = %user.id, "Avatar updated");
        self.cache_user(&user);
        self.notifier().success(AVATAR_UPDATED);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_skips_unset_fields() {
        let update = UserUpdate {
            name: Some("  Jane Doe ".to_string()),
            ..UserUpdate::default()
        };
        let json = serde_json::to_string(&UserUpdateRequest::from(&update)).unwrap_or_default();
        assert_eq!(json, r#"{"name":"Jane Doe"}"#);
    }

    #[test]
    fn test_update_request_exposes_password_only_on_the_wire() {
        let update = UserUpdate {
            password: Some(SecretString::from("new-password".to_string())),
            ..UserUpdate::default()
        };
        assert!(!format!("{update:?}").contains("new-password"));

        let json = serde_json::to_string(&UserUpdateRequest::from(&update)).unwrap_or_default();
        assert!(json.contains("new-password"));
    }

    #[test]
    fn test_empty_update() {
        assert!(UserUpdate::default().is_empty());
    }
}
