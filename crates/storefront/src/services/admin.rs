//! User administration. The backend only accepts these from ADMIN tokens.

use buy01_core::{User, UserId};
use reqwest::Method;
use tracing::{debug, info, instrument};

use crate::client::StorefrontClient;
use crate::error::ApiError;

impl StorefrontClient {
    /// Every account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoToken` without a stored token, or the request error.
    #[instrument(skip(self))]
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        let request = self.authed(Method::GET, &self.api().all_users())?;
        let users: Vec<User> = self.send_json(request).await?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NoToken` without a stored token, or the request error.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: &UserId) -> Result<(), ApiError> {
        let request = self.authed(Method::DELETE, &self.api().delete_user(id.as_str()))?;
        self.send_empty(request).await?;
        info!("User deleted");
        Ok(())
    }
}
