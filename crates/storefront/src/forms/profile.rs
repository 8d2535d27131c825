use buy01_core::{Email, User};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::{FormError, StepFailures, SubmitOutcome, publish};
use crate::client::StorefrontClient;
use crate::services::UserUpdate;
use crate::services::users::{AVATAR_UPDATED, PROFILE_UPDATED};
use crate::upload::Upload;

/// Minimum length of a new password on profile update.
pub const MIN_UPDATE_PASSWORD_LEN: usize = 6;

/// Profile edit form: fields first, then the avatar.
#[derive(Debug, Clone)]
pub struct ProfileForm {
    original: User,
    pub name: String,
    pub email: String,
    /// New password; blank means unchanged.
    pub password: Option<SecretString>,
    pub avatar: Option<Upload>,
}

impl ProfileForm {
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            original: user.clone(),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            password: None,
            avatar: None,
        }
    }

    /// Profile the form was loaded from (or last saved to).
    #[must_use]
    pub const fn original(&self) -> &User {
        &self.original
    }

    /// Only the fields that differ from the loaded profile.
    #[must_use]
    pub fn changes(&self) -> UserUpdate {
        let name = self.name.trim();
        let email = self.email.trim();
        UserUpdate {
            name: (name != self.original.name).then(|| name.to_string()),
            email: (email != self.original.email.as_str()).then(|| email.to_string()),
            password: self
                .password
                .as_ref()
                .filter(|p| !p.expose_secret().is_empty())
                .cloned(),
        }
    }

    /// Whether submitting would send anything.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes().is_empty() || self.avatar.is_some()
    }

    /// # Errors
    ///
    /// Returns `FormError::Invalid` listing each problem.
    pub fn validate(&self) -> Result<(), FormError> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("Name is required.".to_string());
        }
        if let Err(e) = Email::parse(&self.email) {
            problems.push(e.to_string());
        }
        if let Some(password) = &self.password {
            let len = password.expose_secret().chars().count();
            if len > 0 && len < MIN_UPDATE_PASSWORD_LEN {
                problems.push(format!(
                    "Password must be at least {MIN_UPDATE_PASSWORD_LEN} characters."
                ));
            }
        }
        if let Some(avatar) = &self.avatar
            && let Err(e) = avatar.validate_avatar()
        {
            problems.push(e.user_message());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(problems))
        }
    }

    /// Send changed fields, then the avatar, and publish the outcome.
    ///
    /// Both steps run even if the first fails.
    ///
    /// # Errors
    ///
    /// - `FormError::Invalid` if validation fails or nothing changed
    /// - `FormError::Partial` if either step fails
    #[instrument(skip(self, client))]
    pub async fn submit(&mut self, client: &StorefrontClient) -> Result<SubmitOutcome, FormError> {
        let result = self.run(client).await;
        publish(client, result)
    }

    async fn run(&mut self, client: &StorefrontClient) -> Result<SubmitOutcome, FormError> {
        self.validate()?;
        if !self.has_changes() {
            return Err(FormError::Invalid(vec!["Nothing to update.".to_string()]));
        }

        let mut failures = StepFailures::default();
        let mut message = PROFILE_UPDATED;

        let changes = self.changes();
        if !changes.is_empty() {
            match client.update_profile(&changes).await {
                Ok(user) => {
                    self.original = user;
                    self.password = None;
                }
                Err(e) => failures.push(e.user_message()),
            }
        }

        if let Some(avatar) = self.avatar.take() {
            match client.update_avatar(avatar.clone()).await {
                Ok(user) => {
                    self.original.avatar = user.avatar;
                    if changes.is_empty() {
                        message = AVATAR_UPDATED;
                    }
                }
                Err(e) => {
                    self.avatar = Some(avatar);
                    failures.push(e.user_message());
                }
            }
        }

        failures.into_result(SubmitOutcome::new(message))
    }
}
