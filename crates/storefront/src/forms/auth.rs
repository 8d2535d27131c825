use buy01_core::{Email, Role};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use super::{FormError, SubmitOutcome, publish};
use crate::client::StorefrontClient;
use crate::services::{Credentials, Registration};
use crate::upload::Upload;

pub const SIGN_IN_SUCCESS: &str = "Sign in successful! Redirecting...";
pub const SIGN_UP_SUCCESS: &str = "Account created successfully! Please sign in.";

/// Minimum password length at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Combined sign-in / sign-up form.
#[derive(Debug, Clone)]
pub struct AuthForm {
    mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub role: Role,
    pub avatar: Option<Upload>,
    /// Where to go after signing in; set when a guard redirected here.
    pub return_url: Option<String>,
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthForm {
    /// Empty form in sign-in mode.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: AuthMode::SignIn,
            name: String::new(),
            email: String::new(),
            password: SecretString::from(String::new()),
            confirm_password: SecretString::from(String::new()),
            role: Role::Client,
            avatar: None,
            return_url: None,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Switch between sign-in and sign-up, clearing the confirmation.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.confirm_password = SecretString::from(String::new());
    }

    /// # Errors
    ///
    /// Returns `FormError::Invalid` listing each problem for the current mode.
    pub fn validate(&self) -> Result<(), FormError> {
        let mut problems = Vec::new();
        if let Err(e) = Email::parse(&self.email) {
            problems.push(e.to_string());
        }

        let password = self.password.expose_secret();
        match self.mode {
            AuthMode::SignIn => {
                if password.is_empty() {
                    problems.push("Password is required.".to_string());
                }
            }
            AuthMode::SignUp => {
                if self.name.trim().is_empty() {
                    problems.push("Name is required.".to_string());
                }
                if password.chars().count() < MIN_PASSWORD_LEN {
                    problems.push(format!(
                        "Password must be at least {MIN_PASSWORD_LEN} characters."
                    ));
                }
                if password != self.confirm_password.expose_secret() {
                    problems.push("Passwords do not match.".to_string());
                }
                if !self.role.is_self_service() {
                    problems.push("Role must be CLIENT or SELLER.".to_string());
                }
                if let Some(avatar) = &self.avatar
                    && let Err(e) = avatar.validate_avatar()
                {
                    problems.push(e.user_message());
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(FormError::Invalid(problems))
        }
    }

    /// Sign in or sign up, publishing the outcome.
    ///
    /// A successful sign-up switches the form back to sign-in mode with the
    /// email kept and the passwords cleared.
    ///
    /// # Errors
    ///
    /// - `FormError::Invalid` if validation fails; nothing is sent
    /// - `FormError::Api` if the backend call fails
    #[instrument(skip(self, client), fields(mode = ?self.mode))]
    pub async fn submit(&mut self, client: &StorefrontClient) -> Result<SubmitOutcome, FormError> {
        let result = self.run(client).await;
        publish(client, result)
    }

    async fn run(&mut self, client: &StorefrontClient) -> Result<SubmitOutcome, FormError> {
        self.validate()?;

        match self.mode {
            AuthMode::SignIn => {
                let credentials = Credentials {
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                };
                client.sign_in(&credentials).await?;
                Ok(SubmitOutcome {
                    message: SIGN_IN_SUCCESS.to_string(),
                    redirect_to: Some(self.return_url.take().unwrap_or_else(|| "/".to_string())),
                })
            }
            AuthMode::SignUp => {
                let registration = Registration {
                    name: self.name.trim().to_string(),
                    email: self.email.trim().to_string(),
                    password: self.password.clone(),
                    role: self.role,
                };
                client.sign_up(&registration, self.avatar.clone()).await?;

                self.toggle_mode();
                self.password = SecretString::from(String::new());
                self.avatar = None;
                Ok(SubmitOutcome::new(SIGN_UP_SUCCESS))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sign_up_form() -> AuthForm {
        let mut form = AuthForm::new();
        form.toggle_mode();
        form.name = "Jane".to_string();
        form.email = "jane@shop.com".to_string();
        form.password = SecretString::from("password123".to_string());
        form.confirm_password = SecretString::from("password123".to_string());
        form.role = Role::Seller;
        form
    }

    fn problems(form: &AuthForm) -> Vec<String> {
        match form.validate() {
            Err(FormError::Invalid(problems)) => problems,
            other => panic!("expected invalid form, got {other:?}"),
        }
    }

    #[test]
    fn test_sign_in_requires_email_and_password() {
        let form = AuthForm::new();
        assert_eq!(form.mode(), AuthMode::SignIn);
        assert_eq!(problems(&form).len(), 2);
    }

    #[test]
    fn test_valid_sign_up() {
        assert!(sign_up_form().validate().is_ok());
    }

    #[test]
    fn test_sign_up_rules() {
        let mut form = sign_up_form();
        form.confirm_password = SecretString::from("password124".to_string());
        assert_eq!(problems(&form), vec!["Passwords do not match.".to_string()]);

        let mut form = sign_up_form();
        form.password = SecretString::from("short".to_string());
        form.confirm_password = SecretString::from("short".to_string());
        assert_eq!(problems(&form).len(), 1);

        let mut form = sign_up_form();
        form.role = Role::Admin;
        assert_eq!(
            problems(&form),
            vec!["Role must be CLIENT or SELLER.".to_string()]
        );
    }

    #[test]
    fn test_toggle_clears_confirmation() {
        let mut form = sign_up_form();
        form.toggle_mode();
        assert_eq!(form.mode(), AuthMode::SignIn);
        assert!(form.confirm_password.expose_secret().is_empty());
        assert!(form.validate().is_ok());
    }
}
