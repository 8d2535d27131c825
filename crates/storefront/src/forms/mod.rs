//! Multi-step form orchestration.
//!
//! Forms hold user input, validate it locally and drive one or more service
//! calls on submit. The final outcome (success or aggregated failure) is
//! both returned and published on the client's notifier.
//!
//! # Forms
//!
//! - [`ProductForm`] - create a product, or edit fields and images
//! - [`ProfileForm`] - edit profile fields and avatar
//! - [`AuthForm`] - sign in or sign up

mod auth;
mod carousel;
mod product;
mod profile;

pub use auth::{AuthForm, AuthMode, SIGN_IN_SUCCESS, SIGN_UP_SUCCESS};
pub use carousel::{Carousel, VISIBLE_SLIDES};
pub use product::{FormMode, ProductForm};
pub use profile::ProfileForm;

use thiserror::Error;

use crate::client::StorefrontClient;
use crate::error::ApiError;

/// Separator between the messages of failed submission steps.
pub const PARTIAL_SEPARATOR: &str = "; ";

/// Why a form submission did not fully succeed.
#[derive(Debug, Error)]
pub enum FormError {
    /// Local validation failed; nothing was sent.
    #[error("{}", .0.join(" "))]
    Invalid(Vec<String>),

    /// The single request of a one-step submission failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// At least one step of a multi-step submission failed. Steps that
    /// succeeded are not rolled back.
    #[error("{0}")]
    Partial(String),
}

impl FormError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::Invalid(_) | Self::Partial(_) => self.to_string(),
        }
    }
}

/// Successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub message: String,
    /// Route to navigate to next, if any.
    pub redirect_to: Option<String>,
}

impl SubmitOutcome {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect_to: None,
        }
    }
}

/// Failure messages collected across the steps of one submission.
#[derive(Debug, Default)]
struct StepFailures(Vec<String>);

impl StepFailures {
    fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    fn into_result(self, success: SubmitOutcome) -> Result<SubmitOutcome, FormError> {
        if self.0.is_empty() {
            Ok(success)
        } else {
            Err(FormError::Partial(self.0.join(PARTIAL_SEPARATOR)))
        }
    }
}

/// Publish the outcome of a submission and hand it back.
fn publish(
    client: &StorefrontClient,
    result: Result<SubmitOutcome, FormError>,
) -> Result<SubmitOutcome, FormError> {
    match &result {
        Ok(outcome) => client.notifier().success(outcome.message.clone()),
        Err(e) => client.notifier().error(e.user_message()),
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_step_failures_join() {
        let mut failures = StepFailures::default();
        failures.push("Resource not found.");
        failures.push("1 of 2 image(s) failed to delete: m1: Resource not found.");
        let err = failures.into_result(SubmitOutcome::new("ok")).unwrap_err();
        assert_eq!(
            err.user_message(),
            "Resource not found.; 1 of 2 image(s) failed to delete: m1: Resource not found."
        );
    }

    #[test]
    fn test_no_failures_is_success() {
        let outcome = StepFailures::default()
            .into_result(SubmitOutcome::new("Saved"))
            .unwrap_or_else(|_| SubmitOutcome::new("wrong"));
        assert_eq!(outcome.message, "Saved");
    }

    #[test]
    fn test_api_error_message_passthrough() {
        let err = FormError::from(ApiError::Status { status: 401, message: None });
        assert_eq!(
            err.user_message(),
            "The password you’ve entered is incorrect. Please try again."
        );
    }
}
