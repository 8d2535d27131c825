//! CLI command implementations.

pub mod admin;
pub mod auth;
pub mod guard;
pub mod products;
pub mod profile;

use buy01_storefront::{
    ApiError, ConfigError, FormError, GuardDecision, StorefrontClient, SubmitOutcome,
};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    #[error("{}", .0.user_message())]
    Form(#[from] FormError),

    /// The route guard turned the command away.
    #[error("Access to {route} denied: {decision}")]
    Denied {
        route: &'static str,
        decision: GuardDecision,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Run the route guard for the page a command stands in for.
async fn require(client: &StorefrontClient, route: &'static str) -> Result<(), CliError> {
    match client.can_activate(route).await {
        GuardDecision::Allow => Ok(()),
        decision => Err(CliError::Denied { route, decision }),
    }
}

fn report(outcome: &SubmitOutcome) {
    tracing::info!("{}", outcome.message);
    if let Some(next) = &outcome.redirect_to {
        tracing::debug!(next = %next, "Next page");
    }
}
