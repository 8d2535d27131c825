//! Route guard.
//!
//! Decides whether the current session may open a route. Unauthenticated
//! sessions are sent to the sign-in page with the requested route kept as
//! the return URL; clients are confined to the home and profile pages.

use buy01_core::{Role, User};
use tracing::{debug, instrument};

use crate::client::StorefrontClient;

/// Sign-in page.
pub const AUTH_ROUTE: &str = "/auth";

/// Home page.
pub const HOME_ROUTE: &str = "/";

/// Routes a `CLIENT` may open.
pub const CLIENT_ROUTES: [&str; 2] = ["/", "/profil"];

/// A navigable route and whether it needs the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub guarded: bool,
}

/// Every route of the storefront.
pub static ROUTES: [Route; 6] = [
    Route { path: "/", guarded: true },
    Route { path: "/auth", guarded: false },
    Route { path: "/dashboard", guarded: true },
    Route { path: "/profil", guarded: true },
    Route { path: "/products/new", guarded: true },
    Route { path: "/products/myproduct", guarded: true },
];

/// Route table entry for `url`, ignoring any query string.
#[must_use]
pub fn route(url: &str) -> Option<&'static Route> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    ROUTES.iter().find(|route| route.path == path)
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect {
        to: String,
        /// Where to come back to after signing in.
        return_url: Option<String>,
    },
}

impl GuardDecision {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

impl std::fmt::Display for GuardDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Redirect { to, return_url: None } => write!(f, "redirect to {to}"),
            Self::Redirect {
                to,
                return_url: Some(back),
            } => write!(f, "redirect to {to} (returnUrl={back})"),
        }
    }
}

/// Pure guard rule.
///
/// An authenticated session with no cached user is allowed through.
#[must_use]
pub fn authorize(authenticated: bool, user: Option<&User>, url: &str) -> GuardDecision {
    if !authenticated {
        return GuardDecision::Redirect {
            to: AUTH_ROUTE.to_string(),
            return_url: Some(url.to_string()),
        };
    }

    match user {
        Some(user) if user.role == Role::Client && !CLIENT_ROUTES.contains(&url) => {
            GuardDecision::Redirect {
                to: HOME_ROUTE.to_string(),
                return_url: None,
            }
        }
        _ => GuardDecision::Allow,
    }
}

impl StorefrontClient {
    /// Verify the session with the backend, then apply the guard rule.
    #[instrument(skip(self))]
    pub async fn can_activate(&self, url: &str) -> GuardDecision {
        let authenticated = self.check_auth().await;
        let user = self.current_user();
        let decision = authorize(authenticated, user.as_ref(), url);
        debug!(%decision, "Guard decision");
        decision
    }
}
