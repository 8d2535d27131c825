//! Account roles.

use serde::{Deserialize, Serialize};

/// Error returned when a role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid role: {0} (expected CLIENT, SELLER or ADMIN)")]
pub struct RoleParseError(pub String);

/// Role of a storefront account.
///
/// Buyers are `CLIENT`s, sellers manage their own products. `ADMIN` accounts
/// are created by the backend and cannot be chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Buyer account.
    Client,
    /// Seller account with product management.
    Seller,
    /// Backend administrator.
    Admin,
}

impl Role {
    /// Whether this role may manage products.
    #[must_use]
    pub const fn is_seller(self) -> bool {
        matches!(self, Self::Seller)
    }

    /// Whether this role can be picked on the sign-up form.
    #[must_use]
    pub const fn is_self_service(self) -> bool {
        matches!(self, Self::Client | Self::Seller)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Client => write!(f, "CLIENT"),
            Self::Seller => write!(f, "SELLER"),
            Self::Admin => write!(f, "ADMIN"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CLIENT" => Ok(Self::Client),
            "SELLER" => Ok(Self::Seller),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_screaming_case() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"SELLER\"");
        let role: Role = serde_json::from_str("\"CLIENT\"").unwrap();
        assert_eq!(role, Role::Client);
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("seller".parse::<Role>().unwrap(), Role::Seller);
        assert_eq!(" Client ".parse::<Role>().unwrap(), Role::Client);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(
            "buyer".parse::<Role>().unwrap_err().to_string(),
            "invalid role: buyer (expected CLIENT, SELLER or ADMIN)"
        );
    }

    #[test]
    fn test_self_service_roles() {
        assert!(Role::Client.is_self_service());
        assert!(Role::Seller.is_self_service());
        assert!(!Role::Admin.is_self_service());
        assert!(Role::Seller.is_seller());
        assert!(!Role::Client.is_seller());
    }
}
