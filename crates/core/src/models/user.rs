//! Storefront account record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Email, Role, UserId, timestamp};

/// A storefront account as returned by the user endpoints.
///
/// Fetched on login and profile load, replaced after profile updates and
/// dropped on sign-out. The cached copy in session storage uses the same
/// JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Account email address.
    pub email: Email,
    /// Display name.
    pub name: String,
    /// Account role.
    pub role: Role,
    /// Avatar path or URL, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// When the account was created (not every endpoint returns it).
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether this account may manage products.
    #[must_use]
    pub const fn is_seller(&self) -> bool {
        self.role.is_seller()
    }

    /// Up to two upper-case initials from the display name.
    #[must_use]
    pub fn initials(&self) -> String {
        let parts: Vec<&str> = self.name.split_whitespace().collect();
        let pick = |s: &&str| s.chars().next();
        match parts.as_slice() {
            [] => String::new(),
            [only] => pick(only).into_iter().collect::<String>().to_uppercase(),
            [first, .., last] => [pick(first), pick(last)]
                .into_iter()
                .flatten()
                .collect::<String>()
                .to_uppercase(),
        }
    }
}
