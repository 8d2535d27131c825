//! Account administration commands.
//!
//! # Usage
//!
//! ```bash
//! buy01 admin users
//! buy01 admin delete-user 65f1a9
//! ```

use buy01_core::{UserId, reverse_list};
use buy01_storefront::StorefrontClient;

use super::{CliError, require};

const DASHBOARD_ROUTE: &str = "/dashboard";

/// List every account, newest first.
pub async fn users(client: &StorefrontClient) -> Result<(), CliError> {
    require(client, DASHBOARD_ROUTE).await?;
    let users = client.users().await?;

    tracing::info!("{} account(s)", users.len());
    for user in reverse_list(&users) {
        tracing::info!("{}  {}  <{}>  {}", user.id, user.name, user.email, user.role);
    }
    Ok(())
}

pub async fn delete_user(client: &StorefrontClient, id: &str) -> Result<(), CliError> {
    require(client, DASHBOARD_ROUTE).await?;
    client.delete_user(&UserId::new(id)).await?;
    tracing::info!("User {id} deleted");
    Ok(())
}
