//! Profile commands.

use std::path::PathBuf;

use buy01_storefront::{ProfileForm, StorefrontClient, Upload};
use secrecy::SecretString;

use super::{CliError, report, require};

const PROFILE_ROUTE: &str = "/profil";

/// Arguments of `profile update`.
pub struct UpdateArgs {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<PathBuf>,
}

pub async fn show(client: &StorefrontClient) -> Result<(), CliError> {
    require(client, PROFILE_ROUTE).await?;
    let user = client.load_profile().await?;

    tracing::info!("{} ({})", user.name, user.initials());
    tracing::info!("  Email: {}", user.email);
    tracing::info!("  Role: {}", user.role);
    if let Some(avatar) = &user.avatar {
        tracing::info!("  Avatar: {avatar}");
    }
    if let Some(created_at) = user.created_at {
        tracing::info!("  Member since: {}", created_at.format("%Y-%m-%d"));
    }
    Ok(())
}

/// Send changed fields, then the avatar.
pub async fn update(client: &StorefrontClient, args: UpdateArgs) -> Result<(), CliError> {
    require(client, PROFILE_ROUTE).await?;
    let user = client.load_profile().await?;

    let mut form = ProfileForm::from_user(&user);
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(email) = args.email {
        form.email = email;
    }
    form.password = args.password.map(SecretString::from);
    if let Some(path) = args.avatar {
        form.avatar = Some(Upload::from_path(path).await?);
    }

    let outcome = form.submit(client).await?;
    report(&outcome);
    Ok(())
}
