//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! buy01 auth register -n "Jane Doe" -e jane@shop.com -p 'password123' -r SELLER --avatar me.png
//! buy01 auth login -e jane@shop.com -p 'password123'
//! buy01 auth whoami
//! buy01 auth logout
//! ```

use std::path::PathBuf;

use buy01_core::Role;
use buy01_storefront::{AuthForm, StorefrontClient, Upload};
use secrecy::SecretString;

use super::{CliError, report};

/// Arguments of `auth register`.
pub struct RegisterArgs {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub avatar: Option<PathBuf>,
}

/// Sign in and show who we are signed in as.
pub async fn login(
    client: &StorefrontClient,
    email: String,
    password: String,
) -> Result<(), CliError> {
    let mut form = AuthForm::new();
    form.email = email;
    form.password = SecretString::from(password);

    let outcome = form.submit(client).await?;
    report(&outcome);

    if let Some(user) = client.current_user() {
        tracing::info!("Signed in as {} <{}> ({})", user.name, user.email, user.role);
    }
    Ok(())
}

/// Create an account. The password doubles as its confirmation.
pub async fn register(client: &StorefrontClient, args: RegisterArgs) -> Result<(), CliError> {
    let mut form = AuthForm::new();
    form.toggle_mode();
    form.name = args.name;
    form.email = args.email;
    form.password = SecretString::from(args.password.clone());
    form.confirm_password = SecretString::from(args.password);
    form.role = args.role;
    if let Some(path) = args.avatar {
        form.avatar = Some(Upload::from_path(path).await?);
    }

    let outcome = form.submit(client).await?;
    report(&outcome);
    Ok(())
}

pub fn logout(client: &StorefrontClient) {
    client.sign_out();
    tracing::info!("Signed out");
}

/// Verify the stored session and print the account.
pub async fn whoami(client: &StorefrontClient) -> Result<(), CliError> {
    if !client.check_auth().await {
        tracing::info!("Not signed in");
        return Ok(());
    }

    match client.current_user() {
        Some(user) => {
            tracing::info!("{} <{}>", user.name, user.email);
            tracing::info!("  Id: {}", user.id);
            tracing::info!("  Role: {}", user.role);
            tracing::info!("  Initials: {}", user.initials());
        }
        None => tracing::info!("Signed in, profile not loaded"),
    }
    Ok(())
}
