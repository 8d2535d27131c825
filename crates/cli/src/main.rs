//! Buy01 CLI - Command-line storefront for the Buy01 marketplace.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session is kept in ~/.buy01/session.json)
//! buy01 auth login -e jane@shop.com -p 'password123'
//!
//! # Browse the catalog
//! buy01 products list --search lamp --sort price --desc
//!
//! # Seller: create a product with two images
//! buy01 products create --name Lamp --description "LED desk lamp" \
//!     --price 159 --quantity 8 --image lamp.png --image lamp-side.png
//!
//! # Check what the route guard says about a page
//! buy01 guard /dashboard
//! ```
//!
//! # Commands
//!
//! - `auth` - Sign in, sign up, sign out, show the current account
//! - `products` - Browse, create, edit and delete products
//! - `profile` - Show or update the signed-in profile
//! - `admin` - List and delete accounts
//! - `guard` - Print the route guard decision for a URL

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use buy01_core::Role;
use buy01_storefront::{SortField, StorefrontClient, StorefrontConfig};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "buy01")]
#[command(author, version, about = "Buy01 storefront from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in, sign up and sign out
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Browse and manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Show or update your profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Manage accounts (admin only)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Print the route guard decision for a URL
    Guard {
        /// Route to check, e.g. `/dashboard`
        url: String,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Account role (`CLIENT` or `SELLER`)
        #[arg(short, long, default_value = "CLIENT")]
        role: Role,

        /// Avatar image (jpeg, png, gif or webp, at most 5MB)
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products, newest first
    List {
        /// Only your own products (sellers)
        #[arg(long)]
        mine: bool,

        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,

        /// Only this category (`Other` for uncategorized)
        #[arg(long)]
        category: Option<String>,

        /// Sort by `name`, `price` or `date`
        #[arg(long)]
        sort: Option<SortField>,

        /// Reverse the sort order
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Show one product
    Show { id: String },
    /// Create a product
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        price: Decimal,

        #[arg(long)]
        quantity: i64,

        #[arg(long)]
        category: Option<String>,

        /// Image to attach (repeatable)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },
    /// Edit a product's fields and images
    Edit {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        price: Option<Decimal>,

        #[arg(long)]
        quantity: Option<i64>,

        #[arg(long)]
        category: Option<String>,

        /// Image to upload (repeatable)
        #[arg(long = "add-image")]
        add_images: Vec<PathBuf>,

        /// Media id of an image to delete (repeatable)
        #[arg(long = "remove-image")]
        remove_images: Vec<String>,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show your profile
    Show,
    /// Update profile fields and avatar
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        password: Option<String>,

        #[arg(long)]
        avatar: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// List every account
    Users,
    /// Delete an account
    DeleteUser { id: String },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::debug!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "buy01_storefront=info,buy01_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let client = StorefrontClient::new(config)?;

    match cli.command {
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&client, email, password).await?;
            }
            AuthAction::Register {
                name,
                email,
                password,
                role,
                avatar,
            } => {
                let registration = commands::auth::RegisterArgs {
                    name,
                    email,
                    password,
                    role,
                    avatar,
                };
                commands::auth::register(&client, registration).await?;
            }
            AuthAction::Logout => commands::auth::logout(&client),
            AuthAction::Whoami => commands::auth::whoami(&client).await?,
        },
        Commands::Products { action } => match action {
            ProductAction::List {
                mine,
                search,
                category,
                sort,
                desc,
            } => {
                let filter = commands::products::ListArgs {
                    mine,
                    search,
                    category,
                    sort,
                    desc,
                };
                commands::products::list(&client, filter).await?;
            }
            ProductAction::Show { id } => commands::products::show(&client, &id).await?,
            ProductAction::Create {
                name,
                description,
                price,
                quantity,
                category,
                images,
            } => {
                let fields = commands::products::ProductArgs {
                    name: Some(name),
                    description: Some(description),
                    price: Some(price),
                    quantity: Some(quantity),
                    category,
                };
                commands::products::create(&client, fields, &images).await?;
            }
            ProductAction::Edit {
                id,
                name,
                description,
                price,
                quantity,
                category,
                add_images,
                remove_images,
            } => {
                let fields = commands::products::ProductArgs {
                    name,
                    description,
                    price,
                    quantity,
                    category,
                };
                commands::products::edit(&client, &id, fields, &add_images, &remove_images)
                    .await?;
            }
            ProductAction::Delete { id } => commands::products::delete(&client, &id).await?,
        },
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&client).await?,
            ProfileAction::Update {
                name,
                email,
                password,
                avatar,
            } => {
                let update = commands::profile::UpdateArgs {
                    name,
                    email,
                    password,
                    avatar,
                };
                commands::profile::update(&client, update).await?;
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Users => commands::admin::users(&client).await?,
            AdminAction::DeleteUser { id } => commands::admin::delete_user(&client, &id).await?,
        },
        Commands::Guard { url } => commands::guard::check(&client, &url).await,
    }
    Ok(())
}
