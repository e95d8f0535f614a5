//! Creators Hub CLI - the storefront and admin console surface.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! hub-cli products list --category lighting
//!
//! # Shop
//! hub-cli cart add 665f1c2e9b1d
//! hub-cli cart show
//! hub-cli orders checkout --address "1 Maker Way" --city Lagos --zip 100001
//!
//! # Authentication
//! hub-cli auth login -e ada@example.com -p <password>
//! hub-cli auth verify 482913
//!
//! # Admin console (requires an admin session)
//! hub-cli admin analytics
//! hub-cli admin set-role <user-id> admin -p <password>
//! ```
//!
//! # Environment Variables
//!
//! - `HUB_API_URL` - Base URL of the Hub backend (default: `http://localhost:5000/api`)
//! - `HUB_DATA_DIR` - Directory for the persisted session and cart

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use creators_hub_storefront::{AppState, HubConfig};

mod commands;

#[derive(Parser)]
#[command(name = "hub-cli")]
#[command(author, version, about = "Creators Hub storefront & admin console")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: commands::products::ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Log in, register, and manage the session
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Checkout and order history
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrdersAction,
    },
    /// Admin console
    Admin {
        #[command(subcommand)]
        action: commands::admin::AdminAction,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = HubConfig::from_env()?;
    let state = AppState::new(config);

    // Each invocation is one "page load": resolve the stored session first,
    // then fetch settings best-effort (prices fall back to a $ prefix).
    state.session().bootstrap().await;
    if let Err(e) = state.settings().load().await {
        tracing::debug!(error = %e, "settings unavailable");
    }

    match cli.command {
        Commands::Products { action } => commands::products::run(&state, action).await,
        Commands::Cart { action } => commands::cart::run(&state, action).await,
        Commands::Auth { action } => commands::auth::run(&state, action).await,
        Commands::Orders { action } => commands::orders::run(&state, action).await,
        Commands::Admin { action } => commands::admin::run(&state, action).await,
    }
}
