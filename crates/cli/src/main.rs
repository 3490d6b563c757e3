//! Infpro CLI - storefront client from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse
//! infpro products
//! infpro reviews
//!
//! # Cart
//! infpro cart add kb-01
//! infpro cart list
//! infpro cart remove kb-01
//! infpro cart count
//!
//! # Account
//! infpro register -n "Ana Souza" -e ana@example.com -p 's3nha'
//! infpro login -e ana@example.com -p 's3nha'
//! infpro logout
//!
//! # Theme
//! infpro theme toggle
//! ```
//!
//! Configuration comes from `INFPRO_*` environment variables (see
//! `infpro_storefront::config`). Logs go to stderr, controlled by `RUST_LOG`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use infpro_core::Theme;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod console;

#[derive(Parser)]
#[command(name = "infpro")]
#[command(author, version, about = "Infpro storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// List the product catalog
    Products,
    /// List customer reviews
    Reviews,
    /// Create an account
    Register {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Log in to an existing account
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show or change the colour theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Send a message to the store
    Contact {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// Message body
        #[arg(short, long)]
        message: String,
    },
    /// Ask for a quote
    Quote {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        /// What you need quoted
        #[arg(short, long)]
        details: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    List,
    /// Add one unit of a catalog product
    Add {
        /// Product id from `infpro products`
        id: String,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: String,
    },
    /// Show how many units are in the cart
    Count,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set a specific theme
    Set {
        /// `light` or `dark`
        theme: Theme,
    },
}

#[tokio::main]
async fn main() {
    // Logs to stderr; stdout is reserved for command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "infpro_storefront=info,infpro_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> infpro_storefront::Result<()> {
    let ctx = commands::Context::from_env()?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::List => commands::cart::list(&ctx),
            CartAction::Add { id } => commands::cart::add(&ctx, &id).await?,
            CartAction::Remove { id } => commands::cart::remove(&ctx, &id)?,
            CartAction::Count => commands::cart::count(&ctx),
        },
        Commands::Products => commands::catalog::products(&ctx).await,
        Commands::Reviews => commands::catalog::reviews(&ctx).await,
        Commands::Register {
            name,
            email,
            password,
        } => commands::account::register(&ctx, name, email, password).await?,
        Commands::Login { email, password } => {
            commands::account::login(&ctx, email, password).await?;
        }
        Commands::Logout => commands::account::logout(&ctx)?,
        Commands::Theme { action } => match action.unwrap_or(ThemeAction::Show) {
            ThemeAction::Show => commands::theme::show(&ctx),
            ThemeAction::Toggle => commands::theme::toggle(&ctx)?,
            ThemeAction::Set { theme } => commands::theme::set(&ctx, theme)?,
        },
        Commands::Contact {
            name,
            email,
            message,
        } => commands::account::contact(&ctx, name, email, message)?,
        Commands::Quote {
            name,
            email,
            details,
        } => commands::account::quote(&ctx, name, email, details)?,
    }
    Ok(())
}
