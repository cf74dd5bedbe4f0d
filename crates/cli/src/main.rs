//! Phantom Spares CLI - shop the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog (seeded, so ids mean the same part on every run)
//! phantom-cli products list --query brake --sort price-low
//! phantom-cli products show 12
//! phantom-cli --seed 7 products list
//!
//! # Manage the cart
//! phantom-cli cart add 12 --quantity 2
//! phantom-cli cart show
//!
//! # Sign in and check out
//! phantom-cli auth login -e wanjiru@example.com -p secret
//! phantom-cli checkout
//! ```
//!
//! The cart and the signed-in user are shared with the storefront server
//! through `STOREFRONT_DATA_DIR`; every other `STOREFRONT_*` variable is
//! honored as well.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use phantom_spares_core::ProductId;
use phantom_spares_storefront::config::StorefrontConfig;

mod commands;

use commands::{CliError, Shop};

#[derive(Parser)]
#[command(name = "phantom-cli")]
#[command(author, version, about = "Victoria Phantom Spares command-line shopper")]
struct Cli {
    /// Seed for the catalog [default: STOREFRONT_CATALOG_SEED, else 1]
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Generate a fresh random catalog; product ids will not carry over
    /// between invocations
    #[arg(long, global = true, conflicts_with = "seed")]
    random_catalog: bool,

    /// Directory holding the persisted cart and user
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in, register or sign out
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Place an order for the cart (requires sign-in)
    Checkout,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List products
    List {
        /// Case-insensitive search on name and category
        #[arg(short, long, default_value = "")]
        query: String,

        /// featured, price-low, price-high, name-asc, name-desc or rating
        #[arg(short, long)]
        sort: Option<String>,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Show a product with related products
    Show {
        id: ProductId,
    },
    /// List categories
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product
    Add {
        id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Replace a line's quantity
    Update {
        id: ProductId,
        quantity: u32,
    },
    /// Remove a line
    Remove {
        id: ProductId,
    },
    /// Remove every line
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Display name (defaults to the part of the email before the @)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show the signed-in shopper
    Whoami,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; quiet unless RUST_LOG says otherwise
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(report) => commands::emit(&report),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

/// Catalog seed used when neither `--seed` nor the environment picks one,
/// so a product id means the same part from one invocation to the next.
const DEFAULT_SEED: u64 = 1;

/// Layer command-line overrides on top of the environment configuration.
fn apply_overrides(config: &mut StorefrontConfig, cli: &Cli) {
    config.catalog_seed = if cli.random_catalog {
        None
    } else {
        cli.seed.or(config.catalog_seed).or(Some(DEFAULT_SEED))
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
}

async fn run(cli: Cli) -> Result<String, CliError> {
    let mut config = StorefrontConfig::from_env()?;
    apply_overrides(&mut config, &cli);

    let mut shop = Shop::open(config)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List { query, sort, page } => {
                commands::products::list(&shop, &query, sort.as_deref(), page)
            }
            ProductsAction::Show { id } => commands::products::show(&shop, id),
            ProductsAction::Categories => Ok(commands::products::categories(&shop)),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => Ok(commands::cart::show(&shop.cart)),
            CartAction::Add { id, quantity } => commands::cart::add(&mut shop, id, quantity),
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut shop, id, quantity)
            }
            CartAction::Remove { id } => commands::cart::remove(&mut shop, id),
            CartAction::Clear => commands::cart::clear(&mut shop),
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&mut shop, &email, &password).await
            }
            AuthAction::Register {
                email,
                password,
                name,
            } => commands::auth::register(&mut shop, &email, &password, name.as_deref()).await,
            AuthAction::Logout => commands::auth::logout(&mut shop),
            AuthAction::Whoami => Ok(commands::auth::whoami(&shop.auth)),
        },
        Commands::Checkout => commands::checkout::run(&mut shop).await,
    }
}
