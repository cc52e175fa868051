//! StyleHub CLI - browse the catalog, manage the cart and wishlist.
//!
//! # Usage
//!
//! ```bash
//! # Load the seed catalog into the store
//! stylehub seed
//!
//! # Browse and filter products
//! stylehub products --category men --sort price-low
//! stylehub products --search shoes --brand Nike --min-price 1000
//!
//! # Cart
//! stylehub cart add 3 M --quantity 2
//! stylehub cart show
//!
//! # Wishlist
//! stylehub wishlist toggle 3
//! ```
//!
//! # Commands
//!
//! - `seed` - Load the catalog seed documents into the store
//! - `products` / `product` / `categories` - Catalog browsing
//! - `cart` - Cart management
//! - `wishlist` - Wishlist management

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use stylehub_storefront::config::StorefrontConfig;
use stylehub_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "stylehub")]
#[command(author, version, about = "StyleHub storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the catalog seed documents into empty collections
    Seed,
    /// List products, with optional filtering and sorting
    Products(commands::catalog::ProductsArgs),
    /// Show one product
    Product {
        /// Product identity
        id: i64,
    },
    /// List categories
    Categories,
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product identity
        product_id: i64,
        /// Size label (must be one of the product's sizes)
        size: String,
        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Replace a line's quantity
    Update {
        /// Cart line identity
        line_id: i64,
        /// New quantity (>= 1)
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Cart line identity
        line_id: i64,
    },
    /// Empty the cart
    Clear,
    /// Show lines and totals
    Show,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Save a product (idempotent)
    Add {
        /// Product identity
        product_id: i64,
    },
    /// Remove a product (idempotent)
    Remove {
        /// Product identity
        product_id: i64,
    },
    /// Add if absent, remove if present
    Toggle {
        /// Product identity
        product_id: i64,
    },
    /// Show saved products
    Show,
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
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config);

    match cli.command {
        Commands::Seed => commands::seed::run(&state).await?,
        Commands::Products(args) => commands::catalog::products(&state, args).await?,
        Commands::Product { id } => commands::catalog::product(&state, id).await?,
        Commands::Categories => commands::catalog::categories(&state).await?,
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                size,
                quantity,
            } => commands::cart::add(&state, product_id, &size, quantity).await?,
            CartAction::Update { line_id, quantity } => {
                commands::cart::update(&state, line_id, quantity).await?;
            }
            CartAction::Remove { line_id } => commands::cart::remove(&state, line_id).await?,
            CartAction::Clear => commands::cart::clear(&state).await?,
            CartAction::Show => commands::cart::show(&state).await?,
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Add { product_id } => {
                commands::wishlist::add(&state, product_id).await?;
            }
            WishlistAction::Remove { product_id } => {
                commands::wishlist::remove(&state, product_id).await?;
            }
            WishlistAction::Toggle { product_id } => {
                commands::wishlist::toggle(&state, product_id).await?;
            }
            WishlistAction::Show => commands::wishlist::show(&state).await?,
        },
    }
    Ok(())
}
