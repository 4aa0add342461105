//! Threadline CLI - migrations, catalog queries and snapshot maintenance.
//!
//! # Usage
//!
//! ```bash
//! # Create the snapshot table in the storefront database
//! threadline migrate
//!
//! # Query the seed catalog the same way the storefront listing does
//! threadline products --category tops --sizes S,M --sort price --order asc
//!
//! # Dashboard numbers for the seed catalog
//! threadline dashboard
//!
//! # Inspect or reset the persisted cart/wishlist snapshot
//! threadline snapshot show
//! threadline snapshot clear
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "threadline")]
#[command(author, version, about = "Threadline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// List seed catalog products with filters, sorting and pagination
    Products(ProductArgs),
    /// Print dashboard numbers for the seed catalog
    Dashboard {
        /// Seed file (defaults to the embedded seed)
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Inspect the persisted cart/wishlist snapshot
    Snapshot {
        #[command(subcommand)]
        action: SnapshotAction,
    },
}

#[derive(Debug, clap::Args)]
struct ProductArgs {
    /// Seed file (defaults to the embedded seed)
    #[arg(long)]
    seed: Option<PathBuf>,
    /// Case-insensitive search over name, description and tags
    #[arg(short, long)]
    search: Option<String>,
    #[arg(short, long)]
    category: Option<String>,
    #[arg(long)]
    sub_category: Option<String>,
    #[arg(long)]
    min_price: Option<Decimal>,
    #[arg(long)]
    max_price: Option<Decimal>,
    /// Comma-separated sizes; products offering any of them match
    #[arg(long)]
    sizes: Option<String>,
    /// Comma-separated colors; products offering any of them match
    #[arg(long)]
    colors: Option<String>,
    /// Sort key: name, price, rating or createdAt
    #[arg(long)]
    sort: Option<String>,
    /// Sort order: asc or desc
    #[arg(long)]
    order: Option<String>,
    #[arg(short, long, default_value_t = 1)]
    page: usize,
    #[arg(long, default_value_t = 12)]
    page_size: usize,
}

#[derive(Subcommand)]
enum SnapshotAction {
    /// Print the stored snapshot as JSON
    Show,
    /// Replace the stored snapshot with an empty cart and wishlist
    Clear,
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
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Products(args) => commands::catalog::products(args).await?,
        Commands::Dashboard { seed } => commands::catalog::dashboard(seed.as_deref()).await?,
        Commands::Snapshot { action } => match action {
            SnapshotAction::Show => commands::snapshot::show().await?,
            SnapshotAction::Clear => commands::snapshot::clear().await?,
        },
    }
    Ok(())
}
