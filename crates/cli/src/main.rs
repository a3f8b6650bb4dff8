//! Boutique CLI - storage maintenance and order administration.
//!
//! # Usage
//!
//! ```bash
//! # Upgrade stored blobs to the current layout
//! boutique migrate
//!
//! # Browse the catalog
//! boutique products --featured
//! boutique products --query apple --category Smartphones
//!
//! # Administer orders
//! boutique orders list --status pending
//! boutique orders set-status 3f2b9c1e-... shipped
//!
//! # Show the testimonial wall
//! boutique testimonials
//! ```
//!
//! Every command works on the data directory given by `--data-dir`
//! (or `BOUTIQUE_DATA_DIR`, default `data`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use boutique_core::OrderStatus;
use boutique_storefront::config::DEFAULT_DATA_DIR;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "boutique")]
#[command(author, version, about = "Boutique storefront tools")]
struct Cli {
    /// Directory holding the storefront's stored data
    #[arg(long, global = true, env = "BOUTIQUE_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upgrade stored cart, order and testimonial data to the current layout
    Migrate,
    /// List catalog products
    Products {
        /// Only featured products
        #[arg(long)]
        featured: bool,

        /// Text to look for in name, description or category
        #[arg(short, long)]
        query: Option<String>,

        /// Exact category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Administer orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// List testimonials
    Testimonials,
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List orders
    List {
        /// Only orders in this status
        #[arg(short, long)]
        status: Option<OrderStatus>,

        /// Text to look for in customer name, email or order id
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Move an order to another status
    SetStatus {
        /// Order id, or a unique prefix of one as shown by `orders list`
        order_id: String,

        /// New status (pending, processing, shipped, delivered, cancelled)
        status: OrderStatus,

        /// Skip the transition check
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before parsing so `env = ...` arguments see it
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boutique_storefront=info,boutique=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            // Allow: command output goes to stdout
            #[allow(clippy::print_stdout)]
            {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<String, commands::CliError> {
    let storage = commands::open_storage(cli.data_dir)?;

    match cli.command {
        Commands::Migrate => commands::migrate::run(&storage),
        Commands::Products {
            featured,
            query,
            category,
        } => Ok(commands::products::run(featured, query, category).await),
        Commands::Orders { action } => match action {
            OrdersAction::List { status, query } => {
                commands::orders::list(&storage, status, query)
            }
            OrdersAction::SetStatus {
                order_id,
                status,
                force,
            } => commands::orders::set_status(&storage, &order_id, status, force),
        },
        Commands::Testimonials => commands::testimonials::run(&storage),
    }
}
