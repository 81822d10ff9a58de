//! Hearth CLI - Database migrations and smoke runs.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! hearth-cli migrate
//!
//! # Drive a scripted browse session against a running storefront
//! hearth-cli smoke --base-url http://127.0.0.1:3000 --query milk
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run storefront database migrations
//! - `smoke` - List, search, add to cart, and submit against a live server

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hearth-cli")]
#[command(author, version, about = "Hearth CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Drive a scripted browse session against a running storefront
    Smoke {
        /// Base URL of the storefront
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        base_url: String,

        /// Search text to type into the session
        #[arg(long, default_value = "milk")]
        query: String,
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
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Smoke { base_url, query } => commands::smoke::run(&base_url, &query).await?,
    }

    Ok(())
}
