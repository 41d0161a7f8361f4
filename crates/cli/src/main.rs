//! Turnera CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! turnera-cli migrate
//!
//! # Seed a demo tenant with services, staff, and shifts
//! turnera-cli seed
//!
//! # Seed with a custom slug
//! turnera-cli seed --slug my-salon --name "My Salon"
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with a demo tenant

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "turnera-cli")]
#[command(author, version, about = "Turnera CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a demo tenant
    Seed {
        /// Tenant slug
        #[arg(long, default_value = "tamanaco-spa")]
        slug: String,

        /// Tenant display name
        #[arg(long, default_value = "Tamanaco Spa")]
        name: String,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { slug, name } => commands::seed::run(&slug, &name).await?,
    }
    Ok(())
}
