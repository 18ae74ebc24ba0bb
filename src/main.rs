//! Noteful API - Main Server
//!
//! REST API for tags and folders backed by Neo4j.

use anyhow::Result;
use clap::{Parser, Subcommand};
use noteful_api::{seed, AppState, Config};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "noteful")]
#[command(about = "Noteful tags and folders API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on (overrides config.yaml and SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the YAML config file
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,
    },

    /// Load seed data into the document store
    Seed {
        /// Seed file to load
        #[arg(short, long, default_value = seed::DEFAULT_SEED_FILE)]
        file: PathBuf,

        /// Drop existing tags, folders and notes first
        #[arg(long)]
        reset: bool,

        /// Path to the YAML config file
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,noteful_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, config } => {
            let mut config = Config::from_yaml_and_env(Some(&config))?;
            if let Some(port) = port {
                config.server_port = port;
            }
            noteful_api::start_server(config).await
        }
        Commands::Seed {
            file,
            reset,
            config,
        } => run_seed(Config::from_yaml_and_env(Some(&config))?, &file, reset).await,
    }
}

async fn run_seed(config: Config, file: &std::path::Path, reset: bool) -> Result<()> {
    tracing::info!("Seeding from {}", file.display());

    let data = seed::SeedData::load(file)?;
    let state = AppState::new(config).await?;
    tracing::info!("Connected to document store");

    let report = seed::apply(state.store.as_ref(), &data, reset).await?;

    tracing::info!(
        "Seed complete: {} folders, {} tags, {} notes",
        report.folders,
        report.tags,
        report.notes
    );

    Ok(())
}
