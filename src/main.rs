use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use record_pipelines::app::{publish, DirectoryJoinUseCase, RankingUseCase};
use record_pipelines::config::Config;
use record_pipelines::infra::JsonReportWriter;
use record_pipelines::logging;

#[derive(Parser)]
#[command(name = "record-pipelines")]
#[command(about = "Join client directories with orders and pick the newest unique records")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich orders with phone numbers from a client directory
    Join {
        /// JSON array of raw client records
        #[arg(long)]
        clients: PathBuf,
        /// JSON array of orders ({"name", "order"})
        #[arg(long)]
        orders: PathBuf,
    },
    /// Keep the newest record per identity, up to a limit
    Top {
        /// JSON array of records ({"userId", "timestamp"})
        #[arg(long)]
        records: PathBuf,
        /// Overrides ranking.limit from the config
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse '{}'", path.display()))
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    let output = JsonReportWriter::stdout();

    match cli.command {
        Commands::Join { clients, orders } => {
            let clients: Vec<Value> = read_json(&clients)?;
            let orders: Vec<Value> = read_json(&orders)?;

            let use_case = DirectoryJoinUseCase::from_config(&config.directory_join);
            let report = use_case.run(&clients, &orders)?;
            publish(&output, &report)?;
        }
        Commands::Top { records, limit } => {
            let records: Vec<Value> = read_json(&records)?;

            let use_case = match limit {
                Some(limit) => RankingUseCase::new(limit),
                None => RankingUseCase::from_config(&config.ranking),
            };
            let report = use_case.run_values(&records)?;
            publish(&output, &report)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;
    let _guard = logging::init_logging(&config.logging)?;

    info!("Configuration loaded");
    if let Err(e) = run(cli, &config) {
        error!("Run failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}
