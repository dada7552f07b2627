//! Filing: folder hierarchy tool
//!
//! Loads configuration, initializes logging and either replays a folder
//! operation script against a fresh in-memory forest or checks the
//! configured database connection.

mod script;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use filing_core::config::AppConfig;
use filing_core::error::AppError;
use filing_database::DatabasePool;
use filing_hierarchy::FolderService;

/// Folder hierarchy tool.
#[derive(Debug, Parser)]
#[command(name = "filing", version, about)]
struct Cli {
    /// Configuration environment overlay (`config/{env}.toml`).
    #[arg(long)]
    env: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a JSON script of folder operations and print the resulting tree.
    Run {
        /// Path to the script file.
        script: PathBuf,
        /// Pretty-print the resulting tree.
        #[arg(long)]
        pretty: bool,
    },
    /// Connect to the configured database and run a health check.
    CheckDb,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_configuration(cli.env.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(cli.command, config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration(env: Option<&str>) -> Result<AppConfig, AppError> {
    let env = env
        .map(str::to_string)
        .or_else(|| std::env::var("FILING_ENV").ok())
        .unwrap_or_else(|| "development".to_string());

    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

async fn run(command: Command, config: AppConfig) -> Result<(), AppError> {
    match command {
        Command::Run { script, pretty } => {
            let source = tokio::fs::read_to_string(&script).await?;
            let steps = script::parse(&source)?;
            tracing::info!(path = %script.display(), steps = steps.len(), "Replaying script");

            let service = FolderService::new(config.hierarchy);
            let report = script::run(&service, &steps).await;
            tracing::info!(
                applied = report.applied,
                rejected = report.failures.len(),
                "Script finished"
            );

            let tree = service.get_tree().await;
            let output = if pretty {
                serde_json::to_string_pretty(&tree)?
            } else {
                serde_json::to_string(&tree)?
            };
            println!("{output}");
            Ok(())
        }
        Command::CheckDb => {
            if !config.database.enabled {
                return Err(AppError::configuration(
                    "Database is disabled; set database.enabled = true",
                ));
            }
            let pool = DatabasePool::connect(&config.database).await?;
            let healthy = pool.health_check().await?;
            pool.close().await;
            if !healthy {
                return Err(AppError::database("Database health check failed"));
            }
            println!("database ok");
            Ok(())
        }
    }
}
