//! repometa-gateway - rate-limited GitHub repository metadata service

#![allow(missing_docs)]

use clap::Parser;
use repometa_gateway::utils::logging::init_logging;
use repometa_gateway::{Config, GIT_HASH, server};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "gateway", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "REPOMETA_CONFIG", default_value = "config/gateway.yaml")]
    config: PathBuf,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let (config, missing_config) = if cli.config.exists() {
        match Config::from_file(&cli.config).await {
            Ok(config) => (config, None),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        match Config::from_env() {
            Ok(config) => (config, Some(cli.config.display().to_string())),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    };

    let mut config = config;
    if let Some(host) = cli.host {
        config.gateway.server.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.server.port = port;
    }

    init_logging(config.logging());
    info!("repometa-gateway {} ({})", env!("CARGO_PKG_VERSION"), GIT_HASH);
    if let Some(path) = missing_config {
        warn!("Configuration file {} not found, using defaults and environment", path);
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::builder::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display, not Debug, keeps multi-line messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
