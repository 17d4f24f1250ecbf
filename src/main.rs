// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Quantum Mechanics Playground server
//!
//! # Usage
//!
//! ```bash
//! # Start with default configuration
//! qm-playground serve
//!
//! # Start with custom config on another port
//! qm-playground --config /path/to/config.yaml serve --port 9000
//!
//! # Print the effective configuration
//! qm-playground config
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use qm_playground::{config::Config, server, Result, VERSION};

/// Quantum Mechanics Playground API server
#[derive(Parser)]
#[command(name = "qm-playground")]
#[command(author = "QM Playground Contributors")]
#[command(version = VERSION)]
#[command(about = "Stateless quantum-mechanics simulations over HTTP")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults to logging.level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, env = "QMP_HOST")]
        host: Option<String>,

        /// HTTP port
        #[arg(long, env = "QMP_PORT")]
        port: Option<u16>,
    },

    /// Show effective configuration
    Config,

    /// Validate configuration file
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    init_logging(&level, &config.logging.format);

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            config.validate()?;

            info!(
                version = VERSION,
                host = %config.server.host,
                port = config.server.port,
                "Starting QM Playground"
            );

            server::run_server(config).await?;
        }

        Commands::Config => {
            println!("{}", serde_yaml::to_string(&config)?);
        }

        Commands::Validate => match config.validate() {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Initialize logging with tracing.
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        "json" => registry.with(fmt::layer().json().with_target(true)).init(),
        _ => registry.with(fmt::layer().with_target(true)).init(),
    }
}
