// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! rmd - reminder notifications on the local platform

mod commands;
mod output;
mod reminders;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{check, config, run};
use output::OutputFormat;
use rmd_core::ServiceConfig;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "rmd",
    version,
    about = "Schedule reminder notifications and watch them fire"
)]
struct Cli {
    /// Service configuration file (TOML)
    #[arg(long, global = true, env = "RMD_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which reminders in a file would be scheduled
    Check(check::CheckArgs),
    /// Schedule reminders and print deliveries until they have all fired
    Run(run::RunArgs),
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();
    let service_config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check(args) => check::check(args, &service_config, cli.format),
        Commands::Run(args) => run::run(args, service_config, cli.format).await,
        Commands::Config => config::show(&service_config, cli.format),
    }
}

fn load_config(path: Option<&Path>) -> Result<ServiceConfig> {
    match path {
        Some(path) => ServiceConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(ServiceConfig::default()),
    }
}

/// Log to stderr so stdout stays machine-readable
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
