mod cli;
mod client;
mod config;
mod errors;
mod form;
mod models;
mod render;
mod run;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::client::HttpMatchClient;
use crate::config::Config;
use crate::run::{run_health, run_match};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?.with_api_base(cli.api_base.clone());

    // Logs go to stderr so stdout only carries results
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Scoring service: {}", config.api_base);

    let client = HttpMatchClient::new(config.api_base.clone())
        .context("Failed to create HTTP client")?;

    let (mut out, mut err) = (std::io::stdout(), std::io::stderr());
    let code = match cli.command {
        Commands::Match(args) => run_match(&client, &args, &mut out, &mut err).await?,
        Commands::Health => run_health(&client, &mut out, &mut err).await?,
    };
    Ok(ExitCode::from(code))
}
