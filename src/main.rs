//! healthping - one-shot latency and availability check
//!
//! # Usage
//!
//! ```bash
//! # Probes from ./healthping.toml (or $HEALTHPING_CONFIG)
//! healthping
//!
//! # Explicit config, shorter deadline, JSON output
//! healthping --config probes.toml --timeout-ms 2000 --json
//! ```
//!
//! # Environment Variables
//!
//! - `HEALTHPING_CONFIG`: Path to the config file
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

use healthping::config::defaults::CONFIG_ENV_VAR;
use healthping::render::{render_json, render_text};
use healthping::HealthpingConfig;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "healthping")]
#[command(about = "Check latency and availability endpoints under one shared deadline")]
#[command(version)]
struct CliArgs {
    /// Path to the TOML config (default: $HEALTHPING_CONFIG, then ./healthping.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    /// Override the shared timeout in milliseconds
    #[arg(short, long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => HealthpingConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => HealthpingConfig::load(),
    };

    let timeout = match args.timeout_ms {
        Some(0) => anyhow::bail!("--timeout-ms must be greater than zero"),
        Some(ms) => Duration::from_millis(ms),
        None => config.timeout(),
    };

    if config.latency.is_empty() && config.availability.is_empty() {
        info!("No probes configured (set {} or create ./healthping.toml)", CONFIG_ENV_VAR);
    }

    let client = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let checker = config.build_checker(client);

    // Ctrl+C ends the batch early; the report is still complete.
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, cancelling outstanding probes...");
            shutdown_token.cancel();
        }
    });

    println!(
        "Pinging {} latency endpoints and {} availability endpoints...",
        checker.latency_count(),
        checker.availability_count()
    );

    let report = checker
        .run_with_parent(timeout, &cancel_token)
        .await
        .context("Health check failed")?;
    let checked_at = chrono::Utc::now();

    if args.json {
        println!("{}", render_json(&report, checked_at).context("Failed to serialize report")?);
    } else {
        print!("{}", render_text(&report, checked_at));
    }

    Ok(())
}
