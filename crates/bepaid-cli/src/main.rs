//! bePaid checkout demo CLI
//!
//! Creates a sample checkout or polls the status of an existing one and
//! prints the normalized result.

mod commands;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use bepaid_checkout::{CheckoutClient, CheckoutError};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Command;

#[derive(Debug, Parser)]
#[command(name = "bepaid", version, about = "bePaid hosted checkout demo")]
struct Cli {
    /// Do not pretty-print provider replies to stderr
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

/// Load `.env` (or `path`), then build the log filter so a `RUST_LOG`
/// from the file applies.
fn load_environment(path: Option<&Path>) -> (Result<PathBuf, dotenvy::Error>, EnvFilter) {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path).map(|()| path.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    let filter = EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));
    (loaded, filter)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let (dotenv, filter) = load_environment(None);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded environment from .env"),
        Err(e) => tracing::warn!("Failed to load .env: {e}"),
    }

    let client = CheckoutClient::from_env().context("bePaid client is not configured")?;
    tracing::info!(shop_id = client.credentials().shop_id(), "✓ bePaid configured");

    let cancel = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    let result = match commands::run(&client, cli.command, !cli.quiet, cancel).await {
        Ok(result) => result,
        Err(CheckoutError::Cancelled) => {
            tracing::warn!("Interrupted before the payment service replied");
            return Ok(ExitCode::from(130));
        }
        Err(e) => {
            tracing::error!("{}", e.user_message());
            return Err(e).context("checkout request failed");
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(url) = result.redirect_url() {
        tracing::info!("Redirect the customer to {url}");
    }

    if result.ok {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!("Payment service rejected the request");
        Ok(ExitCode::from(2))
    }
}
