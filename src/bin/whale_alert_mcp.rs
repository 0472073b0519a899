use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::{info, warn};

use hyperliquid_whale_alert::config::{AppConfig, SettingsFile};
use hyperliquid_whale_alert::context::AppContext;
use hyperliquid_whale_alert::{SERVER_NAME, server};

#[derive(Parser)]
#[command(
    name = "whale-alert-mcp",
    about = "MCP server exposing Hyperliquid whale alerts from CoinGlass over stdio"
)]
struct Args {
    /// TOML settings file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the whale-alert endpoint URL
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();
    let args = Args::parse();

    let settings = SettingsFile::load_or_default(args.config.as_deref())
        .context("failed to load settings")?;
    let mut config = AppConfig::from_env(&settings.settings).context("invalid configuration")?;
    if let Some(api_url) = args.api_url {
        config = config.with_api_url(api_url).context("invalid --api-url")?;
    }

    let ctx = Arc::new(AppContext::initialize(&config).context("failed to start")?);
    let (tools, prompts) = server::registrations();
    info!(
        "Starting {SERVER_NAME} v{} — tools={tools:?} prompts={prompts:?}",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    let outcome = tokio::select! {
        res = server::serve(ctx.clone(), stdin, stdout) => res.context("stdio transport failed"),
        _ = shutdown_signal() => {
            info!("Termination signal received");
            Ok(())
        }
    };

    match Arc::try_unwrap(ctx) {
        Ok(ctx) => ctx.shutdown(),
        // Abandoned request tasks still hold a handle; it is released when they are dropped.
        Err(_) => warn!("Requests still in flight at shutdown"),
    }

    outcome
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
