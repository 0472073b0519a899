//! Probe: CoinGlass Hyperliquid whale-alert endpoint
//!
//! Hits GET /api/hyperliquid/whale-alert with COINGLASS_API_KEY and documents:
//! - HTTP status and latency
//! - Envelope fields (code, msg, data length)
//! - Field names present on the first record
//! - The Markdown the MCP tool would return

use std::time::Instant;

use anyhow::{Context, Result};
use serde_json::Value;

use hyperliquid_whale_alert::api::parse_envelope;
use hyperliquid_whale_alert::config::{AppConfig, SettingsConfig};
use hyperliquid_whale_alert::context::AppContext;
use hyperliquid_whale_alert::reporter::format_whale_alerts;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env(&SettingsConfig::default())?;
    let ctx = AppContext::initialize(&config)?;

    println!("=== Probe: whale alerts ===");
    println!("Endpoint: {}", ctx.api_url);
    println!();

    println!("--- 1. Raw envelope ---");
    let start = Instant::now();
    let resp = ctx.client.get(&ctx.api_url).send().await?;
    let latency = start.elapsed();
    let status = resp.status();
    let body = resp.bytes().await?;
    println!("Status: {}", status);
    println!("Latency: {:?}", latency);

    let envelope: Value = serde_json::from_slice(&body).context("response is not JSON")?;
    println!("code: {}", envelope.get("code").unwrap_or(&Value::Null));
    println!("msg:  {}", envelope.get("msg").unwrap_or(&Value::Null));
    match envelope.get("data").and_then(|d| d.as_array()) {
        Some(arr) => {
            println!("Record count: {}", arr.len());
            if let Some(first) = arr.first() {
                println!("\nSample record (first):");
                println!("{}", serde_json::to_string_pretty(first)?);
                println!("\nFields present:");
                if let Some(obj) = first.as_object() {
                    for key in obj.keys() {
                        println!("  - {}", key);
                    }
                }
            }
        }
        None => println!("No data array in envelope"),
    }
    println!();

    println!("--- 2. Formatted output ---");
    match parse_envelope(&body) {
        Ok(records) => println!("{}", format_whale_alerts(&records)),
        Err(e) => println!("Error: {e}"),
    }
    println!();

    ctx.shutdown();
    println!("=== Probe Complete ===");
    Ok(())
}
