pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod prompts;
pub mod reporter;
pub mod server;
pub mod tools;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

/// CoinGlass Hyperliquid whale-alert endpoint (requires `CG-API-KEY`)
pub const WHALE_ALERT_URL: &str = "https://open-api-v4.coinglass.com/api/hyperliquid/whale-alert";

/// Request header carrying the CoinGlass API key
pub const API_KEY_HEADER: &str = "CG-API-KEY";

/// Environment variable holding the CoinGlass API key
pub const API_KEY_VAR: &str = "COINGLASS_API_KEY";

/// Name advertised to the MCP host
pub const SERVER_NAME: &str = "Hyperliquid Whale Alert";
