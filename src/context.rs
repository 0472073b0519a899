use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::info;

use crate::API_KEY_HEADER;
use crate::config::AppConfig;
use crate::error::{Result, WhaleAlertError};

/// Resources owned for the lifetime of the server.
///
/// The client is built once in [`AppContext::initialize`] and shared by every
/// tool call; `reqwest::Client` pools connections internally, so no lock is
/// taken around it.
#[derive(Debug)]
pub struct AppContext {
    pub client: reqwest::Client,
    pub api_url: String,
}

impl AppContext {
    /// Build the authenticated HTTP client.
    pub fn initialize(config: &AppConfig) -> Result<Self> {
        let mut key = HeaderValue::from_str(&config.api_key).map_err(|_| {
            WhaleAlertError::Configuration(format!(
                "API key contains characters not allowed in the {API_KEY_HEADER} header"
            ))
        })?;
        key.set_sensitive(true);

        let name = HeaderName::from_bytes(API_KEY_HEADER.as_bytes()).map_err(|e| {
            WhaleAlertError::Configuration(format!("invalid header name {API_KEY_HEADER}: {e}"))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(name, key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| WhaleAlertError::Configuration(format!("failed to build HTTP client: {e}")))?;

        info!("HTTP client ready — endpoint={}", config.api_url);
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    /// Release the HTTP client and its pooled connections.
    pub fn shutdown(self) {
        info!("Closing HTTP client");
        drop(self.client);
    }
}
