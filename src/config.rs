use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, WhaleAlertError};
use crate::{API_KEY_VAR, WHALE_ALERT_URL};

/// Default settings file path, read only if present.
pub const CONFIG_PATH: &str = "config.toml";

/// Resolved runtime configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// CoinGlass API key. Never logged.
    pub api_key: String,
    /// Whale-alert endpoint.
    pub api_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Optional settings file deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// Runtime settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Override for the whale-alert endpoint.
    #[serde(default)]
    pub api_url: Option<String>,
}

impl SettingsFile {
    /// Load settings from the given TOML file path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WhaleAlertError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&contents).map_err(|e| match e {
            WhaleAlertError::Configuration(msg) => {
                WhaleAlertError::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| WhaleAlertError::Configuration(format!("failed to parse settings: {e}")))
    }

    /// Load from `path` when given, otherwise from [`CONFIG_PATH`] if it exists.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

impl AppConfig {
    /// Build from the process environment.
    pub fn from_env(settings: &SettingsConfig) -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok(), settings)
    }

    /// Build from an arbitrary variable lookup.
    ///
    /// Fails when the API key is unset or blank, or when the endpoint is not
    /// an http(s) URL with a host.
    pub fn from_lookup<F>(lookup: F, settings: &SettingsConfig) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| WhaleAlertError::Configuration(format!("{API_KEY_VAR} not set")))?;

        let api_url = settings
            .api_url
            .clone()
            .unwrap_or_else(|| WHALE_ALERT_URL.to_string());
        validate_endpoint(&api_url)?;

        Ok(Self { api_key, api_url })
    }

    /// Replace the endpoint, e.g. from a command-line flag.
    pub fn with_api_url(mut self, api_url: String) -> Result<Self> {
        validate_endpoint(&api_url)?;
        self.api_url = api_url;
        Ok(self)
    }
}

fn validate_endpoint(raw: &str) -> Result<()> {
    let parsed = Url::parse(raw)
        .map_err(|e| WhaleAlertError::Configuration(format!("invalid api_url '{raw}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(WhaleAlertError::Configuration(format!(
                "api_url scheme '{scheme}' not allowed; only http/https permitted"
            )));
        }
    }
    if parsed.host_str().is_none() {
        return Err(WhaleAlertError::Configuration(format!(
            "api_url '{raw}' has no host"
        )));
    }
    Ok(())
}
