//! Error taxonomy for the whale-alert adapter.
//!
//! Configuration failures are fatal at startup. Transport and upstream
//! failures surface per tool call and leave the server running.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WhaleAlertError>;

#[derive(Debug, Error)]
pub enum WhaleAlertError {
    /// Missing credential, bad settings file, or client construction failure.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Connection fault, non-success HTTP status, or a body that is not valid JSON.
    #[error("failed to fetch whale data: {0}")]
    Transport(String),

    /// Well-formed envelope whose `code` is not `"0"`. Carries the upstream `msg`.
    #[error("API error: {0}")]
    Upstream(String),
}

impl WhaleAlertError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<reqwest::Error> for WhaleAlertError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            Self::Transport(format!("HTTP error: {status}"))
        } else {
            Self::Transport(e.to_string())
        }
    }
}
