use tracing::{debug, warn};

use crate::error::{Result, WhaleAlertError};
use crate::types::{Envelope, WhaleTransaction};

/// Fetch the current whale alerts from `url`.
///
/// Issues a single GET with the shared client. Connection faults, 4xx/5xx
/// statuses and unparseable bodies are transport errors; an envelope whose
/// `code` is not `"0"` is an upstream error. There is no retry.
pub async fn fetch_whale_data(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<WhaleTransaction>> {
    let resp = client.get(url).send().await?;
    let resp = resp.error_for_status()?;
    let body = resp.bytes().await?;

    let records = parse_envelope(&body).inspect_err(|e| warn!("Whale alert fetch failed: {e}"))?;
    debug!("Fetched {} whale alert(s)", records.len());
    Ok(records)
}

/// Validate a raw response body and extract its records.
pub fn parse_envelope(body: &[u8]) -> Result<Vec<WhaleTransaction>> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| WhaleAlertError::Transport(format!("invalid JSON response: {e}")))?;

    if !envelope.is_success() {
        return Err(WhaleAlertError::Upstream(envelope.msg.unwrap_or_default()));
    }
    Ok(envelope.data.unwrap_or_default())
}
