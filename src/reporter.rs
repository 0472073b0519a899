use chrono::{DateTime, Local, TimeZone, Utc};

use crate::types::WhaleTransaction;

/// Returned in place of a list when there are no records.
pub const NO_DATA: &str = "No whale alert data available.";

/// Rendered for fields the upstream record omitted.
pub const PLACEHOLDER: &str = "N/A";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render records as a Markdown list, with times in the local timezone.
pub fn format_whale_alerts(records: &[WhaleTransaction]) -> String {
    format_whale_alerts_in(records, &Local)
}

/// Render records as a Markdown list, with times in `tz`.
///
/// One entry per record, in input order, joined by single newlines.
pub fn format_whale_alerts_in<Tz>(records: &[WhaleTransaction], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if records.is_empty() {
        return NO_DATA.to_string();
    }

    records
        .iter()
        .map(|tx| format_entry(tx, tz))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_entry<Tz>(tx: &WhaleTransaction, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "- **{symbol} Transaction**:\n  \
         - User Address: {user}\n  \
         - Position Size: {size}\n  \
         - Entry Price: ${entry}\n  \
         - Liquidation Price: ${liq}\n  \
         - Position Value (USD): ${value}\n  \
         - Action: {action}\n  \
         - Create Time: {time}",
        symbol = text(tx.symbol.as_deref()),
        user = text(tx.user.as_deref()),
        size = number(tx.position_size),
        entry = number(tx.entry_price),
        liq = number(tx.liq_price),
        value = number(tx.position_value_usd),
        action = tx.action().label(),
        time = timestamp(tx.create_time, tz),
    )
}

fn text(value: Option<&str>) -> &str {
    value.unwrap_or(PLACEHOLDER)
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

/// Milliseconds since the epoch as `YYYY-MM-DD HH:MM:SS` in `tz`.
pub fn timestamp<Tz>(millis: Option<i64>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|utc| utc.with_timezone(tz).format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}
