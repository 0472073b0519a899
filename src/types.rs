use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level response object returned by the whale-alert endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// `"0"` on success. Kept untyped so a numeric `0` is distinguishable.
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<WhaleTransaction>>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        matches!(&self.code, Some(Value::String(code)) if code == "0")
    }
}

/// A single whale position event as reported upstream.
///
/// Every field is optional. Numeric fields also accept numeric strings, except
/// `position_action`, which must be a JSON number. A value of the wrong type is
/// read as absent instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WhaleTransaction {
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub position_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub entry_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liq_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub position_value_usd: Option<f64>,
    #[serde(default, deserialize_with = "numeric_i64")]
    pub position_action: Option<i64>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub create_time: Option<i64>,
}

impl WhaleTransaction {
    pub fn action(&self) -> PositionAction {
        PositionAction::from_code(self.position_action)
    }
}

/// Upstream action flag. Only `1` means open; every other code, including a
/// missing one, is treated as a close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionAction {
    Open,
    Close,
}

impl PositionAction {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::Open,
            _ => Self::Close,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Close => "Close",
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

fn integral(n: &serde_json::Number) -> Option<i64> {
    n.as_i64()
        .or_else(|| n.as_f64().filter(|v| v.fract() == 0.0).map(|v| v as i64))
}

/// Only JSON numbers; the string `"1"` is not an open action.
fn numeric_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => integral(&n),
        _ => None,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => integral(&n),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}
