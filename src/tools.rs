use serde::Serialize;
use serde_json::{Value, json};
use tracing::info;

use crate::api::fetch_whale_data;
use crate::context::AppContext;
use crate::error::Result;
use crate::reporter::format_whale_alerts;

pub const GET_WHALE_ALERTS: &str = "get_whale_alerts";

/// Tool definition as advertised by `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

pub fn list_tools() -> Vec<ToolDescriptor> {
    vec![ToolDescriptor {
        name: GET_WHALE_ALERTS,
        description: "Fetch recent whale alerts and return as a Markdown list",
        input_schema: json!({
            "type": "object",
            "properties": {}
        }),
    }]
}

/// Fetch recent whale alerts and render them as a Markdown list.
pub async fn get_whale_alerts(ctx: &AppContext) -> Result<String> {
    let records = fetch_whale_data(&ctx.client, &ctx.api_url).await?;
    info!("get_whale_alerts returned {} record(s)", records.len());
    Ok(format_whale_alerts(&records))
}
