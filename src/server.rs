//! MCP server over newline-delimited JSON-RPC 2.0.
//!
//! Requests are read one line at a time and each is handled on its own task,
//! so a slow upstream fetch never holds up `ping` or list calls. Responses go
//! through a single writer task so lines on the output are never interleaved.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::SERVER_NAME;
use crate::context::AppContext;
use crate::prompts::{get_prompt, list_prompts};
use crate::tools::{self, get_whale_alerts, list_tools};

/// Protocol revisions this server accepts, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

const INSTRUCTIONS: &str = "Call get_whale_alerts to list the latest large Hyperliquid positions \
     reported by CoinGlass. Use the summarize_whale_activity prompt to summarize them.";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

fn success(id: Value, result: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "result": result})
}

fn failure(id: Value, err: RpcError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {"code": err.code, "message": err.message}
    })
}

/// Serve MCP requests from `reader` until EOF, writing responses to `writer`.
///
/// Returns once the input is closed and every in-flight request has been
/// answered.
pub async fn serve<R, W>(ctx: Arc<AppContext>, mut reader: R, writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<Value>();
    let writer_task = tokio::spawn(write_responses(rx, writer));

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        // Invalid UTF-8 is rejected here as a parse error like any other bad JSON.
        let message: Value = match serde_json::from_slice(line) {
            Ok(v) => v,
            Err(e) => {
                warn!("Unparseable message: {e}");
                let _ = tx.send(failure(Value::Null, RpcError::new(PARSE_ERROR, "Parse error")));
                continue;
            }
        };

        let request: Request = match serde_json::from_value(message.clone()) {
            Ok(r) => r,
            Err(_) => {
                // A message with a result or error is a response to a request we never sent.
                if message.get("method").is_none()
                    && (message.get("result").is_some() || message.get("error").is_some())
                {
                    continue;
                }
                let id = message.get("id").cloned().unwrap_or(Value::Null);
                let _ = tx.send(failure(id, RpcError::new(INVALID_REQUEST, "Invalid Request")));
                continue;
            }
        };

        let Some(id) = request.id else {
            debug!("Notification: {}", request.method);
            continue;
        };

        let ctx = ctx.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let response = match dispatch(&ctx, &request.method, request.params).await {
                Ok(result) => success(id, result),
                Err(err) => failure(id, err),
            };
            let _ = tx.send(response);
        });
    }

    info!("Input closed, waiting for in-flight requests");
    drop(tx);
    writer_task
        .await
        .map_err(|e| std::io::Error::other(format!("writer task failed: {e}")))?
}

async fn write_responses<W>(
    mut rx: mpsc::UnboundedReceiver<Value>,
    mut writer: W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_vec(&response)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;
    }
    Ok(())
}

async fn dispatch(ctx: &AppContext, method: &str, params: Value) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(initialize(&params)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(json!({"tools": list_tools()})),
        "tools/call" => call_tool(ctx, &params).await,
        "prompts/list" => Ok(json!({"prompts": list_prompts()})),
        "prompts/get" => {
            let name = param_name(&params)?;
            let prompt = get_prompt(name)
                .ok_or_else(|| RpcError::new(INVALID_PARAMS, format!("Unknown prompt: {name}")))?;
            serde_json::to_value(prompt).map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))
        }
        other => Err(RpcError::new(
            METHOD_NOT_FOUND,
            format!("Method not found: {other}"),
        )),
    }
}

fn initialize(params: &Value) -> Value {
    let requested = params.get("protocolVersion").and_then(Value::as_str);
    let version = requested
        .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(v))
        .unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]);
    info!(
        "Client initialized — requested protocol={} negotiated={version}",
        requested.unwrap_or("<none>")
    );

    json!({
        "protocolVersion": version,
        "capabilities": {
            "tools": {"listChanged": false},
            "prompts": {"listChanged": false}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": INSTRUCTIONS
    })
}

fn param_name(params: &Value) -> Result<&str, RpcError> {
    params
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::new(INVALID_PARAMS, "Missing 'name' parameter"))
}

async fn call_tool(ctx: &AppContext, params: &Value) -> Result<Value, RpcError> {
    let name = param_name(params)?;
    if name != tools::GET_WHALE_ALERTS {
        return Err(RpcError::new(INVALID_PARAMS, format!("Unknown tool: {name}")));
    }

    info!("Tool call: {name}");
    let (text, is_error) = match get_whale_alerts(ctx).await {
        Ok(text) => (text, false),
        Err(e) => {
            warn!("Tool {name} failed: {e}");
            (e.to_string(), true)
        }
    };

    Ok(json!({
        "content": [{"type": "text", "text": text}],
        "isError": is_error
    }))
}

/// Names of the registered tools and prompts.
pub fn registrations() -> (Vec<&'static str>, Vec<&'static str>) {
    (
        list_tools().iter().map(|t| t.name).collect(),
        list_prompts().iter().map(|p| p.name).collect(),
    )
}
