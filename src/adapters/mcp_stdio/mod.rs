mod error_contract;
mod rpc;
mod schema;
mod tool_args;
mod tool_catalog;
mod transport;

use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{BufReader, BufWriter};
use tokio::time::Duration;

use crate::app::catalog_usecases::CatalogUseCases;

use error_contract::domain_error_response;
use rpc::{RpcEnvelope, RpcRequest, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR, SERVER_SHUT_DOWN};
use schema::tools_schema;
use tool_catalog::{handle_catalog_tool, CatalogTool};
use transport::{read_next_message, write_response, TransportMode};

const MAX_FRAME_BYTES: usize = 10 * 1024 * 1024; // 10 MiB
const SERVER_NAME: &str = "tvmaze-server";
const DEFAULT_PROTOCOL_VERSION: &str = "2025-06-18";

const ENDPOINT_LINES: [&str; 6] = [
    "Search endpoint: https://api.tvmaze.com/search/shows?q=<query>",
    "Show endpoint: https://api.tvmaze.com/shows/{id}",
    "Cast endpoint: https://api.tvmaze.com/shows/{id}/cast",
    "Crew endpoint: https://api.tvmaze.com/shows/{id}/crew",
    "Seasons endpoint: https://api.tvmaze.com/shows/{id}/seasons",
    "Episodes endpoint: https://api.tvmaze.com/seasons/{id}/episodes[?embed=guestcast]",
];

fn parse_initialize_timeout_ms(raw: Option<&str>) -> Duration {
    const DEFAULT_SECS: u64 = 20;
    let parsed = raw
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0);
    match parsed {
        Some(ms) => Duration::from_millis(ms),
        None => Duration::from_secs(DEFAULT_SECS),
    }
}

fn initialize_timeout() -> Duration {
    let raw = std::env::var("TVMAZE_MCP_INITIALIZE_TIMEOUT_MS").ok();
    parse_initialize_timeout_ms(raw.as_deref())
}

pub async fn start_mcp_server(catalog: Arc<CatalogUseCases>) -> anyhow::Result<()> {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut writer = BufWriter::new(tokio::io::stdout());
    let init_timeout = initialize_timeout();
    let init_deadline = tokio::time::Instant::now() + init_timeout;
    let mut initialized = false;
    let mut shutdown_requested = false;
    let mut response_mode: Option<TransportMode> = None;

    loop {
        let read_result = if initialized {
            read_next_message(&mut reader, MAX_FRAME_BYTES).await
        } else {
            let next = tokio::time::timeout_at(
                init_deadline,
                read_next_message(&mut reader, MAX_FRAME_BYTES),
            )
            .await;
            match next {
                Ok(result) => result,
                Err(_) => anyhow::bail!(
                    "no initialize received within {:?}; closing server",
                    init_timeout
                ),
            }
        };

        let (raw, mode) = match read_result {
            Ok(Some(msg)) => msg,
            Ok(None) => break, // EOF
            Err(e) => {
                tracing::warn!("frame read error: {}", e);
                continue;
            }
        };
        let mode = *response_mode.get_or_insert(mode);

        if raw.trim().is_empty() {
            continue;
        }

        let req: RpcRequest = match serde_json::from_str(&raw) {
            Ok(r) => r,
            Err(e) => {
                let envelope =
                    RpcEnvelope::rpc_error(Value::Null, PARSE_ERROR, format!("parse error: {}", e));
                write_response(&mut writer, &envelope, mode).await?;
                continue;
            }
        };

        if req.method == "initialize" {
            initialized = true;
        }

        match req.method.as_str() {
            "shutdown" => {
                shutdown_requested = true;
                if !req.is_notification() {
                    let envelope = RpcEnvelope::success(req.request_id(), Value::Null);
                    write_response(&mut writer, &envelope, mode).await?;
                }
                continue;
            }
            "exit" => {
                if !req.is_notification() {
                    let envelope = RpcEnvelope::success(req.request_id(), Value::Null);
                    write_response(&mut writer, &envelope, mode).await?;
                }
                break;
            }
            _ if shutdown_requested => {
                if !req.is_notification() {
                    let envelope = RpcEnvelope::rpc_error(
                        req.request_id(),
                        SERVER_SHUT_DOWN,
                        "server is shut down; only 'exit' is accepted",
                    );
                    write_response(&mut writer, &envelope, mode).await?;
                }
                continue;
            }
            _ => {}
        }

        if let Some(envelope) = handle_request(&req, &catalog).await {
            write_response(&mut writer, &envelope, mode).await?;
        }
    }

    Ok(())
}

async fn handle_request(request: &RpcRequest, catalog: &CatalogUseCases) -> Option<RpcEnvelope> {
    let id = request.request_id();
    let params = request.params.clone().unwrap_or(Value::Null);

    let envelope = match request.method.as_str() {
        "initialize" => RpcEnvelope::success(
            id,
            json!({
                "protocolVersion": initialize_protocol_version(request.params.as_ref()),
                "capabilities": { "tools": { "listChanged": false } },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION")
                },
                "instructions": server_instructions()
            }),
        ),
        "ping" => RpcEnvelope::success(id, json!({})),
        "notifications/initialized" | "initialized" => RpcEnvelope::success(id, Value::Null),
        "tools/list" => RpcEnvelope::success(id, tools_schema()),
        "tools/call" => call_tool(id, &params, catalog).await,
        _ => RpcEnvelope::rpc_error(
            id,
            METHOD_NOT_FOUND,
            format!("method not found: '{}'", request.method),
        ),
    };

    if request.is_notification() {
        None
    } else {
        Some(envelope)
    }
}

async fn call_tool(id: Value, params: &Value, catalog: &CatalogUseCases) -> RpcEnvelope {
    let tool_name = params.get("name").and_then(Value::as_str).unwrap_or("");
    let args = params
        .get("arguments")
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));
    if !args.is_object() {
        return RpcEnvelope::rpc_error(id, INVALID_PARAMS, "tool arguments must be an object");
    }
    let Some(tool) = CatalogTool::from_name(tool_name) else {
        return RpcEnvelope::rpc_error(id, INVALID_PARAMS, format!("unknown tool '{}'", tool_name));
    };
    match handle_catalog_tool(tool, &args, catalog).await {
        Ok(result) => RpcEnvelope::success(id, result),
        Err(e) => domain_error_response(id, &e),
    }
}

fn initialize_protocol_version(request_params: Option<&Value>) -> &str {
    request_params
        .and_then(|value| value.get("protocolVersion"))
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(DEFAULT_PROTOCOL_VERSION)
}

fn server_instructions() -> String {
    let mut lines = vec!["TVMaze catalog tools: shows, cast, crew, seasons and episodes."];
    lines.extend(ENDPOINT_LINES);
    lines.join("\n")
}

pub(super) fn to_json_text(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{\"error\":true}".to_string())
}
