use serde_json::{json, Value};

use crate::adapters::mcp_stdio::rpc::RpcEnvelope;
use crate::adapters::mcp_stdio::to_json_text;
use crate::domain::errors::DomainError;

pub(super) fn error_kind(err: &DomainError) -> (&'static str, &'static str) {
    match err {
        DomainError::InvalidInput(_) => ("validation", "invalid_input"),
        DomainError::NotFound(_) => ("not_found", "not_found"),
        DomainError::Upstream { .. } => ("upstream_error", "upstream_error"),
        DomainError::Timeout => ("timeout", "timeout"),
        DomainError::Decode(_) => ("decode_error", "decode_error"),
        DomainError::Network(_) => ("network_error", "network_error"),
    }
}

pub(super) fn domain_error_response(id: Value, err: &DomainError) -> RpcEnvelope {
    let (kind, code) = error_kind(err);
    let mut payload = json!({
        "error": true,
        "kind": kind,
        "code": code,
        "message": err.to_string(),
        "request_id": id
    });
    if let DomainError::Upstream { status, .. } = err {
        payload["details"] = json!({ "status": status });
    }

    // MCP convention: tool-level errors are returned inside result + isError=true
    RpcEnvelope::success(
        id,
        json!({
            "content": [{ "type": "text", "text": to_json_text(&payload) }],
            "isError": true
        }),
    )
}
