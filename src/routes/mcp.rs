//! `/mcp` — JSON-RPC dispatch over the discovery tools.
//!
//! DESIGN
//! ======
//! The handler never returns a transport error: every outcome, including an
//! undecodable body, becomes a `{jsonrpc, id, result|error}` envelope.
//! Successful calls are HTTP 200, protocol and lookup errors HTTP 400.
//! The request `id` is echoed verbatim (`null` when absent), including on
//! the 500 `INTERNAL_ERROR` reply to a panicking dispatch.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{Value, json};
use tracing::{Level, debug, error, warn};

use crate::manifest::Manifest;
use crate::routes::panic_detail;
use crate::rpc::{JSONRPC_VERSION, RpcError, RpcRequest, RpcResponse};
use crate::state::AppState;
use crate::tools::{self, Tool};

pub const PROTOCOL_VERSION: &str = "2025-06-18";
pub const SERVER_NAME: &str = "org-design-system-mcp";
pub const SERVER_VERSION: &str = "1.0.0";

/// `GET /mcp`: availability probe.
pub async fn probe() -> Json<Value> {
    Json(json!({
        "jsonrpc": JSONRPC_VERSION,
        "status": "available",
        "server": SERVER_NAME,
        "version": SERVER_VERSION,
        "endpoints": {
            "health": "/healthz",
            "mcp": "/mcp (POST)"
        }
    }))
}

/// `POST /mcp`: decode the envelope, dispatch on `method`, reply.
pub async fn handle(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match RpcRequest::parse(&body) {
        Ok(request) => request,
        Err(err) => {
            warn!(bytes = body.len(), "rejecting malformed mcp request");
            return reply(Value::Null, Err(err));
        }
    };

    debug!(method = request.method_label(), id = %request.id, params = %request.params, "mcp request");
    let id = request.id.clone();
    let outcome = run_guarded(async move { dispatch(&state, &request).await }).await;
    reply(id, outcome)
}

/// Run a dispatch on its own task so a panic still answers with the caller's `id`.
async fn run_guarded<F>(task: F) -> Result<Value, RpcError>
where
    F: Future<Output = Result<Value, RpcError>> + Send + 'static,
{
    match tokio::spawn(task).await {
        Ok(outcome) => outcome,
        Err(e) if e.is_panic() => {
            let detail = panic_detail(&*e.into_panic());
            error!(%detail, "mcp dispatch panicked");
            Err(RpcError::Internal(format!("Error: {detail}")))
        }
        Err(e) => Err(RpcError::Internal(format!("Error: {e}"))),
    }
}

async fn dispatch(state: &AppState, request: &RpcRequest) -> Result<Value, RpcError> {
    match request.method.as_deref() {
        Some("initialize") => {
            let manifest = state.reload().await;
            debug!(
                components = manifest.as_deref().map_or(0, Manifest::len),
                stories = manifest.as_deref().map_or(0, Manifest::story_count),
                "initialized"
            );
            Ok(initialize_result())
        }
        Some("tools/list") => {
            let tools = serde_json::to_value(tools::catalog()).map_err(|e| RpcError::Internal(format!("Error: {e}")))?;
            Ok(json!({ "tools": tools }))
        }
        Some("tools/call") => call_tool(state, &request.params).await,
        Some("resources/list") => Ok(json!({ "resources": [] })),
        _ => Err(RpcError::MethodNotFound(format!("Unknown method: {}", request.method_label()))),
    }
}

async fn call_tool(state: &AppState, params: &Value) -> Result<Value, RpcError> {
    let Some(name) = params.get("name").and_then(Value::as_str).filter(|n| !n.is_empty()) else {
        warn!("tools/call without a tool name");
        return Err(RpcError::InvalidParams("Tool name is required".into()));
    };

    let manifest = match state.current().await {
        Some(manifest) => manifest,
        None => state.reload().await.ok_or(RpcError::ContextNotLoaded)?,
    };

    let tool = Tool::from_name(name).ok_or_else(|| RpcError::MethodNotFound(format!("Unknown tool: {name}")))?;
    debug!(tool = name, "calling tool");

    let arguments = params.get("arguments").unwrap_or(&Value::Null);
    tool.call(arguments, &manifest).map_err(RpcError::from)
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true },
            "resources": {},
            "prompts": {}
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION
        }
    })
}

fn reply(id: Value, outcome: Result<Value, RpcError>) -> Response {
    let (status, body) = match outcome {
        Ok(result) => (StatusCode::OK, RpcResponse::success(id, result)),
        Err(err) => (err.status(), RpcResponse::failure(id, &err)),
    };

    if tracing::enabled!(Level::DEBUG) {
        let rendered = serde_json::to_string(&body).unwrap_or_default();
        debug!(status = status.as_u16(), response = %rendered, "mcp response");
    }

    (status, Json(body)).into_response()
}

#[cfg(test)]
#[path = "mcp_test.rs"]
mod tests;
