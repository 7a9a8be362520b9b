//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Four routes: `/healthz` and `/reload` for operators, `GET /mcp` as a
//! capability probe and `POST /mcp` for JSON-RPC dispatch. Every route is
//! CORS-open so browser-based tooling can call it directly. A panic inside a
//! handler becomes a 500 `INTERNAL_ERROR` envelope instead of a dropped
//! connection.

pub mod health;
pub mod mcp;

use std::any::Any;

use axum::Json;
use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde_json::Value;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::rpc::{RpcError, RpcResponse};
use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/healthz", get(health::healthz).options(preflight))
        .route("/reload", post(health::reload).options(preflight))
        .route("/mcp", get(mcp::probe).post(mcp::handle).options(preflight))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bare `OPTIONS` without CORS request headers; real preflights are answered by the CORS layer.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Message carried by a panic payload.
pub(crate) fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    }
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic_detail(&*payload);
    tracing::error!(%detail, "handler panicked");

    let err = RpcError::Internal(format!("Error: {detail}"));
    (StatusCode::INTERNAL_SERVER_ERROR, Json(RpcResponse::failure(Value::Null, &err))).into_response()
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
