//! JSON-RPC envelope types for the `/mcp` endpoint.
//!
//! ARCHITECTURE
//! ============
//! Requests arrive as `{jsonrpc, id, method, params}`. Responses carry
//! either `result` or `error: {code, message}` and always echo the request
//! `id`. Error codes are short uppercase strings rather than JSON-RPC
//! integers; existing clients match on them.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tools::ToolError;

pub const JSONRPC_VERSION: &str = "2.0";

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable wire code for an error.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("Invalid request format")]
    InvalidRequest,
    #[error("{0}")]
    InvalidParams(String),
    #[error("Storybook context not available. Please try again.")]
    ContextNotLoaded,
    #[error("{0}")]
    MethodNotFound(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    ToolExecution(String),
    #[error("{0}")]
    Internal(String),
}

impl ErrorCode for RpcError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidParams(_) => "INVALID_PARAMS",
            Self::ContextNotLoaded => "CONTEXT_NOT_LOADED",
            Self::MethodNotFound(_) => "METHOD_NOT_FOUND",
            Self::NotFound(_) => "NOT_FOUND",
            Self::ToolExecution(_) => "TOOL_EXECUTION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl RpcError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    #[must_use]
    pub fn to_object(&self) -> ErrorObject {
        ErrorObject { code: self.error_code().to_string(), message: self.to_string() }
    }
}

impl From<ToolError> for RpcError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound { .. } => Self::NotFound(err.to_string()),
            ToolError::InvalidArguments(_) | ToolError::Output(_) => Self::ToolExecution(format!("Error: {err}")),
        }
    }
}

// =============================================================================
// ENVELOPES
// =============================================================================

/// Incoming request, decoded leniently so a sparse body still yields an `id`
/// to echo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RpcRequest {
    pub id: Value,
    /// `None` when the method is missing or not a string.
    pub method: Option<String>,
    pub params: Value,
}

impl RpcRequest {
    /// Decode a request body.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the body is not a JSON object.
    pub fn parse(body: &[u8]) -> Result<Self, RpcError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| RpcError::InvalidRequest)?;
        let Value::Object(mut map) = value else {
            return Err(RpcError::InvalidRequest);
        };
        Ok(Self {
            id: map.remove("id").unwrap_or(Value::Null),
            method: map.remove("method").and_then(|m| m.as_str().map(str::to_owned)),
            params: map.remove("params").unwrap_or(Value::Null),
        })
    }

    #[must_use]
    pub fn method_label(&self) -> &str {
        self.method.as_deref().unwrap_or("(none)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

impl RpcResponse {
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.into(), id, result: Some(result), error: None }
    }

    #[must_use]
    pub fn failure(id: Value, err: &RpcError) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.into(), id, result: None, error: Some(err.to_object()) }
    }
}

#[cfg(test)]
#[path = "rpc_test.rs"]
mod tests;
