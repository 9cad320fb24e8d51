use serde::{Deserialize, Serialize};
use serde_json::Value;

use toolgate_core::Error;

/// The only protocol version this server speaks.
pub const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC 2.0 request.
///
/// `id` is `None` both when the member is absent and when it is `null`;
/// such requests are notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// The id to echo in the response.
    #[must_use]
    pub fn response_id(&self) -> Value {
        self.id.clone().unwrap_or(Value::Null)
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Create an error response for a core error, using its public message.
    ///
    /// The error's own text is never copied into the response.
    pub fn from_error(id: Value, err: &Error) -> Self {
        let code = error_code(err);
        Self::error(id, code, public_message(code))
    }

    /// The error code, if this is an error response.
    #[must_use]
    pub fn error_code(&self) -> Option<i32> {
        self.error.as_ref().map(|e| e.code)
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Standard JSON-RPC error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// Server-defined: the `Accept` header does not allow both response modes.
pub const NOT_ACCEPTABLE: i32 = -32000;

/// Map a core error to its JSON-RPC error code.
#[must_use]
pub fn error_code(err: &Error) -> i32 {
    match err {
        Error::ToolNotFound(_) => METHOD_NOT_FOUND,
        Error::MalformedArguments(_) => INVALID_PARAMS,
        Error::DuplicateTool(_) | Error::DuplicateParameter { .. } | Error::Internal(_) => {
            INTERNAL_ERROR
        }
    }
}

/// Client-facing message for an error code.
#[must_use]
pub fn public_message(code: i32) -> &'static str {
    match code {
        NOT_ACCEPTABLE => "Not Acceptable",
        PARSE_ERROR => "Parse error",
        INVALID_REQUEST => "Invalid Request",
        METHOD_NOT_FOUND => "Method not found",
        INVALID_PARAMS => "Invalid params",
        _ => "Internal error",
    }
}

/// Best-effort recovery of the `id` member from a body that may not be a
/// valid request. Yields `null` when the body is not a JSON object or has
/// no usable id.
#[must_use]
pub fn peek_id(body: impl AsRef<[u8]>) -> Value {
    #[derive(Deserialize)]
    struct IdOnly {
        #[serde(default)]
        id: Value,
    }

    match serde_json::from_slice::<IdOnly>(body.as_ref()) {
        Ok(IdOnly {
            id: id @ (Value::String(_) | Value::Number(_)),
        }) => id,
        _ => Value::Null,
    }
}
