//! Request dispatch: negotiation gate, envelope parsing, method routing and
//! tool invocation.
//!
//! Each call to [`Dispatcher::dispatch`] is one independent pass through
//!
//! ```text
//! AWAITING_ENVELOPE -> NEGOTIATED -> PARSED -> ROUTED -> RESOLVED -> RESPONDED
//! ```
//!
//! Any failed step jumps straight to RESPONDED with an error envelope. Nothing
//! carries over between requests.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;

use toolgate_core::Error;

use crate::arguments;
use crate::jsonrpc::{
    error_code, peek_id, public_message, JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR,
    INVALID_PARAMS, JSONRPC_VERSION, METHOD_NOT_FOUND, NOT_ACCEPTABLE, PARSE_ERROR,
};
use crate::negotiate::{negotiate, Negotiation};
use crate::tools::ToolRegistry;

pub const TOOLS_LIST: &str = "tools/list";
pub const TOOLS_CALL: &str = "tools/call";

/// Routes raw JSON-RPC envelopes to the tool registry.
///
/// Cheap to clone; every clone shares the same frozen registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one request: its `Accept` header value and raw body bytes.
    ///
    /// The body is not assumed to be UTF-8; undecodable bytes are a parse
    /// error like any other malformed envelope.
    pub fn dispatch(&self, accept: Option<&str>, body: impl AsRef<[u8]>) -> JsonRpcResponse {
        let body = body.as_ref();
        if negotiate(accept) == Negotiation::Reject {
            tracing::warn!(accept = ?accept, "rejecting request: Accept must allow JSON and SSE");
            return JsonRpcResponse::error(
                peek_id(body),
                NOT_ACCEPTABLE,
                public_message(NOT_ACCEPTABLE),
            );
        }

        let request = match parse_envelope(body) {
            Ok(request) => request,
            Err(reason) => {
                tracing::debug!(%reason, "unparseable envelope");
                return JsonRpcResponse::error(
                    peek_id(body),
                    PARSE_ERROR,
                    public_message(PARSE_ERROR),
                );
            }
        };

        self.route(&request)
    }

    /// Route an already-parsed request by method.
    pub fn route(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.response_id();
        tracing::debug!(method = %request.method, id = %id, "routing request");

        match request.method.as_str() {
            TOOLS_LIST => self.tools_list(id),
            TOOLS_CALL => self.tools_call(id, request.params.as_ref()),
            _ => JsonRpcResponse::error(id, METHOD_NOT_FOUND, public_message(METHOD_NOT_FOUND)),
        }
    }

    fn tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools = self.registry.definitions();
        JsonRpcResponse::success(id, serde_json::json!({ "tools": tools }))
    }

    fn tools_call(&self, id: Value, params: Option<&Value>) -> JsonRpcResponse {
        let Some(params) = params.filter(|p| p.is_object()) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, public_message(INVALID_PARAMS));
        };

        let Some(tool_name) = params.get("name").and_then(Value::as_str) else {
            return JsonRpcResponse::error(id, INVALID_PARAMS, public_message(INVALID_PARAMS));
        };

        let handler = match self.registry.resolve(tool_name) {
            Ok(handler) => handler,
            Err(err) => {
                tracing::debug!(tool = tool_name, "unknown tool");
                return JsonRpcResponse::error(id, error_code(&err), "Tool not found");
            }
        };

        let args = match arguments::extract_from_value(params) {
            Ok(args) => args,
            Err(err) => {
                tracing::debug!(tool = tool_name, error = %err, "rejecting arguments");
                return JsonRpcResponse::from_error(id, &err);
            }
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(&args)));
        let fault = match outcome {
            Ok(Ok(text)) => {
                return JsonRpcResponse::success(
                    id,
                    serde_json::json!({
                        "content": [{
                            "type": "text",
                            "text": text
                        }]
                    }),
                );
            }
            Ok(Err(err)) => err,
            Err(payload) => Error::Internal(panic_message(payload.as_ref())),
        };

        tracing::error!(tool = tool_name, error = %fault, "tool execution failed");
        JsonRpcResponse::error(id, INTERNAL_ERROR, public_message(INTERNAL_ERROR))
    }
}

/// Parse a body into a JSON-RPC 2.0 request.
fn parse_envelope(body: &[u8]) -> Result<JsonRpcRequest, String> {
    let request: JsonRpcRequest = serde_json::from_slice(body).map_err(|e| e.to_string())?;
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(format!("unsupported jsonrpc version '{}'", request.jsonrpc));
    }
    Ok(request)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic with non-string payload".to_string()
    }
}
