//! Session lifecycle methods the host answers itself.
//!
//! Capability negotiation (`initialize`), `ping` and client notifications are
//! transport concerns; everything else goes to the [`Dispatcher`]. A request
//! is only intercepted once its `Accept` header passes and its envelope
//! parses, so every failure path is still produced by the dispatcher.
//!
//! [`Dispatcher`]: toolgate_mcp::Dispatcher

use serde_json::Value;

use toolgate_mcp::jsonrpc::JSONRPC_VERSION;
use toolgate_mcp::negotiate::negotiate;
use toolgate_mcp::{JsonRpcRequest, JsonRpcResponse};

use crate::config::ServerConfig;

pub const INITIALIZE: &str = "initialize";
pub const PING: &str = "ping";
pub const NOTIFICATION_PREFIX: &str = "notifications/";

/// MCP revision that introduced the Streamable HTTP transport.
pub const PROTOCOL_VERSION: &str = "2025-03-26";

/// A lifecycle request handled by the host.
#[derive(Debug)]
pub enum Intercepted {
    /// Answer with this response.
    Respond(JsonRpcResponse),
    /// A notification: acknowledge with no body.
    Acknowledge,
}

/// Handle the request here if it is a lifecycle method.
///
/// Returns `None` for anything the dispatcher should see.
pub fn intercept(
    config: &ServerConfig,
    accept: Option<&str>,
    body: impl AsRef<[u8]>,
) -> Option<Intercepted> {
    if !negotiate(accept).is_accept() {
        return None;
    }

    let request: JsonRpcRequest = serde_json::from_slice(body.as_ref()).ok()?;
    if request.jsonrpc != JSONRPC_VERSION {
        return None;
    }

    match request.method.as_str() {
        method if request.is_notification() && method.starts_with(NOTIFICATION_PREFIX) => {
            tracing::debug!(method, "client notification");
            Some(Intercepted::Acknowledge)
        }
        INITIALIZE => {
            tracing::info!(id = %request.response_id(), "client initializing");
            Some(Intercepted::Respond(initialize(config, request.response_id())))
        }
        PING => Some(Intercepted::Respond(JsonRpcResponse::success(
            request.response_id(),
            serde_json::json!({}),
        ))),
        _ => None,
    }
}

fn initialize(config: &ServerConfig, id: Value) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": config.server_name,
                "version": config.server_version
            },
            "instructions": config.instructions
        }),
    )
}
