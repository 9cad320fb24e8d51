use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::sse::{Event, Sse},
    response::{IntoResponse, Response},
    Json,
};

use serde_json::Value;

use toolgate_mcp::jsonrpc::{public_message, INTERNAL_ERROR, JSONRPC_VERSION, NOT_ACCEPTABLE};
use toolgate_mcp::JsonRpcResponse;

use crate::app_state::AppState;
use crate::config::ResponseMode;
use crate::lifecycle::{self, Intercepted};

/// Handle MCP JSON-RPC requests (Streamable HTTP).
///
/// The body is taken as raw bytes so that an unparseable envelope, even one
/// that is not UTF-8, still reaches the dispatcher and gets a JSON-RPC error.
pub async fn mcp_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let accept = accept_header(&headers);

    if let Some(intercepted) = lifecycle::intercept(&state.config, accept.as_deref(), &body) {
        return match intercepted {
            Intercepted::Respond(response) => respond(state.config.response_mode, &response),
            Intercepted::Acknowledge => StatusCode::ACCEPTED.into_response(),
        };
    }

    let response = state.dispatcher.dispatch(accept.as_deref(), &body);

    // The client refused at least one mode, so only plain JSON is safe.
    if response.error_code() == Some(NOT_ACCEPTABLE) {
        return (StatusCode::NOT_ACCEPTABLE, Json(response)).into_response();
    }

    respond(state.config.response_mode, &response)
}

/// All `Accept` header lines joined into one list.
fn accept_header(headers: &HeaderMap) -> Option<String> {
    let values: Vec<&str> = headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

fn respond(mode: ResponseMode, response: &JsonRpcResponse) -> Response {
    match mode {
        ResponseMode::Json => Json(response).into_response(),
        ResponseMode::Sse => {
            let event = Event::default().event("message").data(event_data(response));
            Sse::new(tokio_stream::once(Ok::<_, Infallible>(event))).into_response()
        }
    }
}

/// The `data` line of the single `message` event.
fn event_data(response: &JsonRpcResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to serialize response event");
        internal_error(&response.id)
    })
}

fn internal_error(id: &Value) -> String {
    serde_json::json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "error": {
            "code": INTERNAL_ERROR,
            "message": public_message(INTERNAL_ERROR)
        }
    })
    .to_string()
}
