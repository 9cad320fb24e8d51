use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// The server rejects any request that does not accept both response modes.
pub const ACCEPT_BOTH: &str = "application/json, text/event-stream";

/// A JSON-RPC request envelope with a fixed id.
pub fn request(method: &str, params: Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": method,
        "params": params
    })
}

/// `POST {url}/mcp` with the mandatory `Accept` header.
pub fn builder(client: &Client, url: &str, body: &Value) -> RequestBuilder {
    client
        .post(format!("{}/mcp", url.trim_end_matches('/')))
        .header(ACCEPT, ACCEPT_BOTH)
        .json(body)
}

/// Send a request and read a JSON response.
///
/// Non-2xx answers still carry a JSON-RPC error body, so the status is only
/// logged.
pub async fn post(url: &str, body: &Value) -> anyhow::Result<Value> {
    let resp = builder(&Client::new(), url, body).send().await?;
    tracing::debug!(status = %resp.status(), "mcp response");

    let text = resp.text().await?;
    serde_json::from_str(&text)
        .map_err(|e| anyhow::anyhow!("server did not answer with JSON ({e}): {text}"))
}

/// The `result` member, or the `error` member as a failure.
pub fn into_result(mut resp: Value) -> anyhow::Result<Value> {
    if let Some(error) = resp.get("error") {
        anyhow::bail!("{}", serde_json::to_string_pretty(error)?);
    }
    match resp.get_mut("result") {
        Some(result) => Ok(result.take()),
        None => anyhow::bail!("response has neither result nor error: {resp}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_is_extracted() {
        let resp = serde_json::json!({"jsonrpc": "2.0", "id": 1, "result": {"tools": []}});
        assert_eq!(into_result(resp).unwrap(), serde_json::json!({"tools": []}));
    }

    #[test]
    fn error_becomes_failure() {
        let resp = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32601, "message": "Tool not found"}
        });
        let err = into_result(resp).unwrap_err().to_string();
        assert!(err.contains("-32601"));
        assert!(err.contains("Tool not found"));
    }

    #[test]
    fn envelope_shape() {
        let req = request("tools/list", serde_json::json!({}));
        assert_eq!(req["jsonrpc"], "2.0");
        assert_eq!(req["method"], "tools/list");
        assert!(req["params"].is_object());
    }
}
