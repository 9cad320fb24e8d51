use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use serde_json::Value;

use toolgate_core::traits::DataSources;
use toolgate_fixtures::FixtureStore;
use toolgate_mcp::{Dispatcher, ToolRegistry};
use toolgate_server::app_state::AppState;
use toolgate_server::config::{ResponseMode, ServerConfig};

use mock_tables::{MockCatalog, MockOrders, MockWeather, FAULTY_CITY};

const ACCEPT_BOTH: &str = "application/json, text/event-stream";

fn build_app(sources: &DataSources, mode: ResponseMode) -> TestServer {
    let registry = ToolRegistry::with_default_tools(sources).unwrap();
    let config = ServerConfig {
        server_name: "toolgate-test".to_string(),
        response_mode: mode,
        ..ServerConfig::default()
    };
    let state = AppState::new(Dispatcher::new(registry), config);

    let app = toolgate_server::router::create_router(state);
    TestServer::new(app).unwrap()
}

fn build_test_app() -> TestServer {
    build_app(&FixtureStore::new().data_sources(), ResponseMode::Json)
}

fn build_mock_app() -> TestServer {
    let sources = DataSources {
        weather: Arc::new(MockWeather),
        catalog: Arc::new(MockCatalog::default()),
        orders: Arc::new(MockOrders),
    };
    build_app(&sources, ResponseMode::Json)
}

/// POST to `/mcp` with the mandatory Accept header.
fn mcp(server: &TestServer) -> TestRequest {
    server
        .post("/mcp")
        .add_header(header::ACCEPT, HeaderValue::from_static(ACCEPT_BOTH))
}

fn tool_call(name: &str, arguments: &Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {
            "name": name,
            "arguments": arguments
        }
    })
}

/// Parse the JSON text a tool returned.
fn tool_text(body: &Value) -> Value {
    let text = body["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn health_check() {
    let server = build_test_app();
    let resp = server.get("/health").await;
    resp.assert_status_ok();

    let body: Value = resp.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["tools"], 4);
}

#[tokio::test]
async fn mcp_tools_list() {
    let server = build_test_app();

    let resp = mcp(&server)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": {}
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    let names: Vec<&str> = body["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(
        names,
        vec!["hello_mcp", "get_weather", "search_products", "get_order_status"]
    );
    assert!(body["result"]["tools"][1]["inputSchema"]["properties"]
        .get("city")
        .is_some());
}

#[tokio::test]
async fn weather_tokyo() {
    let server = build_test_app();

    let resp = mcp(&server)
        .json(&tool_call("get_weather", &serde_json::json!({"city": "Tokyo"})))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["id"], 1);
    assert!(body.get("error").is_none());
    assert_eq!(body["result"]["content"][0]["type"], "text");

    let weather = tool_text(&body);
    assert_eq!(weather["city"], "Tokyo");
    assert_eq!(weather["condition"], "Sunny");
    assert_eq!(weather["temperature_c"], 22);
}

#[tokio::test]
async fn missing_accept_is_not_acceptable() {
    let server = build_test_app();

    let resp = server
        .post("/mcp")
        .json(&tool_call("get_weather", &serde_json::json!({"city": "Tokyo"})))
        .await;

    resp.assert_status(StatusCode::NOT_ACCEPTABLE);
    let body: Value = resp.json();
    assert_eq!(
        body,
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "Not Acceptable"}
        })
    );
}

#[tokio::test]
async fn incomplete_accept_rejects_every_method() {
    let server = build_test_app();

    for method in ["initialize", "tools/list", "tools/call", "no/such/method"] {
        let resp = server
            .post("/mcp")
            .add_header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .json(&serde_json::json!({"jsonrpc": "2.0", "id": 9, "method": method}))
            .await;

        resp.assert_status(StatusCode::NOT_ACCEPTABLE);
        let body: Value = resp.json();
        assert_eq!(body["error"]["code"], -32000, "method {method}");
    }
}

#[tokio::test]
async fn unknown_order_is_a_result() {
    let server = build_test_app();

    let resp = mcp(&server)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "tools/call",
            "params": {"name": "get_order_status", "arguments": {"order_id": "ORD-9999"}}
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert!(body.get("error").is_none());
    assert_eq!(tool_text(&body)["status"], "Not Found");
}

#[tokio::test]
async fn search_respects_max_results() {
    let server = build_test_app();

    let resp = mcp(&server)
        .json(&tool_call(
            "search_products",
            &serde_json::json!({"query": "electronics", "max_results": "2"}),
        ))
        .await;

    let body: Value = resp.json();
    let result = tool_text(&body);
    assert_eq!(result["returned"], 2);
    assert_eq!(result["products"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_tool() {
    let server = build_test_app();

    let resp = mcp(&server)
        .json(&tool_call("get_stock_price", &serde_json::json!({})))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], -32601);
}

#[tokio::test]
async fn malformed_arguments() {
    let server = build_test_app();

    let resp = mcp(&server)
        .json(&tool_call("get_weather", &serde_json::json!("{\"city\": ")))
        .await;

    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], -32602);
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn mcp_unknown_method() {
    let server = build_test_app();

    let resp = mcp(&server)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "nonexistent/method",
            "params": {}
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], -32601);
}

#[tokio::test]
async fn invalid_envelope_is_parse_error() {
    let server = build_test_app();

    let resp = mcp(&server).text("{\"jsonrpc\": \"2.0\", \"id\": ").await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn non_utf8_body_without_accept_is_not_acceptable() {
    let server = build_test_app();

    let resp = server
        .post("/mcp")
        .bytes(Bytes::from_static(&[0xff, 0xfe, b'{']))
        .await;

    resp.assert_status(StatusCode::NOT_ACCEPTABLE);
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], -32000);
    assert_eq!(body["id"], Value::Null);
}

#[tokio::test]
async fn non_utf8_body_is_parse_error() {
    let server = build_test_app();

    let resp = mcp(&server)
        .bytes(Bytes::from_static(&[0xff, 0xfe, b'{']))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["jsonrpc"], "2.0");
    assert_eq!(body["error"]["code"], -32700);
    assert_eq!(body["error"]["message"], "Parse error");
}

#[tokio::test]
async fn mcp_initialize() {
    let server = build_test_app();

    let resp = mcp(&server)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {}
        }))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["result"]["serverInfo"]["name"], "toolgate-test");
    assert!(body["result"]["instructions"].as_str().is_some());
}

#[tokio::test]
async fn mcp_notification_returns_accepted() {
    let server = build_test_app();

    let resp = mcp(&server)
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        }))
        .await;

    resp.assert_status(StatusCode::ACCEPTED);
}

#[tokio::test]
async fn event_stream_mode() {
    let server = build_app(&FixtureStore::new().data_sources(), ResponseMode::Sse);

    let resp = mcp(&server)
        .json(&tool_call("hello_mcp", &serde_json::json!({})))
        .await;

    resp.assert_status_ok();
    let content_type = resp.header(header::CONTENT_TYPE);
    assert!(content_type
        .to_str()
        .unwrap()
        .starts_with("text/event-stream"));

    let text = resp.text();
    assert!(text.contains("event: message"));
    let data = text
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .unwrap();
    let body: Value = serde_json::from_str(data).unwrap();
    assert_eq!(body["id"], 1);
    assert!(body["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Hello"));
}

#[tokio::test]
async fn event_stream_mode_still_rejects_as_json() {
    let server = build_app(&FixtureStore::new().data_sources(), ResponseMode::Sse);

    let resp = server
        .post("/mcp")
        .json(&serde_json::json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}))
        .await;

    resp.assert_status(StatusCode::NOT_ACCEPTABLE);
    let body: Value = resp.json();
    assert_eq!(body["error"]["message"], "Not Acceptable");
}

#[tokio::test]
async fn injected_tables_are_used() {
    let server = build_mock_app();

    let resp = mcp(&server)
        .json(&tool_call("get_weather", &serde_json::json!({"city": "REYKJAVIK"})))
        .await;
    assert_eq!(tool_text(&resp.json())["condition"], "Windy");

    let resp = mcp(&server)
        .json(&tool_call("search_products", &serde_json::json!({"query": "outdoor"})))
        .await;
    assert_eq!(tool_text(&resp.json())["total_matches"], 2);

    let resp = mcp(&server)
        .json(&tool_call("get_order_status", &serde_json::json!({"order_id": "ORD-1001"})))
        .await;
    assert_eq!(tool_text(&resp.json())["status"], "Not Found");
}

#[tokio::test]
async fn provider_fault_is_internal_error() {
    let server = build_mock_app();

    let resp = mcp(&server)
        .json(&tool_call("get_weather", &serde_json::json!({"city": FAULTY_CITY})))
        .await;

    resp.assert_status_ok();
    let body: Value = resp.json();
    assert_eq!(body["error"]["code"], -32603);
    assert_eq!(body["error"]["message"], "Internal error");
    assert!(!body.to_string().contains("corrupted"));
}
