use reqwest::Client;
use reqwest_eventsource::{Event, EventSource};
use serde_json::{Map, Value};
use tokio_stream::StreamExt;

use toolgate_mcp::arguments::{extract_arguments, ARGUMENTS_KEY};

use crate::rpc;

#[derive(Debug, Clone, Copy)]
pub struct CallOptions {
    pub flat: bool,
    pub stream: bool,
}

/// Call a tool and print the text content it returns.
pub async fn run(
    url: &str,
    tool: &str,
    args_json: Option<&str>,
    args: Vec<(String, String)>,
    options: CallOptions,
) -> anyhow::Result<()> {
    let arguments = build_arguments(args_json, args)?;
    let body = rpc::request("tools/call", params_for(tool, arguments, options.flat));
    tracing::debug!("[send] {body}");

    let resp = if options.stream {
        stream_call(url, &body).await?
    } else {
        rpc::post(url, &body).await?
    };

    let result = rpc::into_result(resp)?;
    for item in result["content"].as_array().into_iter().flatten() {
        if let Some(text) = item["text"].as_str() {
            println!("{text}");
        }
    }

    Ok(())
}

/// Parse a `key=value` pair. Only the first `=` separates.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{s}'")),
    }
}

/// Merge the JSON object (if any) with the `key=value` pairs.
fn build_arguments(
    args_json: Option<&str>,
    args: Vec<(String, String)>,
) -> anyhow::Result<Map<String, Value>> {
    let mut arguments = match args_json {
        Some(raw) => match serde_json::to_value(extract_arguments(raw)?)? {
            Value::Object(map) => map,
            _ => Map::new(),
        },
        None => Map::new(),
    };

    for (key, value) in args {
        arguments.insert(key, Value::String(value));
    }
    Ok(arguments)
}

fn params_for(tool: &str, arguments: Map<String, Value>, flat: bool) -> Value {
    if flat {
        let mut params = arguments;
        params.insert("name".to_string(), Value::String(tool.to_string()));
        Value::Object(params)
    } else {
        serde_json::json!({
            "name": tool,
            ARGUMENTS_KEY: arguments
        })
    }
}

/// Send the request and read the single `message` event of the reply.
async fn stream_call(url: &str, body: &Value) -> anyhow::Result<Value> {
    let client = Client::new();
    let mut es = EventSource::new(rpc::builder(&client, url, body))?;

    while let Some(event) = es.next().await {
        match event {
            Ok(Event::Open) => {
                tracing::debug!("event stream open");
            }
            Ok(Event::Message(msg)) => {
                tracing::debug!("[recv] {}", msg.data);
                es.close();
                return Ok(serde_json::from_str(&msg.data)?);
            }
            Err(reqwest_eventsource::Error::InvalidContentType(content_type, _)) => {
                es.close();
                anyhow::bail!(
                    "expected an event stream, got {content_type:?}; \
                     run the server with --response-mode sse or drop --stream"
                );
            }
            Err(reqwest_eventsource::Error::InvalidStatusCode(status, resp)) => {
                es.close();
                let text = resp.text().await?;
                anyhow::bail!("server answered {status}: {text}");
            }
            Err(e) => {
                es.close();
                anyhow::bail!("event stream failed: {e}");
            }
        }
    }

    anyhow::bail!("event stream ended without a message")
}
