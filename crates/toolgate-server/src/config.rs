use clap::{Parser, ValueEnum};

pub const DEFAULT_INSTRUCTIONS: &str = "Sample tools backed by mock data. Call hello_mcp to check \
connectivity, get_weather for current conditions in a city, search_products to search the \
product catalog, and get_order_status to track an order by ID (e.g. ORD-1001).";

/// How successful responses are written back to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResponseMode {
    /// A single `application/json` body.
    Json,
    /// A `text/event-stream` body carrying one `message` event.
    Sse,
}

/// Server configuration, from flags or environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "toolgate-server",
    about = "MCP tool server over Streamable HTTP",
    version
)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "TOOLGATE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "TOOLGATE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Server name reported during capability negotiation
    #[arg(long, env = "TOOLGATE_SERVER_NAME", default_value = "toolgate")]
    pub server_name: String,

    /// Server version reported during capability negotiation
    #[arg(long, env = "TOOLGATE_SERVER_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub server_version: String,

    /// Usage instructions reported during capability negotiation
    #[arg(long, env = "TOOLGATE_INSTRUCTIONS", default_value = DEFAULT_INSTRUCTIONS)]
    pub instructions: String,

    /// Response body format for accepted requests
    #[arg(long, env = "TOOLGATE_RESPONSE_MODE", value_enum, default_value_t = ResponseMode::Json)]
    pub response_mode: ResponseMode,
}

impl ServerConfig {
    /// The `host:port` pair to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            server_name: "toolgate".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            response_mode: ResponseMode::Json,
        }
    }
}
