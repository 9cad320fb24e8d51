use toolgate_core::{ArgumentBag, Error, ToolDescriptor};

pub const NAME: &str = "hello_mcp";

pub const GREETING: &str = "Hello from the toolgate MCP server! The connection is working.";

#[must_use]
pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        NAME,
        "Returns a simple greeting. Use this to verify the MCP server is reachable.",
    )
}

/// Connectivity check; ignores its arguments.
///
/// # Errors
///
/// Never fails.
pub fn resolve(_args: &ArgumentBag) -> Result<String, Error> {
    tracing::info!("{NAME} triggered");
    Ok(GREETING.to_string())
}
