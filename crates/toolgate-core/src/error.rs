/// Core error type for the toolgate system.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("tool already registered: {0}")]
    DuplicateTool(String),

    #[error("duplicate parameter '{parameter}' on tool '{tool}'")]
    DuplicateParameter { tool: String, parameter: String },

    #[error("malformed arguments: {0}")]
    MalformedArguments(String),

    #[error("internal error: {0}")]
    Internal(String),
}
