pub mod arguments;
pub mod dispatch;
pub mod jsonrpc;
pub mod negotiate;
pub mod resolvers;
pub mod tools;

pub use dispatch::Dispatcher;
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use negotiate::Negotiation;
pub use tools::{ToolDefinition, ToolHandler, ToolRegistry};
