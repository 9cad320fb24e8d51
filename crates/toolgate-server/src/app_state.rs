use std::sync::Arc;

use toolgate_mcp::Dispatcher;

use crate::config::ServerConfig;

/// Shared application state with injected dependencies.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(dispatcher: Dispatcher, config: ServerConfig) -> Self {
        Self {
            dispatcher,
            config: Arc::new(config),
        }
    }
}
