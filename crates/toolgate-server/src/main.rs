use clap::Parser;
use tracing_subscriber::EnvFilter;

use toolgate_fixtures::FixtureStore;
use toolgate_mcp::{Dispatcher, ToolRegistry};
use toolgate_server::app_state::AppState;
use toolgate_server::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::parse();

    // Tables and registry are complete before the first request is accepted.
    let sources = FixtureStore::new().data_sources();
    let registry = ToolRegistry::with_default_tools(&sources)?;
    tracing::info!(tools = registry.len(), "tool registry ready");

    let addr = config.bind_addr();
    let mode = config.response_mode;
    let state = AppState::new(Dispatcher::new(registry), config);
    let app = toolgate_server::router::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("toolgate listening on {addr} (POST /mcp, response mode {mode:?})");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
