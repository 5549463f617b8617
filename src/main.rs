use std::sync::Arc;

use clap::Parser;
use tracing::info;
use widget_apps_rust::config::{Cli, ServerConfig};
use widget_apps_rust::router::create_app_router;
use widget_apps_rust::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::from(&cli);

    // Initialize application state
    let state = Arc::new(AppState::from_config(&config)?);

    // Build application router with all routes and middleware
    let app = create_app_router(state.clone());

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        app = ?state.app,
        server = %state.server_info().name,
        widget_url = %state.widget_url,
        "Server running on http://{}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;
    Ok(())
}
