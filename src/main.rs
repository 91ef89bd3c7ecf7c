// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::{load_board_settings, RuntimeFileConfig};
use crate::infrastructure::http_transport::ReqwestTransport;
use crate::infrastructure::notice_log::NoticeLog;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let settings = load_board_settings()?;
    let config = Arc::new(RuntimeFileConfig::from_settings(&settings));

    // Create application state
    let state = Arc::new(AppState {
        transport: Arc::new(ReqwestTransport::new()),
        config,
        notices: Arc::new(NoticeLog::default()),
        settings: settings.clone(),
    });

    let router = router(state);

    // Start server
    let addr: SocketAddr = settings.bind.parse()?;
    tracing::info!(mock = settings.use_mock, "Starting audit-board service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
