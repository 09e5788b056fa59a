//! Startup helpers for the travel planner server.

use std::process::ExitCode;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::server::{self, AppState};

/// Install logging, load configuration and serve until Ctrl+C.
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting AI Travel Planner v{}", env!("CARGO_PKG_VERSION"));

    let (config, state) = match initialize() {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!("Failed to initialize: {e}");
            return ExitCode::from(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let served = rt.block_on(server::run_server_with_shutdown(
        state,
        config.server.port,
        &config.server.static_dir,
        shutdown_signal(),
    ));
    if let Err(e) = served {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    tracing::info!("Server stopped");
    ExitCode::SUCCESS
}

/// Load configuration and build application state without starting the server.
///
/// # Errors
/// Returns an error if configuration is incomplete or the client cannot be built.
pub fn initialize() -> Result<(AppConfig, Arc<AppState>), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::from_env()?;
    tracing::info!(
        model = %config.llm.model,
        endpoint = %config.llm.base_url,
        port = config.server.port,
        "configuration loaded"
    );

    let state = AppState::from_config(&config)?;
    Ok((config, state))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
