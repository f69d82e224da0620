use crate::agents::AgentTestInvoker;
use crate::api::routes::build_app;
use crate::utils::Config;
use crate::AppState;
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Connect to the configured store and serve the API until Ctrl+C / SIGTERM.
pub async fn serve(config: Config) -> Result<()> {
    let provider = config
        .store
        .provider()
        .context("Store is not configured")?;
    info!(store = %provider, "Connecting to agent store");

    let repository = provider
        .create_client()
        .await
        .context("Failed to open agent store")?;
    let invoker = AgentTestInvoker::from_config(&config.invoker)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, repository, invoker);
    let app = build_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Dashboard API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Dashboard API shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }
}
