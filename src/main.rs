use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yourturn::app::{build_state, open_store, twilio_provider};
use yourturn::config::Config;
use yourturn::interface::api::{build_router, init_metrics};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting YourTurn");

    // Load configuration
    let config = Config::load()?;
    info!("Configuration loaded: {:?}", config);

    info!("Initializing Prometheus metrics exporter");
    let prometheus_handle = init_metrics()?;

    let repository = open_store(&config.store).await?;
    info!("Registrant store ready");

    let provider = twilio_provider(&config.twilio)?;
    let state = build_state(&config, repository, provider)?;
    let tracker = Arc::clone(&state.tracker);

    let app = build_router(state, prometheus_handle);
    let listener = tokio::net::TcpListener::bind(config.listen_address()).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(
        "Shut down with {} answered calls in memory",
        tracker.answered_count().await
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down...");
}
