//! Weather API server
//!
//! Main entry point for the HTTP API server.

use std::time::Duration;

use anyhow::Context;
use tokio::{net::TcpListener, signal, sync::oneshot};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_api::{AppState, create_router};
use weather_core::{Config, WeatherService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_api=info,weather_core=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Weather API v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load()
        .unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {e:#}");
            Config::default()
        })
        .with_port_override(std::env::var("PORT").ok().as_deref())?;

    info!(
        addr = %config.server.addr(),
        forecast_url = %config.provider.forecast_url,
        timeout_secs = config.provider.timeout_secs,
        request_timeout_secs = config.server.request_timeout_secs,
        "Configuration loaded"
    );

    let service = WeatherService::open_meteo(config.provider.clone())
        .context("Failed to initialize weather client")?;
    let app = create_router(
        AppState::new(service).with_request_timeout(config.server.request_timeout()),
    );

    let addr = config.server.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on http://{addr}");

    let (signalled_tx, signalled_rx) = oneshot::channel();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = signalled_tx.send(());
            })
            .await
    });

    let grace = config.server.shutdown_grace();
    tokio::select! {
        res = &mut server => {
            res.context("Server task failed")?.context("Server error")?;
        }
        () = force_close_after(signalled_rx, grace) => {
            warn!("In-flight requests still running after {grace:?}, forcing shutdown");
            server.abort();
        }
    }

    info!("Server stopped");

    Ok(())
}

/// Resolve once `grace` has passed since the shutdown signal. Never resolves if the
/// server exits without a signal.
async fn force_close_after(signalled: oneshot::Receiver<()>, grace: Duration) {
    if signalled.await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("Shutting down, waiting up to {grace:?} for in-flight requests");
    tokio::time::sleep(grace).await;
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}
