//! WhatsApp relay HTTP server
//!
//! Main entry point: loads configuration, wires the adapters into the
//! services and serves the webhook until Ctrl+C or SIGTERM.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{
    MessageDispatcher, ReplyService,
    ports::{InferencePort, MessengerPort},
};
use infrastructure::{AppConfig, AzureInferenceAdapter, WhatsAppMessengerAdapter, init_tracing};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let dotenv = dotenvy::dotenv();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(config.server.log_format)?;

    info!("WhatsApp relay v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded .env file");
    }

    config.validate().context("Invalid configuration")?;

    info!(
        host = %config.server.host,
        port = %config.server.port,
        deployment = ?config.completion.deployment(),
        graph_api = %config.whatsapp.api_version,
        "Configuration loaded"
    );

    let inference: Arc<dyn InferencePort> = Arc::new(
        AzureInferenceAdapter::new(config.completion.to_engine_config())
            .context("Failed to initialize completion client")?,
    );
    let messenger: Arc<dyn MessengerPort> = Arc::new(
        WhatsAppMessengerAdapter::new(config.whatsapp.to_client_config())
            .context("Failed to initialize WhatsApp client")?,
    );

    let reply_service = ReplyService::new(inference);
    if !reply_service.is_configured() {
        warn!("No completion deployment configured, replies will carry a configuration notice");
    }

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let addr = config.server.bind_address();

    let state = AppState {
        reply_service: Arc::new(reply_service),
        dispatcher: Arc::new(MessageDispatcher::new(messenger)),
        config: Arc::new(config),
    };

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    // In-flight relays get `shutdown_timeout` to finish after the signal
    tokio::select! {
        result = server => result?,
        () = drain_deadline(shutdown_timeout) => {
            warn!(
                timeout = ?shutdown_timeout,
                "Shutdown timeout elapsed, aborting open connections"
            );
        }
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
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
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

/// Resolves `timeout` after the first shutdown signal
async fn drain_deadline(timeout: Duration) {
    shutdown_signal().await;
    tokio::time::sleep(timeout).await;
}
