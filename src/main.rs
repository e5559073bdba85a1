//! Companion Hook - Application Entry Point
//!
//! Starts the Competitive Companion listener and keeps it running until a
//! shutdown signal arrives or, in one-shot mode, the first problem is handled.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use companion_hook::{
    config::Config,
    editor::CommandEditor,
    server::Listener,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    let log_json = config.server.log_json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.rust_log.clone().into()),
        )
        .with(log_json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!log_json).then(tracing_subscriber::fmt::layer))
        .init();

    tracing::info!("Starting companion-hook...");
    if config.server.one_shot {
        tracing::info!("One-shot mode: the listener stops after the first problem");
    }

    let editor = Arc::new(CommandEditor::new(&config.editor));
    let state = AppState::new(config, editor);

    let running = match Listener::new(state).start().await {
        Ok(running) => running,
        Err(e) => {
            tracing::error!("Listener not started: {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut stop_requested = running.shutdown_requested();
    tokio::select! {
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received, finishing in-flight requests...");
        }
        _ = stop_requested.wait_for(|stop| *stop) => {}
    }

    running.stop().await?;
    tracing::info!("companion-hook shutdown complete");
    Ok(ExitCode::SUCCESS)
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
