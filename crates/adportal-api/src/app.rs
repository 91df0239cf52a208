//! Application builder: wires router, CORS and state into an Axum app and serves it.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use adportal_core::error::{AppError, ErrorKind};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state).layer(cors)
}

/// Binds the configured address and serves until Ctrl-C.
///
/// In-flight requests get `server.shutdown_grace_seconds` to finish.
pub async fn serve(state: AppState) -> Result<(), AppError> {
    let server = &state.config.server;
    let addr = format!("{}:{}", server.host, server.port);
    let grace = Duration::from_secs(server.shutdown_grace_seconds);

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Failed to bind {addr}"),
            e,
        )
    })?;
    info!(address = %addr, "Ad portal server listening");

    let app = build_app(state);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    let mut handle = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await
    });

    tokio::select! {
        result = &mut handle => {
            return flatten(result);
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                warn!(error = %e, "Failed to listen for Ctrl-C, shutting down");
            }
        }
    }

    info!(grace_seconds = grace.as_secs(), "Shutdown signal received");
    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(grace, &mut handle).await {
        Ok(result) => flatten(result),
        Err(_) => {
            warn!("Graceful shutdown timed out, aborting open connections");
            handle.abort();
            Ok(())
        }
    }
}

fn flatten(
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), AppError> {
    match result {
        Ok(Ok(())) => {
            info!("Server stopped");
            Ok(())
        }
        Ok(Err(e)) => Err(AppError::with_source(
            ErrorKind::Internal,
            "Server error",
            e,
        )),
        Err(e) => Err(AppError::with_source(
            ErrorKind::Internal,
            "Server task failed",
            e,
        )),
    }
}
