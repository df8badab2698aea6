pub mod api;
mod middleware;

pub use api::{ApiState, build_api_router};

use std::future::IntoFuture;

use axum::Router;
use tracing::{info, warn};

use crate::config::ServerSettings;
use crate::infra::error::InfraError;

/// Bind the listener and serve until ctrl-c, then drain in-flight requests
/// for at most the configured grace period.
pub async fn serve(settings: &ServerSettings, router: Router) -> Result<(), InfraError> {
    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    info!(target = "foglio::http", addr = %settings.addr, "listening");

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(());
    let signal = async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(
                target = "foglio::http",
                error = %error,
                "failed to listen for shutdown signal",
            );
        }
        info!(target = "foglio::http", "shutdown signal received");
        let _ = shutdown_tx.send(());
    };

    let grace = settings.graceful_shutdown;
    let deadline = async move {
        if shutdown_rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(grace).await;
    };

    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(signal)
        .into_future();

    tokio::select! {
        result = server => result.map_err(InfraError::from),
        () = deadline => {
            warn!(target = "foglio::http", "graceful shutdown deadline reached, aborting");
            Ok(())
        }
    }
}
