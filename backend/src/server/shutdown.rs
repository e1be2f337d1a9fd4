//! Graceful shutdown on SIGINT or SIGTERM.

use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::web;
use tracing::{error, info, warn};

use crate::inbound::http::health::HealthState;

/// Resolve once SIGINT (Ctrl-C) or, on Unix, SIGTERM arrives.
pub async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => info!(signal = "SIGINT", "shutdown requested"),
        () = terminate => info!(signal = "SIGTERM", "shutdown requested"),
    }
}

/// Wait for `signal`, fail liveness, then drain the server behind `handle`.
///
/// Resolves once in-flight requests have finished or the server's shutdown
/// timeout has elapsed.
pub async fn stop_gracefully<F>(signal: F, handle: ServerHandle, health: web::Data<HealthState>)
where
    F: std::future::Future<Output = ()>,
{
    signal.await;
    health.mark_unhealthy();
    handle.stop(true).await;
    info!("listener drained");
}

/// Drop the last handle to `store`, closing its connections.
///
/// Returns `false` and leaves the store to its remaining owners when other
/// handles are still alive.
pub fn release_store<T>(store: Arc<T>) -> bool {
    match Arc::try_unwrap(store) {
        Ok(store) => {
            drop(store);
            info!("user store closed");
            true
        }
        Err(shared) => {
            warn!(
                references = Arc::strong_count(&shared),
                "user store still shared at shutdown"
            );
            false
        }
    }
}
