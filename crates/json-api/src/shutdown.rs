//! Graceful shutdown on SIGINT / SIGTERM.

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install {signal} handler")]
    Install {
        signal: &'static str,
        #[source]
        source: io::Error,
    },
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(|source| ShutdownSignalError::Install {
            signal: "SIGTERM",
            source,
        })?
        .recv()
        .await;

    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> Result<(), ShutdownSignalError> {
    std::future::pending().await
}

/// Wait for a stop signal, then give in-flight requests `grace` to finish.
pub(crate) async fn listen(
    handle: ServerHandle,
    grace: Duration,
) -> Result<(), ShutdownSignalError> {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .map_err(|source| ShutdownSignalError::Install {
                signal: "Ctrl+C",
                source,
            })
    };

    let received = tokio::select! {
        result = interrupt => result.map(|()| "interrupt")?,
        result = terminate() => result.map(|()| "terminate")?,
    };

    info!(
        signal = received,
        grace_seconds = grace.as_secs(),
        "shutting down, draining in-flight requests"
    );

    handle.stop_graceful(Some(grace));

    Ok(())
}
