// Signal handling module
//
// Lifecycle hooks live here, outside the server component: main
// registers them once at process entry and they call the server
// handle's stop(). The server itself never touches process signals,
// which keeps it runnable (and stoppable) inside a test.

use crate::logger::Logger;
use crate::server::ServerHandle;
use std::sync::Arc;

/// Register interrupt hooks that trigger a graceful stop (Unix).
///
/// SIGINT and SIGTERM both stop the server. Registration failure is
/// logged and the process keeps running without hooks rather than
/// refusing to serve.
#[cfg(unix)]
pub fn register_lifecycle_hooks(handle: ServerHandle, logger: Arc<Logger>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                logger.error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                logger.error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };

        tokio::select! {
            _ = sigint.recv() => {
                logger.info("SIGINT received, shutting down");
            }
            _ = sigterm.recv() => {
                logger.info("SIGTERM received, shutting down");
            }
        }

        handle.stop();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn register_lifecycle_hooks(handle: ServerHandle, logger: Arc<Logger>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                logger.info("Ctrl+C received, shutting down");
                handle.stop();
            }
            Err(e) => {
                logger.error(&format!("Failed to register Ctrl+C handler: {e}"));
            }
        }
    });
}
