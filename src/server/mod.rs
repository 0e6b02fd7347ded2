// Server module entry point
// Accept loop, graceful stop, listener creation, and lifecycle hooks.

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_listener;

use crate::config::LoggingConfig;
use crate::handler::path;
use crate::logger::Logger;
use hyper_util::server::graceful::GracefulShutdown;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// Immutable per-process state shared by all requests.
///
/// Nothing here is mutated after startup, so requests share it without
/// any locking.
pub struct ServerContext {
    /// Root directory all requests resolve under (normalized, absolute)
    pub root: PathBuf,
    pub logger: Arc<Logger>,
    pub access_log: bool,
    pub access_log_format: String,
}

impl ServerContext {
    pub fn new(root: PathBuf, logger: Arc<Logger>, logging: &LoggingConfig) -> Self {
        Self {
            // Normalize once so the per-request prefix check compares
            // against a clean root.
            root: path::normalize(&root),
            logger,
            access_log: logging.access_log,
            access_log_format: logging.access_log_format.clone(),
        }
    }
}

/// The static file server: accepts connections until stopped, then
/// drains in-flight responses and returns.
pub struct Server {
    ctx: Arc<ServerContext>,
    shutdown: Arc<Notify>,
}

/// Handle for stopping a running server from outside its task
/// (lifecycle hooks, tests).
#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<Notify>,
}

impl ServerHandle {
    /// Request a graceful stop: the server stops accepting, lets
    /// in-flight responses finish, and its `run` future resolves.
    pub fn stop(&self) {
        // notify_one stores a permit, so a stop issued before the server
        // reaches its select loop is not lost.
        self.shutdown.notify_one();
    }
}

impl Server {
    pub fn new(ctx: Arc<ServerContext>) -> Self {
        Self {
            ctx,
            shutdown: Arc::new(Notify::new()),
        }
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: Arc::clone(&self.shutdown),
        }
    }

    /// Run the accept loop on an already-bound listener.
    ///
    /// Accept failures are logged and the loop continues; availability
    /// wins over fail-fast for a box nobody is watching.
    pub async fn run(self, listener: TcpListener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        self.ctx
            .logger
            .info(&format!("Serving {} on http://{addr}", self.ctx.root.display()));

        let graceful = GracefulShutdown::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer_addr)) => {
                            connection::accept_connection(stream, peer_addr, &self.ctx, &graceful);
                        }
                        Err(e) => {
                            self.ctx.logger.error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }

                () = self.shutdown.notified() => {
                    break;
                }
            }
        }

        // Stop accepting before draining
        drop(listener);
        self.ctx
            .logger
            .info("Shutdown requested, draining in-flight connections");
        graceful.shutdown().await;
        self.ctx.logger.info("Server stopped");
        Ok(())
    }
}
