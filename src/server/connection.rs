// Connection handling module
// Serves each accepted TCP connection on its own task.

use crate::handler;
use crate::server::ServerContext;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use hyper_util::server::graceful::GracefulShutdown;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

/// Serve one connection in a spawned task.
///
/// The connection is registered with the graceful-shutdown watcher so a
/// stop request waits for its in-flight response (and closes its idle
/// keep-alive) instead of cutting it off. Serve errors end only this
/// connection's task; they are logged and the accept loop never sees
/// them.
pub fn accept_connection(
    stream: TcpStream,
    peer_addr: SocketAddr,
    ctx: &Arc<ServerContext>,
    graceful: &GracefulShutdown,
) {
    if ctx.access_log {
        ctx.logger
            .info(&format!("[Connection] Accepted from: {peer_addr}"));
    }

    let io = TokioIo::new(stream);
    let service_ctx = Arc::clone(ctx);
    let service = service_fn(move |req| {
        handler::handle_request(req, Arc::clone(&service_ctx), peer_addr)
    });

    let conn = http1::Builder::new()
        .keep_alive(true)
        .serve_connection(io, service);
    let conn = graceful.watch(conn);

    let log_ctx = Arc::clone(ctx);
    tokio::spawn(async move {
        if let Err(err) = conn.await {
            log_ctx
                .logger
                .error(&format!("Failed to serve connection from {peer_addr}: {err:?}"));
        }
    });
}
