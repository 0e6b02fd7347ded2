//! Request boundary module
//!
//! Single entry point for request processing. Every failure in the
//! resolve/open/stream pipeline is converted to a status code here; the
//! handler itself is infallible so one bad request can never tear down
//! the connection task, let alone the process.

use crate::handler::{static_files, ServeError};
use crate::http::{self, ResponseBody};
use crate::logger::AccessLogEntry;
use crate::server::ServerContext;
use chrono::Local;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Handle one HTTP request against the served root.
///
/// The query string plays no part in resolution (`uri.path()` already
/// excludes it). `HEAD` gets the same status and headers as `GET` with
/// an empty body; every other method runs through the same pipeline,
/// which only ever reads. The request body, if any, is dropped unread.
pub async fn handle_request<B>(
    req: Request<B>,
    ctx: Arc<ServerContext>,
    peer_addr: SocketAddr,
) -> Result<Response<ResponseBody>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();
    let path = parts.uri.path();
    let is_head = parts.method == Method::HEAD;

    let response = match static_files::open(&ctx.root, path).await {
        Ok(resolved) => http::build_file_response(
            resolved.file,
            resolved.len,
            resolved.content_type,
            is_head,
        ),
        Err(ServeError::Forbidden) => {
            ctx.logger
                .warning(&format!("Path traversal attempt blocked: {path}"));
            http::build_forbidden_response()
        }
        Err(ServeError::NotFound) => http::build_not_found_response(),
        Err(ServeError::Io(err)) => {
            // Detail stays in the error log; the client only sees the
            // generic 500 body.
            ctx.logger.error(&format!("Failed to serve '{path}': {err}"));
            http::build_server_error_response()
        }
    };

    if ctx.access_log {
        let entry = AccessLogEntry {
            remote_addr: peer_addr.ip().to_string(),
            time: Local::now(),
            method: parts.method.to_string(),
            path: path.to_string(),
            query: parts.uri.query().map(ToString::to_string),
            http_version: version_label(parts.version).to_string(),
            status: response.status().as_u16(),
            body_bytes: content_length(&response),
            request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };
        ctx.logger.access(&entry.format(&ctx.access_log_format));
    }

    Ok(response)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        _ => "1.1",
    }
}

fn content_length(response: &Response<ResponseBody>) -> u64 {
    response
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}
