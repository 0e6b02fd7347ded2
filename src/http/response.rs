//! HTTP response building module
//!
//! Builders for the four statuses the server produces: 200 for a served
//! file, 403/404/500 for the terminal failure paths.

use crate::http::body::{self, ResponseBody};
use hyper::Response;
use tokio::fs::File;

/// Build 403 Forbidden response (path escapes the root)
pub fn build_forbidden_response() -> Response<ResponseBody> {
    build_plain_response(403, "Forbidden")
}

/// Build 404 Not Found response
pub fn build_not_found_response() -> Response<ResponseBody> {
    build_plain_response(404, "Not found")
}

/// Build 500 Server error response
///
/// The body is a fixed generic message; failure detail goes to the error
/// log, never to the client.
pub fn build_server_error_response() -> Response<ResponseBody> {
    build_plain_response(500, "Server error")
}

/// Build 200 response streaming an open file
pub fn build_file_response(
    file: File,
    len: u64,
    content_type: &'static str,
    is_head: bool,
) -> Response<ResponseBody> {
    let body = if is_head {
        body::empty()
    } else {
        body::file_stream(file)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", len)
        .body(body)
        .unwrap_or_else(|_| Response::new(body::empty()))
}

fn build_plain_response(status: u16, message: &'static str) -> Response<ResponseBody> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", message.len())
        .body(body::full(message))
        .unwrap_or_else(|_| Response::new(body::full(message)))
}
