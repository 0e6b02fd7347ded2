//! Static file server for a personal portfolio site.
//!
//! The server resolves request paths against a fixed root directory,
//! refuses anything that would escape it, and streams file bytes back
//! with a content type derived from the file extension.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
