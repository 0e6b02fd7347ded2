//! HTTP protocol layer module
//!
//! Content-type lookup, response body plumbing, and status response
//! builders, decoupled from request handling logic.

pub mod body;
pub mod mime;
pub mod response;

pub use body::ResponseBody;
pub use response::{
    build_file_response, build_forbidden_response, build_not_found_response,
    build_server_error_response,
};
