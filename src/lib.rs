//! Directory-backed static content server
//!
//! Serves files from a single root directory over HTTP/1. Existing files
//! are returned with a media type derived from their extension, missing
//! paths are 404, and directories are refused with 403 instead of being
//! listed. Request paths can never resolve outside the root.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::ServeError;
pub use handler::static_files::{resolve_request_path, serve, ServedFile, StaticResponder};
