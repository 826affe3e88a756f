//! Request handler module
//!
//! Method validation and dispatch to the static content responder.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
pub use static_files::{resolve_request_path, serve, ServedFile, StaticResponder};
