//! HTTP protocol layer module
//!
//! Media type lookup and response builders, decoupled from filesystem access.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{build_405_response, build_error_response, build_file_response};
