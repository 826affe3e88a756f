//! Static file serving module
//!
//! Resolves request paths under a fixed root directory, loads the file and
//! its MIME type, and turns the outcome into a response. Directories are
//! never enumerated.

use crate::error::{ServeError, ServeResult};
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A file resolved under the root, ready to be written out
#[derive(Debug, Clone)]
pub struct ServedFile {
    /// Location on disk
    pub path: PathBuf,
    /// File bytes
    pub content: Bytes,
    /// Media type derived from the extension
    pub content_type: &'static str,
}

/// Directory-backed responder
///
/// Holds no mutable state, so one instance can be shared by every connection.
#[derive(Debug, Clone)]
pub struct StaticResponder {
    root: PathBuf,
    index_files: Vec<String>,
}

impl StaticResponder {
    /// Create a responder serving `root`, with directory index lookup disabled
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index_files: Vec::new(),
        }
    }

    /// Serve the first of `index_files` found when a request names a directory
    #[must_use]
    pub fn with_index_files(mut self, index_files: Vec<String>) -> Self {
        self.index_files = index_files;
        self
    }

    /// Answer a request path with a full HTTP response
    pub async fn respond(&self, request_path: &str, is_head: bool) -> Response<Full<Bytes>> {
        match self.load(request_path).await {
            Ok(file) => {
                logger::log_debug(&format!(
                    "Resolved {request_path} -> {} ({})",
                    file.path.display(),
                    file.content_type
                ));
                http::build_file_response(file.content, file.content_type, is_head)
            }
            Err(err) => {
                if let ServeError::Io(e) = &err {
                    logger::log_error(&format!("Failed to serve '{request_path}': {e}"));
                }
                http::build_error_response(err.status())
            }
        }
    }

    /// Load the file a request path refers to
    pub async fn load(&self, request_path: &str) -> ServeResult<ServedFile> {
        let decoded = decode_request_path(request_path).ok_or(ServeError::NotFound)?;
        let mut file_path = self.root.join(normalize_segments(&decoded));

        let metadata = fs::metadata(&file_path).await?;
        self.confine(&file_path, request_path).await?;

        if metadata.is_dir() {
            file_path = self.find_index(&file_path).await.ok_or(ServeError::Forbidden)?;
            self.confine(&file_path, request_path).await?;
        } else if !metadata.is_file() || names_directory(&decoded) {
            return Err(ServeError::NotFound);
        }

        let content = fs::read(&file_path).await?;
        let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

        Ok(ServedFile {
            path: file_path,
            content: Bytes::from(content),
            content_type,
        })
    }

    /// Reject paths whose real location (after symlinks) leaves the root
    async fn confine(&self, path: &Path, request_path: &str) -> ServeResult<()> {
        let root = fs::canonicalize(&self.root).await?;
        let real = fs::canonicalize(path).await?;
        if real.starts_with(&root) {
            Ok(())
        } else {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {request_path} -> {}",
                real.display()
            ));
            Err(ServeError::NotFound)
        }
    }

    async fn find_index(&self, dir: &Path) -> Option<PathBuf> {
        for index_file in &self.index_files {
            let candidate = dir.join(index_file);
            if let Ok(meta) = fs::metadata(&candidate).await {
                if meta.is_file() {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

/// Serve `request_path` from `root` without index lookup
///
/// Transport-free entry point: a directory always yields 403, a missing
/// entry 404, and an existing file 200 with its media type.
pub async fn serve(root: &Path, request_path: &str) -> Response<Full<Bytes>> {
    StaticResponder::new(root).respond(request_path, false).await
}

/// Turn a raw request path into a root-relative filesystem path
///
/// The query is dropped, percent escapes are decoded, and `.`/`..` segments
/// are applied lexically. `..` at the root stays at the root, so the result
/// can never climb above it. Returns `None` for paths that cannot name a
/// file (bad escapes, NUL bytes, backslashes).
pub fn resolve_request_path(request_path: &str) -> Option<PathBuf> {
    decode_request_path(request_path).map(|decoded| normalize_segments(&decoded))
}

/// Drop the query and decode percent escapes, rejecting NUL and backslash
fn decode_request_path(request_path: &str) -> Option<Cow<'_, str>> {
    let raw = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or(request_path);
    let decoded = urlencoding::decode(raw).ok()?;
    if decoded.contains('\0') || decoded.contains('\\') {
        return None;
    }
    Some(decoded)
}

/// Apply `.` and `..` lexically, clamped at the root
fn normalize_segments(decoded: &str) -> PathBuf {
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name => segments.push(name),
        }
    }

    segments.iter().collect()
}

/// A trailing slash, encoded or not, asks for a directory; a file never answers it
fn names_directory(decoded: &str) -> bool {
    decoded.len() > 1 && decoded.ends_with('/')
}
