//! Error type for filesystem handles.

use std::io;

/// Errors raised while listing, globbing, or reading template files.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// The glob pattern could not be parsed.
    #[error("bad glob pattern `{pattern}`: {message}")]
    BadPattern { pattern: String, message: String },

    /// No file exists at the requested path.
    #[error("file not found: {path}")]
    NotFound { path: String },

    /// The path is absolute or escapes the root.
    #[error("invalid path `{path}`: must be relative and must not contain `..`")]
    InvalidPath { path: String },

    /// The root directory of a [`DirFs`](crate::DirFs) does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: String },

    /// Underlying I/O failure.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}
