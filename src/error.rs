//! Error types for loading posts

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while locating, reading or parsing posts
#[derive(Error, Debug)]
pub enum Error {
    /// A directory under the posts root could not be listed.
    /// Discovery logs these and carries on; they are never returned from it.
    #[error("Failed to read directory {path:?}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Post not found: {slug}")]
    NotFound { slug: String },

    #[error("Failed to read {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse front-matter in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid config {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Whether this error means the slug matched nothing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
