//! Post model

use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Error;

/// A blog post
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Slug derived from the file name
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date, `YYYY-MM-DD`
    pub date: String,

    /// Rendered HTML content
    pub body: String,

    /// Rendered HTML of the part before the excerpt separator
    pub excerpt: Option<String>,

    /// Raw markdown content, front-matter removed
    pub raw: String,

    /// Source file path, relative to the posts root
    pub source: PathBuf,

    /// Custom front-matter fields
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// Result of loading one discovered post file
#[derive(Debug)]
pub struct PostOutcome {
    pub slug: String,
    pub result: Result<Post, Error>,
}

impl PostOutcome {
    /// The post, if it loaded
    pub fn ok(self) -> Option<Post> {
        self.result.ok()
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}
