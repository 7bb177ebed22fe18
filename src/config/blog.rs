//! Blog configuration (_config.yml)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Main loader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Posts root, relative to the base directory
    pub posts_dir: String,
    /// File extensions treated as Markdown (without the dot)
    pub extensions: Vec<String>,
    /// Fall back to a literal file name prefix match when no slug matches
    pub loose_match: bool,
    pub excerpt_separator: String,

    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_dir: "content/posts".to_string(),
            extensions: vec!["md".to_string()],
            loose_match: false,
            excerpt_separator: "<!-- more -->".to_string(),
            markdown: MarkdownConfig::default(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: BlogConfig = serde_yaml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if config.extensions.is_empty() {
            return Err(Error::Config {
                path: path.to_path_buf(),
                message: "extensions must not be empty".to_string(),
            });
        }

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Check whether a file name carries one of the Markdown extensions
    pub fn is_markdown(&self, file_name: &str) -> bool {
        self.strip_extension(file_name).is_some()
    }

    /// Strip a Markdown extension from a file name, if it has one
    pub fn strip_extension<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        self.extensions.iter().find_map(|ext| {
            file_name
                .strip_suffix(ext.as_str())
                .and_then(|rest| rest.strip_suffix('.'))
        })
    }
}

/// Markdown extensions passed to the renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            tasklists: true,
        }
    }
}

/// Syntax highlighting for fenced code blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
