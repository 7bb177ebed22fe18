//! postloader: load Markdown blog posts from a directory tree
//!
//! Posts are Markdown files with optional front-matter under a posts root
//! (`content/posts` by default). Each file gets a slug derived from its
//! file name, a title and date from front-matter or sensible fallbacks, and
//! an HTML body rendered with pulldown-cmark.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;

use std::path::{Path, PathBuf};

pub use content::{Post, PostOutcome};
pub use error::{Error, Result};

/// A blog rooted at a base directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Loader configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Posts root
    pub posts_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::BlogConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);

        Self {
            config,
            base_dir,
            posts_dir,
        }
    }

    pub fn loader(&self) -> content::PostLoader<'_> {
        content::PostLoader::new(self)
    }

    /// Load a single post by slug
    pub fn get_post(&self, slug: &str) -> Result<Post> {
        self.loader().get_post(slug)
    }

    /// Load every post that parses
    pub fn get_posts(&self) -> Vec<Post> {
        self.loader().list_posts()
    }

    /// Slugs of every post file
    pub fn get_slugs(&self) -> Vec<String> {
        self.loader().list_slugs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_new_without_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.posts_dir, dir.path().join("content/posts"));
        assert!(blog.get_slugs().is_empty());
        assert!(blog.get_posts().is_empty());
    }

    #[test]
    fn test_new_reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "posts_dir: posts\n").unwrap();
        fs::create_dir_all(dir.path().join("posts")).unwrap();
        fs::write(dir.path().join("posts/a-post.md"), "Hi").unwrap();

        let blog = Blog::new(dir.path()).unwrap();
        assert_eq!(blog.get_slugs(), vec!["a-post"]);
        assert_eq!(blog.get_post("a-post").unwrap().title, "A Post");
        assert_eq!(blog.get_posts().len(), 1);
    }

    #[test]
    fn test_new_with_broken_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "posts_dir: [\n").unwrap();
        assert!(matches!(Blog::new(dir.path()), Err(Error::Config { .. })));
    }
}
