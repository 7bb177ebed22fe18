//! Post loader - finds, resolves and parses posts under the posts root

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::discover::discover_files;
use super::frontmatter::parse_date_string;
use super::slug::{derive_slug, title_from_slug};
use super::{FrontMatter, MarkdownRenderer, Post, PostOutcome};
use crate::error::{Error, Result};
use crate::Blog;

/// Loads posts from the posts directory
pub struct PostLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

impl<'a> PostLoader<'a> {
    /// Create a new post loader
    pub fn new(blog: &'a Blog) -> Self {
        let renderer = MarkdownRenderer::from_config(&blog.config);
        Self { blog, renderer }
    }

    /// Post files relative to the posts root, in discovery order
    pub fn discover_files(&self) -> Vec<PathBuf> {
        discover_files(&self.blog.config, &self.blog.posts_dir)
    }

    /// Slugs of every discovered post, in discovery order
    pub fn list_slugs(&self) -> Vec<String> {
        self.discover_files()
            .iter()
            .map(|path| derive_slug(&self.blog.config, path))
            .collect()
    }

    /// Load one post by slug
    pub fn get_post(&self, slug: &str) -> Result<Post> {
        let path = self.resolve_slug_to_path(slug)?;
        self.parse_post(&path, slug)
    }

    /// Load every discovered post, keeping failures alongside successes
    pub fn load_all(&self) -> Vec<PostOutcome> {
        let root = &self.blog.posts_dir;
        self.discover_files()
            .into_iter()
            .map(|relative| {
                let slug = derive_slug(&self.blog.config, &relative);
                let result = self.parse_post(&root.join(&relative), &slug);
                PostOutcome { slug, result }
            })
            .collect()
    }

    /// Load every post that parses; failures are logged and skipped
    pub fn list_posts(&self) -> Vec<Post> {
        let outcomes = self.load_all();
        let total = outcomes.len();

        let posts: Vec<Post> = outcomes
            .into_iter()
            .filter_map(|outcome| match outcome.result {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!("Skipping post {:?}: {}", outcome.slug, e);
                    None
                }
            })
            .collect();

        tracing::debug!("Loaded {} of {} posts", posts.len(), total);
        posts
    }

    /// Find the file backing a slug
    pub fn resolve_slug_to_path(&self, slug: &str) -> Result<PathBuf> {
        let root = &self.blog.posts_dir;
        let config = &self.blog.config;

        // Direct hit: <root>/<slug>.<ext>
        if is_plain_file_name(slug) {
            for ext in &config.extensions {
                let candidate = root.join(format!("{}.{}", slug, ext));
                if candidate.is_file() {
                    tracing::debug!("Resolved {:?} directly to {:?}", slug, candidate);
                    return Ok(candidate);
                }
            }
        }

        let files = self.discover_files();

        if let Some(found) = files.iter().find(|path| derive_slug(config, path) == slug) {
            tracing::debug!("Resolved {:?} by slug to {:?}", slug, found);
            return Ok(root.join(found));
        }

        if config.loose_match && !slug.is_empty() {
            let prefixed = files.iter().find(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().starts_with(slug))
                    .unwrap_or(false)
            });
            if let Some(found) = prefixed {
                tracing::debug!("Resolved {:?} by file name prefix to {:?}", slug, found);
                return Ok(root.join(found));
            }
        }

        Err(Error::NotFound {
            slug: slug.to_string(),
        })
    }

    /// Read and parse a post file
    pub fn parse_post(&self, path: &Path, slug: &str) -> Result<Post> {
        let content = fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let date = match fm.date {
            Some(raw) => parse_date_string(&raw)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or(raw),
            None => creation_date(path),
        };

        let title = fm.title.unwrap_or_else(|| title_from_slug(slug));

        let excerpt = MarkdownRenderer::split_excerpt(body, &self.blog.config.excerpt_separator)
            .map(|e| self.renderer.render(e));

        let source = path
            .strip_prefix(&self.blog.posts_dir)
            .unwrap_or(path)
            .to_path_buf();

        Ok(Post {
            slug: slug.to_string(),
            title,
            date,
            body: self.renderer.render(body),
            excerpt,
            raw: body.to_string(),
            source,
            extra: fm.extra,
        })
    }
}

/// File creation date as `YYYY-MM-DD`, today when the platform has no birth time
fn creation_date(path: &Path) -> String {
    fs::metadata(path)
        .and_then(|m| m.created())
        .map(DateTime::<Local>::from)
        .unwrap_or_else(|_| Local::now())
        .format("%Y-%m-%d")
        .to_string()
}

/// A single normal path component, so the direct lookup stays inside the root
fn is_plain_file_name(slug: &str) -> bool {
    let mut components = Path::new(slug).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlogConfig;
    use tempfile::TempDir;

    fn setup(config: BlogConfig) -> (TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        let blog = Blog::with_config(dir.path(), config);
        fs::create_dir_all(&blog.posts_dir).unwrap();
        (dir, blog)
    }

    fn write(blog: &Blog, rel: &str, content: &str) -> PathBuf {
        let path = blog.posts_dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_get_post_with_frontmatter() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(
            &blog,
            "hello.md",
            "---\ntitle: Hello There\ndate: 2024-01-15 10:30:00\ntags: [a]\n---\n# Heading\n",
        );

        let post = blog.loader().get_post("hello").unwrap();
        assert_eq!(post.slug, "hello");
        assert_eq!(post.title, "Hello There");
        assert_eq!(post.date, "2024-01-15");
        assert!(post.body.contains("<h1>Heading</h1>"));
        assert_eq!(post.raw, "# Heading\n");
        assert_eq!(post.source, PathBuf::from("hello.md"));
        assert!(post.extra.contains_key("tags"));
        assert_eq!(post.excerpt, None);
    }

    #[test]
    fn test_unparseable_date_is_kept_verbatim() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(&blog, "odd.md", "---\ndate: sometime in spring\n---\nbody");

        let post = blog.loader().get_post("odd").unwrap();
        assert_eq!(post.date, "sometime in spring");
    }

    #[test]
    fn test_missing_title_comes_from_slug() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(&blog, "my-first-post.md", "---\ndate: 2024-02-01\n---\nbody");

        let post = blog.loader().get_post("my-first-post").unwrap();
        assert_eq!(post.title, "My First Post");
    }

    #[test]
    fn test_missing_date_uses_creation_date() {
        let (_dir, blog) = setup(BlogConfig::default());
        let path = write(&blog, "undated.md", "No front-matter at all.\n");

        let expected = fs::metadata(&path)
            .and_then(|m| m.created())
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now())
            .format("%Y-%m-%d")
            .to_string();

        let post = blog.loader().get_post("undated").unwrap();
        assert_eq!(post.date, expected);
        assert_eq!(post.title, "Undated");
    }

    #[test]
    fn test_missing_slug_is_not_found() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(&blog, "present.md", "body");

        let err = blog.loader().get_post("missing-slug").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("missing-slug"));
    }

    #[test]
    fn test_every_listed_slug_resolves_to_its_file() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(&blog, "plain.md", "a");
        write(&blog, "Exported Note 0123456789abcdef0123456789abcdef.md", "b");
        write(&blog, "2023/nested-post.md", "c");
        write(&blog, "日本語 0123456789abcdef0123456789abcd.md", "d");

        let loader = blog.loader();
        let files = loader.discover_files();
        let slugs = loader.list_slugs();
        assert_eq!(slugs.len(), 4);

        for (slug, file) in slugs.iter().zip(&files) {
            let resolved = loader.resolve_slug_to_path(slug).unwrap();
            assert_eq!(resolved, blog.posts_dir.join(file), "slug {:?}", slug);
        }
        assert!(slugs.contains(&"Exported Note".to_string()));
        assert!(slugs.contains(&"日本語".to_string()));
    }

    #[test]
    fn test_direct_path_wins_over_nested_duplicate() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(&blog, "dup.md", "---\ntitle: Top\n---\n");
        write(&blog, "sub/dup.md", "---\ntitle: Nested\n---\n");

        // Discovery visits `sub` before `dup.md`
        assert_eq!(blog.loader().list_slugs(), vec!["dup", "dup"]);
        assert_eq!(blog.loader().get_post("dup").unwrap().title, "Top");
    }

    #[test]
    fn test_slug_cannot_escape_posts_root() {
        let (dir, blog) = setup(BlogConfig::default());
        fs::write(dir.path().join("content/secret.md"), "hidden").unwrap();

        let err = blog.loader().get_post("../secret").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_loose_match_is_opt_in() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(&blog, "café-notes.md", "body");
        assert!(blog.loader().get_post("café").unwrap_err().is_not_found());

        let config = BlogConfig {
            loose_match: true,
            ..Default::default()
        };
        let blog = Blog::with_config(&blog.base_dir, config);
        let post = blog.loader().get_post("café").unwrap();
        assert_eq!(post.source, PathBuf::from("café-notes.md"));
        assert_eq!(post.slug, "café");
    }

    #[test]
    fn test_list_posts_skips_corrupt_file() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(&blog, "one.md", "---\ntitle: One\n---\nfirst");
        write(&blog, "two.md", "---\ntitle: [unclosed\n---\nsecond");
        write(&blog, "three.md", "---\ntitle: Three\n---\nthird");

        let loader = blog.loader();
        let posts = loader.list_posts();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Three", "One"]);

        let outcomes = loader.load_all();
        assert_eq!(outcomes.len(), 3);
        let failed: Vec<_> = outcomes.iter().filter(|o| !o.is_ok()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].slug, "two");
        assert!(matches!(failed[0].result, Err(Error::Parse { .. })));
    }

    #[test]
    fn test_unreadable_file_is_file_read_error() {
        let (_dir, blog) = setup(BlogConfig::default());
        let path = blog.posts_dir.join("binary.md");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = blog.loader().get_post("binary").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
        assert!(blog.loader().list_posts().is_empty());
    }

    #[test]
    fn test_excerpt_is_rendered() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(&blog, "long.md", "Intro *text*.\n\n<!-- more -->\n\nRest.\n");

        let post = blog.loader().get_post("long").unwrap();
        assert_eq!(post.excerpt.as_deref(), Some("<p>Intro <em>text</em>.</p>\n"));
        assert!(post.body.contains("<p>Rest.</p>"));
    }

    #[test]
    fn test_empty_frontmatter_stays_out_of_body() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(&blog, "empty-fm.md", "---\n---\nHello body\n");

        let post = blog.loader().get_post("empty-fm").unwrap();
        assert_eq!(post.raw, "Hello body\n");
        assert_eq!(post.body, "<p>Hello body</p>\n");
        assert_eq!(post.title, "Empty Fm");
    }

    #[test]
    fn test_leading_indented_code_is_preserved() {
        let (_dir, blog) = setup(BlogConfig::default());
        write(&blog, "snippet.md", "    cargo run\n");

        let post = blog.loader().get_post("snippet").unwrap();
        assert_eq!(post.body, "<pre><code>cargo run\n</code></pre>\n");
    }

    #[test]
    fn test_plain_file_name() {
        assert!(is_plain_file_name("hello"));
        assert!(is_plain_file_name("with space"));
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("a/b"));
        assert!(!is_plain_file_name("/etc/passwd"));
    }
}
