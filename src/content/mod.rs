//! Content module - discovers, resolves and parses posts

mod discover;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
pub mod slug;

pub use discover::discover_files;
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostOutcome};
