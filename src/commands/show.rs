//! Show a single post

use anyhow::{Context, Result};

use crate::Blog;

/// Print one post's rendered body, or the whole record as JSON
pub fn run(blog: &Blog, slug: &str, json: bool) -> Result<()> {
    let post = blog
        .get_post(slug)
        .with_context(|| format!("Failed to load {:?}", slug))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
    } else {
        println!("{} ({})", post.title, post.date);
        println!();
        print!("{}", post.body);
    }

    Ok(())
}
