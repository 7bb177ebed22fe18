//! List posts and slugs

use anyhow::Result;

use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str, json: bool) -> Result<()> {
    print!("{}", format_listing(blog, content_type, json)?);
    Ok(())
}

/// Build the listing text for a content type
pub fn format_listing(blog: &Blog, content_type: &str, json: bool) -> Result<String> {
    let mut out = String::new();

    match content_type {
        "post" | "posts" => {
            let posts = blog.get_posts();
            if json {
                out.push_str(&serde_json::to_string_pretty(&posts)?);
                out.push('\n');
            } else {
                out.push_str(&format!("Posts ({}):\n", posts.len()));
                for post in posts {
                    out.push_str(&format!("  {} - {} [{}]\n", post.date, post.title, post.slug));
                }
            }
        }
        "slug" | "slugs" => {
            let slugs = blog.get_slugs();
            if json {
                out.push_str(&serde_json::to_string_pretty(&slugs)?);
                out.push('\n');
            } else {
                for slug in slugs {
                    out.push_str(&slug);
                    out.push('\n');
                }
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, slug", content_type);
        }
    }

    Ok(out)
}
