//! Slug derivation from post file names

use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use crate::config::BlogConfig;

lazy_static! {
    /// Hex id appended to file names by note exporters, e.g. `Title 0123...abcd`
    static ref HASH_SUFFIX: Regex = Regex::new(r"(?i)\s+[0-9a-f]{28,36}$").unwrap();
}

/// Derive the canonical slug for a post file.
///
/// Only the file name takes part: the extension is removed, then any
/// trailing export hash, then surrounding whitespace.
pub fn derive_slug(config: &BlogConfig, path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = config.strip_extension(&file_name).unwrap_or(&file_name);
    strip_hash_suffix(stem).trim().to_string()
}

/// Remove a trailing whitespace-separated hex hash, if present
pub fn strip_hash_suffix(name: &str) -> &str {
    match HASH_SUFFIX.find(name) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}

/// Build a display title from a slug: `my-first-post` -> `My First Post`
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
