//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_yaml::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Errors from a front-matter block that was recognised but is malformed
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,

    /// Every key other than `title` and `date`
    pub extra: HashMap<String, Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// Without front-matter the content is returned untouched, so leading
    /// indentation still reaches the Markdown renderer.
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}');
        let head = content.trim_start();

        let parsed = if head.starts_with("---") {
            Self::parse_yaml(head)?
        } else if head.starts_with("+++") {
            Self::parse_toml(head)?
        } else if head.starts_with(";;;") {
            Self::parse_json(head)?
        } else {
            None
        };

        Ok(parsed.unwrap_or_else(|| (FrontMatter::default(), content)))
    }

    fn parse_yaml(content: &str) -> Result<Option<(Self, &str)>, FrontMatterError> {
        // No closing ---, treat as no front-matter
        let Some((yaml_content, remaining)) = split_block(content, "---") else {
            return Ok(None);
        };

        if yaml_content.trim().is_empty() {
            return Ok(Some((FrontMatter::default(), remaining)));
        }

        // A leading --- may just be a Markdown thematic break; only treat the
        // block as front-matter when it has at least one `key: value` line.
        if !has_yaml_structure(yaml_content) {
            return Ok(None);
        }

        let fields: HashMap<String, Value> = serde_yaml::from_str(yaml_content)?;
        Ok(Some((Self::from_fields(fields), remaining)))
    }

    fn parse_toml(content: &str) -> Result<Option<(Self, &str)>, FrontMatterError> {
        let Some((toml_content, remaining)) = split_block(content, "+++") else {
            return Ok(None);
        };

        let table: toml::Table = toml::from_str(toml_content)?;
        let fields = table
            .into_iter()
            .map(|(key, value)| (key, toml_to_yaml(value)))
            .collect();
        Ok(Some((Self::from_fields(fields), remaining)))
    }

    fn parse_json(content: &str) -> Result<Option<(Self, &str)>, FrontMatterError> {
        let Some((json_content, remaining)) = split_block(content, ";;;") else {
            return Ok(None);
        };

        if json_content.trim().is_empty() {
            return Ok(Some((FrontMatter::default(), remaining)));
        }

        let fields: HashMap<String, Value> = serde_json::from_str(json_content)?;
        Ok(Some((Self::from_fields(fields), remaining)))
    }

    fn from_fields(mut fields: HashMap<String, Value>) -> Self {
        let title = take_scalar(&mut fields, "title");
        let date = take_scalar(&mut fields, "date");
        Self {
            title,
            date,
            extra: fields,
        }
    }

    /// Parse the date field into a calendar date
    pub fn parse_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Split `<delim>\n block \n<delim>\n rest` into (block, rest).
/// The opening delimiter must sit alone on its line; the block may be empty.
fn split_block<'a>(content: &'a str, delim: &str) -> Option<(&'a str, &'a str)> {
    let rest = content.strip_prefix(delim)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let (block, remaining) = if let Some(after) = rest.strip_prefix(delim) {
        ("", after)
    } else {
        let closing = format!("\n{}", delim);
        let end_pos = rest.find(&closing)?;
        (&rest[..end_pos], &rest[end_pos + closing.len()..])
    };

    let remaining = remaining.trim_start_matches(['\n', '\r']);
    Some((block, remaining))
}

fn has_yaml_structure(yaml_content: &str) -> bool {
    yaml_content.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// Remove `key` and return it as a string if it is a scalar.
/// Non-scalar values stay in the map untouched.
fn take_scalar(fields: &mut HashMap<String, Value>, key: &str) -> Option<String> {
    let text = match fields.get(key)? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => {
            fields.remove(key);
            return None;
        }
        _ => return None,
    };
    fields.remove(key);
    Some(text)
}

fn toml_to_yaml(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => Value::Number(f.into()),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Sequence(items.into_iter().map(toml_to_yaml).collect()),
        toml::Value::Table(table) => {
            let mut mapping = serde_yaml::Mapping::new();
            for (key, value) in table {
                mapping.insert(Value::String(key), toml_to_yaml(value));
            }
            Value::Mapping(mapping)
        }
    }
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // RFC 3339 / ISO 8601 with offset; keep the date as written
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    None
}
