use chrono::{DateTime, Utc};

use crate::config::ConfigError;
use crate::extract::ExtractedEntry;

/// Separator between an entry's title and its subtitle (an en dash).
pub const SUBTITLE_SEPARATOR: &str = " \u{2013} ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMetadata {
    pub site_name: String,
    pub site_url: String,
    pub description: String,
    pub language: String,
}

/// A display-ready feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub description: String,
    pub picture: String,
    pub published: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub metadata: FeedMetadata,
    pub entries: Vec<FeedEntry>,
}

impl Feed {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build a feed from finalized entries, stamping each with `published`.
pub fn assemble(
    metadata: FeedMetadata,
    entries: Vec<ExtractedEntry>,
    published: DateTime<Utc>,
) -> Result<Feed, ConfigError> {
    if metadata.site_name.trim().is_empty() {
        return Err(ConfigError::MissingMetadata { field: "site_name" });
    }
    if metadata.site_url.trim().is_empty() {
        return Err(ConfigError::MissingMetadata { field: "site_url" });
    }

    let entries = entries
        .into_iter()
        .map(|entry| FeedEntry {
            title: compose_title(&entry),
            description: compose_description(&entry),
            link: entry.link,
            picture: entry.picture,
            published,
        })
        .collect();

    Ok(Feed { metadata, entries })
}

pub fn compose_title(entry: &ExtractedEntry) -> String {
    if entry.subtitle.is_empty() {
        entry.title.clone()
    } else {
        format!("{}{}{}", entry.title, SUBTITLE_SEPARATOR, entry.subtitle)
    }
}

pub fn compose_description(entry: &ExtractedEntry) -> String {
    if entry.picture.is_empty() {
        entry.description.clone()
    } else {
        format!(
            r#"<img src="{}" alt="image" /><br/>{}"#,
            html_escape::encode_double_quoted_attribute(&entry.picture),
            entry.description
        )
    }
}
