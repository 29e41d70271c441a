use std::fmt;
use std::str::FromStr;

use crate::assemble::FeedMetadata;

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("site `{site}` has no url")]
    MissingUrl { site: String },
    #[error("site `{site}` has no item_selector")]
    MissingItemSelector { site: String },
    #[error("feed metadata is missing {field}")]
    MissingMetadata { field: &'static str },
}

/// Selector strings and literal prefixes for the semantic fields of one item.
///
/// Every entry is optional; an absent or blank selector leaves the field empty
/// (link and picture still try their descendant fallbacks).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub picture: Option<String>,
    /// Literal text prepended to the extracted subtitle.
    pub subtitle_is: Option<String>,
    /// Literal text prepended to the extracted description.
    pub description_is: Option<String>,
}

/// Order of finalized entries relative to the order items were selected in.
///
/// Listing pages usually put the newest item first, so the default reverses
/// document order. Sites that list oldest first can opt into `Document`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemOrder {
    #[default]
    Reverse,
    Document,
}

impl ItemOrder {
    pub fn apply<T>(self, items: &mut [T]) {
        match self {
            ItemOrder::Reverse => items.reverse(),
            ItemOrder::Document => {}
        }
    }
}

impl FromStr for ItemOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reverse" | "reversed" => Ok(ItemOrder::Reverse),
            "document" => Ok(ItemOrder::Document),
            other => Err(format!("unknown item order `{other}`")),
        }
    }
}

impl fmt::Display for ItemOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemOrder::Reverse => write!(f, "reverse"),
            ItemOrder::Document => write!(f, "document"),
        }
    }
}

/// One site's realized configuration. Defaults are applied by the loader;
/// the extraction code only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub site_name: String,
    pub url: String,
    pub item_selector: String,
    pub fields: FieldMap,
    pub link_prefix: Option<String>,
    pub description: Option<String>,
    pub language: String,
    pub item_order: ItemOrder,
}

impl SiteConfig {
    /// Builds a config with default optional settings, rejecting a blank
    /// `url` or `item_selector`.
    pub fn new(
        site_name: impl Into<String>,
        url: impl Into<String>,
        item_selector: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let site_name = site_name.into().trim().to_string();
        let url = url.into().trim().to_string();
        let item_selector = item_selector.into().trim().to_string();
        if url.is_empty() {
            return Err(ConfigError::MissingUrl { site: site_name });
        }
        if item_selector.is_empty() {
            return Err(ConfigError::MissingItemSelector { site: site_name });
        }
        Ok(Self {
            site_name,
            url,
            item_selector,
            fields: FieldMap::default(),
            link_prefix: None,
            description: None,
            language: DEFAULT_LANGUAGE.to_string(),
            item_order: ItemOrder::default(),
        })
    }

    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = Some(prefix.into());
        self
    }

    /// The override base for relative URLs, if one is set and non-blank.
    pub fn link_prefix(&self) -> Option<&str> {
        self.link_prefix
            .as_deref()
            .map(str::trim)
            .filter(|prefix| !prefix.is_empty())
    }

    pub fn metadata(&self) -> FeedMetadata {
        FeedMetadata {
            site_name: self.site_name.clone(),
            site_url: self.url.clone(),
            description: self
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| self.site_name.clone()),
            language: self.language.clone(),
        }
    }
}
