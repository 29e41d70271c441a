use chrono::{DateTime, Utc};
use feed_logging::{feed_debug, feed_warn};
use scraper::Html;

use crate::assemble::{assemble, Feed};
use crate::config::{ConfigError, SiteConfig};
use crate::extract::FieldExtractor;
use crate::finalize::finalize_with_order;
use crate::select::{select_items, SelectorError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error("no usable items ({candidates} matched the item selector)")]
    NoEntries { candidates: usize },
}

/// Parse `html` and turn it into the site's feed.
pub fn scrape_html(
    html: &str,
    config: &SiteConfig,
    published: DateTime<Utc>,
) -> Result<Feed, SiteError> {
    let document = Html::parse_document(html);
    scrape_document(&document, config, published)
}

/// Select, extract, finalize and assemble. Performs no I/O.
pub fn scrape_document(
    document: &Html,
    config: &SiteConfig,
    published: DateTime<Utc>,
) -> Result<Feed, SiteError> {
    let site = config.site_name.as_str();
    let nodes = select_items(document, &config.item_selector)?;
    let candidates = nodes.len();
    feed_debug!("[{}] item selector matched {} node(s)", site, candidates);

    let extractor = FieldExtractor::for_site(config);
    for err in extractor.errors() {
        feed_warn!("[{}] {}; field left empty", site, err);
    }

    let mut entries = Vec::with_capacity(candidates);
    for (index, node) in nodes.into_iter().enumerate() {
        let entry = extractor.extract(node);
        if !entry.has_title() {
            feed_debug!("[{}] item {} has no title; dropped", site, index);
        }
        entries.push(entry);
    }

    let entries = finalize_with_order(entries, &config.url, config.item_order);
    if entries.is_empty() {
        return Err(SiteError::NoEntries { candidates });
    }

    Ok(assemble(config.metadata(), entries, published)?)
}
