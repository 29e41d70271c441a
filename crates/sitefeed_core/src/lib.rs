//! Sitefeed core: pure extraction of feed entries from site markup.
//!
//! Nothing here performs I/O; the engine crate fetches documents and writes
//! the resulting [`Feed`] values.
mod assemble;
mod config;
mod extract;
mod finalize;
mod scrape;
mod select;
mod url_norm;

pub use assemble::{
    assemble, compose_description, compose_title, Feed, FeedEntry, FeedMetadata,
    SUBTITLE_SEPARATOR,
};
pub use config::{ConfigError, FieldMap, ItemOrder, SiteConfig, DEFAULT_LANGUAGE};
pub use extract::{
    extract, first_srcset_url, pick_image_source, ElementStrategy, ExtractedEntry, Field,
    FieldError, FieldExtractor, LINK_STRATEGIES, PICTURE_ATTRIBUTES, PICTURE_STRATEGIES,
};
pub use finalize::{finalize, finalize_with_order};
pub use scrape::{scrape_document, scrape_html, SiteError};
pub use select::{
    compile_selector, first_descendant, normalized_text, select_items, SelectorError,
};
pub use url_norm::{normalize, resolve};
