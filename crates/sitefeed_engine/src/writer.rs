use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rss::{Channel, ChannelBuilder, Enclosure, EnclosureBuilder, Item, ItemBuilder};
use sitefeed_core::{Feed, FeedEntry};

use crate::filename::feed_filename;
use crate::persist::{AtomicFileWriter, PersistError};

const GENERATOR: &str = concat!("sitefeed ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("rss serialization failed: {0}")]
    Serialize(#[from] rss::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Persists one site's feed and reports where it went.
pub trait FeedWriter: Send + Sync {
    fn write(&self, feed: &Feed) -> Result<PathBuf, WriteError>;
}

/// Writes RSS 2.0 files named after the site into one output directory.
#[derive(Debug, Clone)]
pub struct RssFileWriter {
    files: AtomicFileWriter,
}

impl RssFileWriter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            files: AtomicFileWriter::new(output_dir),
        }
    }
}

impl FeedWriter for RssFileWriter {
    fn write(&self, feed: &Feed) -> Result<PathBuf, WriteError> {
        let bytes = render_rss(feed, Utc::now())?;
        let filename = feed_filename(&feed.metadata.site_name);
        Ok(self.files.write(&filename, &bytes)?)
    }
}

/// Serialize `feed` as an RSS 2.0 document.
pub fn render_rss(feed: &Feed, build_date: DateTime<Utc>) -> Result<Vec<u8>, WriteError> {
    Ok(to_channel(feed, build_date).write_to(Vec::new())?)
}

pub fn to_channel(feed: &Feed, build_date: DateTime<Utc>) -> Channel {
    let meta = &feed.metadata;
    ChannelBuilder::default()
        .title(meta.site_name.clone())
        .link(meta.site_url.clone())
        .description(meta.description.clone())
        .language(Some(meta.language.clone()))
        .last_build_date(Some(build_date.to_rfc2822()))
        .generator(Some(GENERATOR.to_string()))
        .items(feed.entries.iter().map(to_item).collect::<Vec<_>>())
        .build()
}

fn to_item(entry: &FeedEntry) -> Item {
    ItemBuilder::default()
        .title(Some(entry.title.clone()))
        .link(Some(entry.link.clone()))
        .description(Some(entry.description.clone()))
        .pub_date(Some(entry.published.to_rfc2822()))
        .enclosure(picture_enclosure(&entry.picture))
        .build()
}

/// The entry's picture as an enclosure. The size is unknown without fetching
/// the image, so `length` is 0.
fn picture_enclosure(picture: &str) -> Option<Enclosure> {
    if picture.is_empty() {
        return None;
    }
    Some(
        EnclosureBuilder::default()
            .url(picture.to_string())
            .length("0".to_string())
            .mime_type(image_mime_type(picture).to_string())
            .build(),
    )
}

fn image_mime_type(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "image/jpeg",
    }
}
