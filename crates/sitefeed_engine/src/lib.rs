//! Sitefeed engine: config loading, fetching, and feed persistence around the core.
mod decode;
mod fetch;
mod filename;
mod loader;
mod persist;
mod runner;
mod types;
mod writer;

pub use decode::{decode_html, DecodedHtml};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use filename::{feed_filename, slug, MAX_SLUG_CHARS};
pub use loader::{
    load_site_configs, load_site_file, parse_site_config, LoadError, LoadedSite, SiteLoadError,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use runner::{FeedRunner, DEFAULT_CONCURRENCY};
pub use types::{
    FailureKind, FetchError, FetchOutput, RunSummary, SiteFailure, SiteReport, SiteStatus,
};
pub use writer::{render_rss, to_channel, FeedWriter, RssFileWriter, WriteError};
