use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use feed_logging::LogDestination;
use log::LevelFilter;
use sitefeed_engine::{FetchSettings, DEFAULT_CONCURRENCY};

/// Build RSS feeds for sites that do not publish one.
#[derive(Parser, Debug)]
#[command(name = "sitefeed", version, about)]
pub struct Args {
    /// Directory holding one YAML config per site
    #[arg(long, value_name = "DIR", default_value = "feeds")]
    pub feeds_dir: PathBuf,

    /// Directory the feed files are written to
    #[arg(long, value_name = "DIR", default_value = "docs")]
    pub output_dir: PathBuf,

    /// Sites fetched at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout
    #[arg(long, value_name = "SECS", default_value_t = 20)]
    pub timeout_secs: u64,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Also write the log to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::Both(path.clone()),
            None => LogDestination::Terminal,
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_secs(self.timeout_secs.max(1)),
            ..FetchSettings::default()
        }
    }
}
