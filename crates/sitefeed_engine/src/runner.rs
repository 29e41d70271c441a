use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use feed_logging::{feed_debug, feed_error, feed_info, feed_warn};
use futures_util::{stream, StreamExt};
use sitefeed_core::{scrape_html, SiteConfig};

use crate::decode::decode_html;
use crate::fetch::Fetcher;
use crate::filename::feed_filename;
use crate::loader::LoadedSite;
use crate::types::{RunSummary, SiteFailure, SiteReport, SiteStatus};
use crate::writer::FeedWriter;

pub const DEFAULT_CONCURRENCY: usize = 4;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Runs every site through fetch, decode, scrape and write.
///
/// Sites are independent: each owns its document for the length of its own
/// pipeline and a failure only skips that site. Sites that would write the
/// same feed file run one after another in input order, so the last one wins.
#[derive(Clone)]
pub struct FeedRunner {
    fetcher: Arc<dyn Fetcher>,
    writer: Arc<dyn FeedWriter>,
    concurrency: usize,
    clock: Clock,
}

impl FeedRunner {
    pub fn new(fetcher: Arc<dyn Fetcher>, writer: Arc<dyn FeedWriter>) -> Self {
        Self {
            fetcher,
            writer,
            concurrency: DEFAULT_CONCURRENCY,
            clock: Arc::new(Utc::now),
        }
    }

    /// Number of sites processed at once; zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Source of the publication timestamp stamped on entries.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub async fn run(&self, sites: Vec<LoadedSite>) -> RunSummary {
        let mut reports: Vec<(usize, SiteReport)> = stream::iter(group_by_feed_file(sites))
            .map(|group| self.process_group(group))
            .buffer_unordered(self.concurrency)
            .collect::<Vec<Vec<(usize, SiteReport)>>>()
            .await
            .into_iter()
            .flatten()
            .collect();
        reports.sort_by_key(|(index, _)| *index);

        let summary = RunSummary {
            reports: reports.into_iter().map(|(_, report)| report).collect(),
        };
        feed_info!(
            "run finished: {} feed(s) written, {} site(s) skipped",
            summary.written(),
            summary.skipped()
        );
        summary
    }

    async fn process_group(&self, group: Vec<(usize, LoadedSite)>) -> Vec<(usize, SiteReport)> {
        let mut reports = Vec::with_capacity(group.len());
        for (index, site) in group {
            reports.push((index, self.process(site).await));
        }
        reports
    }

    pub async fn process(&self, site: LoadedSite) -> SiteReport {
        let LoadedSite {
            label,
            site_name,
            config,
        } = site;

        let outcome = match config {
            Ok(config) => self.process_config(&config).await,
            Err(err) => Err(SiteFailure::Config(err)),
        };

        let status = match outcome {
            Ok((path, items)) => {
                feed_info!("[{}] wrote {:?} ({} items)", site_name, path, items);
                SiteStatus::Written { path, items }
            }
            Err(failure) => {
                match &failure {
                    SiteFailure::Write(err) => {
                        feed_error!("[{}] write failed: {}", site_name, err)
                    }
                    other => feed_warn!("[{}] skipped ({}): {}", site_name, label, other),
                }
                SiteStatus::Skipped(failure)
            }
        };

        SiteReport {
            label,
            site_name,
            status,
        }
    }

    async fn process_config(&self, config: &SiteConfig) -> Result<(PathBuf, usize), SiteFailure> {
        let output = self.fetcher.fetch(&config.url).await?;
        if output.final_url != config.url {
            feed_debug!("[{}] redirected to {}", config.site_name, output.final_url);
        }
        let decoded = decode_html(&output.bytes, output.content_type.as_deref());
        if decoded.had_errors {
            feed_warn!(
                "[{}] page was not valid {}; bad bytes replaced",
                config.site_name,
                decoded.encoding_label
            );
        }

        let feed = scrape_html(&decoded.html, config, (self.clock)())?;
        let items = feed.len();
        let path = self.writer.write(&feed)?;
        Ok((path, items))
    }
}

/// Split sites into groups that can run concurrently, keeping input indices.
/// Valid configs that map to the same feed file share a group.
fn group_by_feed_file(sites: Vec<LoadedSite>) -> Vec<Vec<(usize, LoadedSite)>> {
    let mut groups: Vec<Vec<(usize, LoadedSite)>> = Vec::new();
    let mut by_file: HashMap<String, usize> = HashMap::new();

    for (index, site) in sites.into_iter().enumerate() {
        let Some(filename) = site.config.as_ref().ok().map(|c| feed_filename(&c.site_name)) else {
            groups.push(vec![(index, site)]);
            continue;
        };
        match by_file.get(&filename) {
            Some(&group) => {
                feed_warn!(
                    "[{}] {} writes {} like an earlier config; the later one wins",
                    site.site_name,
                    site.label,
                    filename
                );
                groups[group].push((index, site));
            }
            None => {
                by_file.insert(filename, groups.len());
                groups.push(vec![(index, site)]);
            }
        }
    }
    groups
}
