mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use feed_logging::{feed_info, feed_warn};
use sitefeed_engine::{
    ensure_output_dir, load_site_configs, FeedRunner, ReqwestFetcher, RssFileWriter,
};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    feed_logging::initialize(args.log_destination(), args.log_level);

    let sites = load_site_configs(&args.feeds_dir)?;
    if sites.is_empty() {
        feed_warn!("no site configs found in {:?}", args.feeds_dir);
    }
    ensure_output_dir(&args.output_dir)?;

    feed_info!(
        "building {} feed(s) from {:?} into {:?}",
        sites.len(),
        args.feeds_dir,
        args.output_dir
    );

    let runner = FeedRunner::new(
        Arc::new(ReqwestFetcher::new(args.fetch_settings())?),
        Arc::new(RssFileWriter::new(args.output_dir.clone())),
    )
    .with_concurrency(args.concurrency);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let summary = runtime.block_on(runner.run(sites));

    for report in &summary.reports {
        println!("{report}");
    }
    Ok(())
}
