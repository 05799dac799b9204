//! Crawler module for seed traversal and result collection
//!
//! This module contains the core crawling logic, including:
//! - Page fetching and link extraction
//! - Per-seed deduplication and traversal
//! - Fan-out of workers and fan-in of their records
//! - Running a complete harvest into the result file

mod barrier;
mod coordinator;
mod dedup;
mod fetcher;
mod observer;
mod parser;
mod worker;

pub use barrier::{Arrival, CompletionBarrier};
pub use coordinator::{Coordinator, CrawlReport, ResultStream, RESULT_CHANNEL_CAPACITY};
pub use dedup::SeedDeduplicator;
pub use fetcher::{build_http_client, FetchError, HttpFetcher, PageFetcher};
pub use observer::{CrawlObserver, NoopObserver, TracingObserver};
pub use parser::extract_links;
pub use worker::{CrawlWorker, WorkerReport};

use crate::config::Config;
use crate::output::{HarvestSummary, ResultSink};
use crate::seed::seeds_from_urls;
use crate::HarvestError;
use std::path::Path;
use std::time::Instant;

/// Runs a complete harvest with the HTTP fetcher
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the seed list (blank and duplicate entries removed)
/// 2. Create the result file and write its header
/// 3. Build the HTTP client
/// 4. Launch one worker per seed
/// 5. Drain every record into the result file
/// 6. Wait for the workers' reports
///
/// With no usable seeds nothing is done and no file is created.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed_urls` - Seed URLs as supplied by the caller
///
/// # Returns
///
/// * `Ok(HarvestSummary)` - Every worker finished and the file is flushed
/// * `Err(HarvestError)` - The result file could not be created or written
pub async fn harvest(config: &Config, seed_urls: &[String]) -> Result<HarvestSummary, HarvestError> {
    if seed_urls.iter().all(|url| url.trim().is_empty()) {
        return Ok(HarvestSummary::empty());
    }

    let fetcher = HttpFetcher::new(&config.user_agent, &config.fetcher)?;
    harvest_with(config, seed_urls, fetcher).await
}

/// Runs a complete harvest with a caller-supplied fetcher
///
/// The result file is opened before any worker starts, so a destination
/// that cannot be created fails the run without crawling anything.
pub async fn harvest_with<F: PageFetcher>(
    config: &Config,
    seed_urls: &[String],
    fetcher: F,
) -> Result<HarvestSummary, HarvestError> {
    let seeds = seeds_from_urls(seed_urls);
    if seeds.is_empty() {
        tracing::info!("No seeds given, nothing to do");
        return Ok(HarvestSummary::empty());
    }

    let started = Instant::now();
    let result_path = Path::new(&config.output.result_path);
    let mut sink = ResultSink::create(result_path)?;
    tracing::info!("Writing results to {}", result_path.display());

    let coordinator = Coordinator::new(fetcher)
        .with_max_concurrent_seeds(config.crawler.max_concurrent_seeds);

    tracing::info!("Starting harvest of {} seeds", seeds.len());
    let (mut receiver, completion) = coordinator.launch(seeds).into_parts();

    let sink_report = match sink.drain(&mut receiver).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Result sink failed: {}", e);
            return Err(e.into());
        }
    };

    let crawl_report = completion.await?;

    Ok(HarvestSummary::new(sink_report, crawl_report, started.elapsed()))
}
