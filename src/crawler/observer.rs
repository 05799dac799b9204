//! Crawl lifecycle observers
//!
//! Workers report lifecycle events to a `CrawlObserver`. Observers are purely
//! informational: nothing they do affects what gets crawled or recorded.

use crate::crawler::fetcher::FetchError;
use crate::crawler::worker::WorkerReport;
use crate::seed::Seed;

/// Receives lifecycle events from crawl workers
///
/// All methods have empty default implementations; implement only the
/// events you care about. Observers are shared by every worker, so they are
/// called concurrently from many tasks.
pub trait CrawlObserver: Send + Sync {
    /// Called once when a worker starts on its seed
    fn on_seed_started(&self, _seed: &Seed) {}

    /// Called before each page fetch
    fn on_page_visited(&self, _seed: &Seed, _url: &str) {}

    /// Called when a page could not be fetched
    fn on_page_failed(&self, _seed: &Seed, _url: &str, _error: &FetchError) {}

    /// Called once when a worker returns
    fn on_seed_finished(&self, _report: &WorkerReport) {}
}

/// Observer that logs every event through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl CrawlObserver for TracingObserver {
    fn on_seed_started(&self, seed: &Seed) {
        tracing::info!("[+] TARGET: {} (source '{}')", seed.url, seed.label);
    }

    fn on_page_visited(&self, seed: &Seed, url: &str) {
        tracing::info!("Visiting: {} [{}]", url, seed.label);
    }

    fn on_page_failed(&self, seed: &Seed, url: &str, error: &FetchError) {
        tracing::debug!("Page {} failed for seed {}: {}", url, seed.label, error);
    }

    fn on_seed_finished(&self, report: &WorkerReport) {
        if report.completed {
            tracing::info!(
                "Seed {} finished: {} pages visited, {} failed, {} links emitted",
                report.seed.url,
                report.pages_visited,
                report.pages_failed,
                report.links_emitted
            );
        } else {
            tracing::warn!(
                "Seed {} stopped early after {} links: result sink closed",
                report.seed.url,
                report.links_emitted
            );
        }
    }
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CrawlObserver for NoopObserver {}
