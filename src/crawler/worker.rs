//! Single-seed traversal
//!
//! A `CrawlWorker` owns one seed, one `SeedDeduplicator` and a clone of the
//! shared result sender. It walks an explicit frontier of discovered but not
//! yet fetched links until the frontier is empty.

use crate::crawler::dedup::SeedDeduplicator;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::observer::CrawlObserver;
use crate::seed::{DiscoveredLink, Seed};
use crate::url::has_accepted_scheme;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Statistics from one seed's traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    /// The seed that was traversed
    pub seed: Seed,

    /// Number of page fetches attempted (including failures)
    pub pages_visited: u64,

    /// Number of page fetches that failed
    pub pages_failed: u64,

    /// Number of records sent to the result channel
    pub links_emitted: u64,

    /// Number of links rejected by the scheme filter
    pub links_discarded: u64,

    /// False if the traversal was cut short because the result channel closed
    pub completed: bool,
}

impl WorkerReport {
    fn new(seed: Seed) -> Self {
        Self {
            seed,
            pages_visited: 0,
            pages_failed: 0,
            links_emitted: 0,
            links_discarded: 0,
            completed: true,
        }
    }
}

/// Traverses the link graph reachable from one seed
pub struct CrawlWorker<F: PageFetcher> {
    seed: Seed,
    fetcher: Arc<F>,
    results: mpsc::Sender<DiscoveredLink>,
    observer: Arc<dyn CrawlObserver>,
    dedup: SeedDeduplicator,
}

impl<F: PageFetcher> CrawlWorker<F> {
    /// Creates a worker for `seed` that sends its records on `results`
    pub fn new(
        seed: Seed,
        fetcher: Arc<F>,
        results: mpsc::Sender<DiscoveredLink>,
        observer: Arc<dyn CrawlObserver>,
    ) -> Self {
        Self {
            seed,
            fetcher,
            results,
            observer,
            dedup: SeedDeduplicator::new(),
        }
    }

    /// Runs the traversal to completion
    ///
    /// # Traversal
    ///
    /// 1. Start with the seed URL on the frontier
    /// 2. Pop a URL and fetch it; on failure drop that branch and continue
    /// 3. For each returned target:
    ///    - discard it unless it starts with `http://` or `https://`
    ///    - skip it if this seed already emitted it
    ///    - otherwise send a record (waits for sink capacity) and queue it
    /// 4. Stop when the frontier is empty
    ///
    /// The seed URL itself is fetched once: if it shows up as a target it is
    /// recorded but not queued again.
    ///
    /// The worker's sender is dropped when this returns.
    pub async fn run(mut self) -> WorkerReport {
        let mut report = WorkerReport::new(self.seed.clone());
        self.observer.on_seed_started(&self.seed);

        let mut frontier = VecDeque::from([self.seed.url.clone()]);

        'traversal: while let Some(page_url) = frontier.pop_front() {
            self.observer.on_page_visited(&self.seed, &page_url);
            report.pages_visited += 1;

            let targets = match self.fetcher.fetch(&page_url).await {
                Ok(targets) => targets,
                Err(e) => {
                    self.observer.on_page_failed(&self.seed, &page_url, &e);
                    report.pages_failed += 1;
                    continue;
                }
            };

            for target in targets {
                if !has_accepted_scheme(&target) {
                    report.links_discarded += 1;
                    continue;
                }

                if !self.dedup.should_emit(&target) {
                    continue;
                }

                let record = DiscoveredLink {
                    source: self.seed.label.clone(),
                    target: target.clone(),
                };

                if self.results.send(record).await.is_err() {
                    // Receiver dropped: the sink failed and the run is over
                    report.completed = false;
                    break 'traversal;
                }
                report.links_emitted += 1;

                if target != self.seed.url {
                    frontier.push_back(target);
                }
            }
        }

        self.observer.on_seed_finished(&report);
        report
    }
}
