//! Crawl coordinator - fan-out/fan-in orchestration
//!
//! This module launches one `CrawlWorker` per seed, feeds all of them into a
//! single result channel, and closes that channel exactly once:
//! - Workers only ever send; each holds a clone of the sender
//! - A supervising task holds the original sender and drops it only after
//!   the completion barrier reports that every worker has returned
//! - An optional semaphore caps how many seeds are traversed at once

use crate::crawler::barrier::CompletionBarrier;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::observer::{CrawlObserver, TracingObserver};
use crate::crawler::worker::{CrawlWorker, WorkerReport};
use crate::seed::{DiscoveredLink, Seed};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::{JoinHandle, JoinSet};

/// Capacity of the shared result channel
///
/// tokio channels cannot be zero-sized, so one slot is the closest to a
/// rendezvous: a worker can run at most one record ahead of the sink.
pub const RESULT_CHANNEL_CAPACITY: usize = 1;

/// Outcome of a whole crawl, available once every worker has returned
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// One report per worker that returned normally, in completion order
    pub workers: Vec<WorkerReport>,

    /// Number of worker tasks that panicked
    pub panicked: usize,
}

impl CrawlReport {
    /// Total records sent by all workers
    pub fn links_emitted(&self) -> u64 {
        self.workers.iter().map(|w| w.links_emitted).sum()
    }

    /// Total page fetches attempted by all workers
    pub fn pages_visited(&self) -> u64 {
        self.workers.iter().map(|w| w.pages_visited).sum()
    }

    /// Total page fetches that failed
    pub fn pages_failed(&self) -> u64 {
        self.workers.iter().map(|w| w.pages_failed).sum()
    }
}

/// The receiving side of a launched crawl
///
/// Records arrive in the order workers send them. `recv` returns `None`
/// once every worker has finished and the channel has drained.
pub struct ResultStream {
    receiver: mpsc::Receiver<DiscoveredLink>,
    completion: JoinHandle<CrawlReport>,
}

impl ResultStream {
    /// Receives the next record, or `None` at end of stream
    pub async fn recv(&mut self) -> Option<DiscoveredLink> {
        self.receiver.recv().await
    }

    /// Splits the stream into its channel and the report handle
    pub fn into_parts(self) -> (mpsc::Receiver<DiscoveredLink>, JoinHandle<CrawlReport>) {
        (self.receiver, self.completion)
    }

    /// Drains every record into memory and waits for the report
    pub async fn collect(mut self) -> Result<(Vec<DiscoveredLink>, CrawlReport), tokio::task::JoinError> {
        let mut records = Vec::new();
        while let Some(record) = self.receiver.recv().await {
            records.push(record);
        }
        let report = self.completion.await?;
        Ok((records, report))
    }
}

/// Launches and supervises the workers of one crawl
pub struct Coordinator<F: PageFetcher> {
    fetcher: Arc<F>,
    observer: Arc<dyn CrawlObserver>,
    max_concurrent_seeds: Option<usize>,
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator that logs through `TracingObserver` and runs
    /// one worker per seed concurrently
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            observer: Arc::new(TracingObserver),
            max_concurrent_seeds: None,
        }
    }

    /// Replaces the lifecycle observer
    pub fn with_observer(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Caps the number of seeds traversed at the same time
    ///
    /// `None` (the default) runs every seed at once. Seeds beyond the cap
    /// wait for a running worker to finish. A cap of zero is treated as one.
    pub fn with_max_concurrent_seeds(mut self, max: Option<usize>) -> Self {
        self.max_concurrent_seeds = max.map(|n| n.max(1));
        self
    }

    /// Starts one worker per seed and returns the shared result stream
    ///
    /// Must be called from within a tokio runtime. The stream ends after the
    /// last worker's final record has been received; an empty seed list
    /// produces an empty stream.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use link_harvester::config::{FetcherConfig, UserAgentConfig};
    /// use link_harvester::crawler::{Coordinator, HttpFetcher};
    /// use link_harvester::seed::Seed;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let fetcher = HttpFetcher::new(&UserAgentConfig::default(), &FetcherConfig::default())?;
    /// let mut stream = Coordinator::new(fetcher).launch(vec![Seed::new("https://example.com")]);
    /// while let Some(link) = stream.recv().await {
    ///     println!("{} -> {}", link.source, link.target);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn launch(&self, seeds: Vec<Seed>) -> ResultStream {
        let (sender, receiver) = mpsc::channel(RESULT_CHANNEL_CAPACITY);

        let fetcher = self.fetcher.clone();
        let observer = self.observer.clone();
        let limiter = self.max_concurrent_seeds.map(|n| Arc::new(Semaphore::new(n)));

        let completion = tokio::spawn(async move {
            let barrier = CompletionBarrier::new(seeds.len());
            let mut workers = JoinSet::new();

            tracing::debug!(
                "Launching {} workers (concurrency cap: {:?})",
                seeds.len(),
                limiter.as_ref().map(|l| l.available_permits())
            );

            for seed in seeds {
                let worker = CrawlWorker::new(seed, fetcher.clone(), sender.clone(), observer.clone());
                let arrival = barrier.arrival();
                let limiter = limiter.clone();

                workers.spawn(async move {
                    let _arrival = arrival;
                    let _permit = match limiter {
                        Some(limiter) => limiter.acquire_owned().await.ok(),
                        None => None,
                    };
                    worker.run().await
                });
            }

            barrier.wait().await;

            // Sole close point: every worker sender is already gone
            drop(sender);
            tracing::debug!("All workers finished, result channel closed");

            let mut report = CrawlReport::default();
            while let Some(joined) = workers.join_next().await {
                match joined {
                    Ok(worker_report) => report.workers.push(worker_report),
                    Err(e) => {
                        tracing::error!("Crawl worker terminated abnormally: {}", e);
                        report.panicked += 1;
                    }
                }
            }
            report
        });

        ResultStream {
            receiver,
            completion,
        }
    }
}
