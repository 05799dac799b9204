//! End-of-run summary
//!
//! Combines what the sink wrote with what the workers reported, and prints
//! it once the harvest is over.

use crate::crawler::{CrawlReport, WorkerReport};
use crate::output::SinkReport;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;

/// Summary of a finished harvest
#[derive(Debug, Clone)]
pub struct HarvestSummary {
    /// When the harvest finished
    pub finished_at: DateTime<Utc>,

    /// Wall-clock duration of the harvest
    pub elapsed: Duration,

    /// Number of record rows in the result file
    pub records_written: u64,

    /// Rows written per source label
    pub per_source: BTreeMap<String, u64>,

    /// Per-seed traversal statistics, sorted by seed URL
    pub seeds: Vec<WorkerReport>,

    /// Number of worker tasks that panicked
    pub panicked_workers: usize,
}

impl HarvestSummary {
    /// Builds the summary from the sink and crawl reports
    pub fn new(sink: SinkReport, crawl: CrawlReport, elapsed: Duration) -> Self {
        let mut seeds = crawl.workers;
        seeds.sort_by(|a, b| a.seed.url.cmp(&b.seed.url));

        Self {
            finished_at: Utc::now(),
            elapsed,
            records_written: sink.records_written,
            per_source: sink.per_source,
            seeds,
            panicked_workers: crawl.panicked,
        }
    }

    /// Summary of a run that had nothing to crawl
    pub fn empty() -> Self {
        Self::new(SinkReport::default(), CrawlReport::default(), Duration::ZERO)
    }

    /// Total page fetches attempted
    pub fn pages_visited(&self) -> u64 {
        self.seeds.iter().map(|s| s.pages_visited).sum()
    }

    /// Total page fetches that failed
    pub fn pages_failed(&self) -> u64 {
        self.seeds.iter().map(|s| s.pages_failed).sum()
    }

    /// Seeds whose traversal produced no records
    pub fn empty_seeds(&self) -> Vec<&str> {
        self.seeds
            .iter()
            .filter(|s| s.links_emitted == 0)
            .map(|s| s.seed.url.as_str())
            .collect()
    }
}

/// Prints the summary to stdout
pub fn print_summary(summary: &HarvestSummary) {
    println!("=== Harvest Summary ===\n");
    println!("Finished: {}", summary.finished_at.to_rfc3339());
    println!("Duration: {:.1}s", summary.elapsed.as_secs_f64());
    println!("Records written: {}", summary.records_written);
    println!(
        "Pages visited: {} ({} failed)",
        summary.pages_visited(),
        summary.pages_failed()
    );
    println!();

    if !summary.per_source.is_empty() {
        println!("Records by Source:");
        for (source, count) in &summary.per_source {
            println!("  {}: {}", source, count);
        }
        println!();
    }

    if !summary.seeds.is_empty() {
        println!("Seeds ({}):", summary.seeds.len());
        for report in &summary.seeds {
            println!(
                "  - {} [{}]: {} pages, {} links, {} discarded{}",
                report.seed.url,
                report.seed.label,
                report.pages_visited,
                report.links_emitted,
                report.links_discarded,
                if report.completed { "" } else { " (stopped early)" }
            );
        }
        println!();
    }

    let empty = summary.empty_seeds();
    if !empty.is_empty() {
        println!("Seeds without results ({}):", empty.len());
        for url in empty {
            println!("  - {}", url);
        }
        println!();
    }

    if summary.panicked_workers > 0 {
        println!("Workers lost to panics: {}", summary.panicked_workers);
    }
}
