//! Output module for persisting and reporting crawl results
//!
//! This module handles:
//! - Writing discovered links to the CSV result file
//! - Summarizing a finished harvest

mod sink;
mod summary;

pub use sink::{ResultSink, SinkError, SinkReport, RESULT_HEADER};
pub use summary::{print_summary, HarvestSummary};
