//! CSV result sink
//!
//! The sink is the single consumer of the shared result channel. It writes
//! the header as soon as it is created, then one row per record in arrival
//! order. Any write failure is returned immediately and ends the run.

use crate::seed::DiscoveredLink;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;

/// Header row of every result file
pub const RESULT_HEADER: [&str; 2] = ["SOURCE", "SCRAPED_URL"];

/// Errors that can occur while persisting results
///
/// All of them are fatal for the run.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to create result file {}: {source}", path.display())]
    Create { path: PathBuf, source: std::io::Error },

    #[error("Failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What the sink persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkReport {
    /// Number of record rows written (header excluded)
    pub records_written: u64,

    /// Rows written per source label
    pub per_source: BTreeMap<String, u64>,
}

/// Writes discovered links as CSV rows
pub struct ResultSink<W: Write> {
    writer: csv::Writer<W>,
    report: SinkReport,
}

impl ResultSink<File> {
    /// Creates (or truncates) the result file and writes its header
    ///
    /// The header is flushed before this returns, so the file on disk is
    /// either missing or starts with a complete header row.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the CSV file to create
    ///
    /// # Returns
    ///
    /// * `Ok(ResultSink)` - File created and header written
    /// * `Err(SinkError)` - File could not be created or written
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|source| SinkError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file)
    }
}

impl<W: Write> ResultSink<W> {
    /// Wraps a writer and writes the header row to it
    pub fn new(inner: W) -> Result<Self, SinkError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(RESULT_HEADER)?;
        writer.flush()?;

        Ok(Self {
            writer,
            report: SinkReport::default(),
        })
    }

    /// Writes one record row
    pub fn write(&mut self, link: &DiscoveredLink) -> Result<(), SinkError> {
        self.writer
            .write_record([link.source.as_str(), link.target.as_str()])?;

        self.report.records_written += 1;
        *self
            .report
            .per_source
            .entry(link.source.clone())
            .or_insert(0) += 1;
        Ok(())
    }

    /// Consumes records until the channel is closed and empty
    ///
    /// The output is flushed before returning. The first write error aborts
    /// draining; the caller drops the receiver, which stops the workers.
    pub async fn drain(
        &mut self,
        receiver: &mut mpsc::Receiver<DiscoveredLink>,
    ) -> Result<SinkReport, SinkError> {
        while let Some(link) = receiver.recv().await {
            self.write(&link)?;
            tracing::trace!("Recorded {} -> {}", link.source, link.target);
        }

        self.writer.flush()?;
        tracing::debug!(
            "Result stream drained: {} records written",
            self.report.records_written
        );
        Ok(self.report.clone())
    }

    /// Statistics for the rows written so far
    pub fn report(&self) -> &SinkReport {
        &self.report
    }

    /// Flushes and returns the underlying writer
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|e| SinkError::Io(e.into_error()))
    }
}
