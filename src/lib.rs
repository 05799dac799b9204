//! Link-Harvester: a concurrent seed crawler
//!
//! This crate crawls a set of seed URLs, follows every absolute HTTP(S) link
//! reachable from each seed, and records each (seed label, discovered link)
//! pair to a CSV file. Every seed is traversed by its own worker with its own
//! visited set; all workers feed one shared channel drained by a single sink.

pub mod config;
pub mod crawler;
pub mod output;
pub mod seed;
pub mod url;

use thiserror::Error;

/// Main error type for Link-Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Result sink error: {0}")]
    Sink(#[from] output::SinkError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Crawl supervisor failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Link-Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{harvest, harvest_with, Coordinator, PageFetcher};
pub use output::HarvestSummary;
pub use seed::{seeds_from_urls, DiscoveredLink, Seed};
pub use crate::url::{derive_label, has_accepted_scheme};
