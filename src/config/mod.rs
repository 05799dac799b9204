//! Configuration module for Link-Harvester
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file.
//!
//! # Example
//!
//! ```no_run
//! use link_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Results go to: {}", config.output.result_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetcherConfig, OutputConfig, UserAgentConfig, DEFAULT_RESULT_PATH,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
