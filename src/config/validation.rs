use crate::config::types::{Config, CrawlerConfig, FetcherConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_seeds(&config.seeds)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates configured seed URLs
///
/// Format validity is left to the fetcher; only blank entries are rejected.
fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    if let Some(index) = seeds.iter().position(|s| s.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "seed #{} is empty",
            index + 1
        )));
    }
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_seeds == Some(0) {
        return Err(ConfigError::Validation(
            "max_concurrent_seeds must be >= 1 when set".to_string(),
        ));
    }
    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    // Must be usable as an HTTP header value
    if !config.value.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
        return Err(ConfigError::Validation(format!(
            "user agent must contain only printable ASCII characters, got '{}'",
            config.value
        )));
    }

    Ok(())
}

/// Validates fetcher timeouts
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs > config.request_timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs ({}) cannot exceed request_timeout_secs ({})",
            config.connect_timeout_secs, config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.result_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "result_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}
