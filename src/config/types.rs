use serde::Deserialize;

/// User agent sent with every page request unless configured otherwise
pub const DEFAULT_USER_AGENT: &str = "Web-ScrapingBOT";

/// Result file written when no output path is configured
pub const DEFAULT_RESULT_PATH: &str = "result.csv";

/// Main configuration structure for Link-Harvester
///
/// Every section is optional; a missing file section falls back to its
/// defaults so the crawler can run from command-line seeds alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed URLs used when none are given on the command line
    pub seeds: Vec<String>,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of seeds traversed at the same time (unset = one worker per seed)
    #[serde(rename = "max-concurrent-seeds")]
    pub max_concurrent_seeds: Option<usize>,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Header value sent as `User-Agent`
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// HTTP fetcher timeouts
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the CSV result file
    #[serde(rename = "result-path")]
    pub result_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            result_path: DEFAULT_RESULT_PATH.to_string(),
        }
    }
}
