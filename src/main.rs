//! Link-Harvester main entry point
//!
//! This is the command-line interface for the Link-Harvester seed crawler.

use anyhow::Context;
use clap::{CommandFactory, Parser};
use link_harvester::config::{load_config_with_hash, validate, Config};
use link_harvester::crawler::harvest;
use link_harvester::output::print_summary;
use link_harvester::seed::seeds_from_urls;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Link-Harvester: crawl seed sites and record every link they lead to
///
/// Each seed is traversed independently; every absolute HTTP(S) link
/// reachable from it is written once per seed to a CSV file with the columns
/// SOURCE and SCRAPED_URL.
#[derive(Parser, Debug)]
#[command(name = "link-harvester")]
#[command(version = "1.0.0")]
#[command(about = "Crawl seed URLs and record discovered links", long_about = None)]
struct Cli {
    /// Seed URLs to crawl (overrides `seeds` from the config file)
    #[arg(value_name = "URL")]
    seeds: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Result CSV file (default: result.csv)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Maximum number of seeds crawled at the same time (default: all)
    #[arg(long, value_name = "N")]
    max_workers: Option<usize>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "AGENT")]
    user_agent: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the seeds and settings that would be used without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    let seed_urls = if cli.seeds.is_empty() {
        config.seeds.clone()
    } else {
        cli.seeds.clone()
    };

    if seeds_from_urls(&seed_urls).is_empty() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    if cli.dry_run {
        handle_dry_run(&config, &seed_urls);
        return Ok(());
    }

    let summary = harvest(&config, &seed_urls)
        .await
        .with_context(|| format!("harvest into {} failed", config.output.result_path))?;

    tracing::info!(
        "Harvest completed: {} records written to {}",
        summary.records_written,
        config.output.result_path
    );

    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_harvester=info,warn"),
            1 => EnvFilter::new("link_harvester=debug,info"),
            2 => EnvFilter::new("link_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.result_path = output.clone();
    }
    if let Some(max_workers) = cli.max_workers {
        config.crawler.max_concurrent_seeds = Some(max_workers);
    }
    if let Some(user_agent) = &cli.user_agent {
        config.user_agent.value = user_agent.clone();
    }

    validate(&config).context("invalid settings")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config, seed_urls: &[String]) {
    println!("=== Link-Harvester Dry Run ===\n");

    println!("Crawler Configuration:");
    match config.crawler.max_concurrent_seeds {
        Some(n) => println!("  Max concurrent seeds: {}", n),
        None => println!("  Max concurrent seeds: one per seed"),
    }
    println!("  User agent: {}", config.user_agent.value);
    println!(
        "  Timeouts: {}s request, {}s connect",
        config.fetcher.request_timeout_secs, config.fetcher.connect_timeout_secs
    );

    println!("\nOutput:");
    println!("  Result file: {}", config.output.result_path);

    let seeds = seeds_from_urls(seed_urls);
    println!("\nSeeds ({}):", seeds.len());
    for seed in &seeds {
        println!("  - {} (source '{}')", seed.url, seed.label);
    }

    println!("\n✓ Configuration is valid");
}
