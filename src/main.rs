//! Main application entry point (CLI binary).
//!
//! A thin wrapper around the `wirefetch` library that handles:
//! - Command-line argument parsing
//! - Logger and TLS initialization
//! - Error reporting and exit status

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use colored::*;

use wirefetch::app::{self, Command};
use wirefetch::initialization::{init_crypto_provider, init_logger_with};
use wirefetch::{Config, ContentFormat, LogFormat, LogLevel};

/// Minimal HTTP/1.1 client over raw sockets, with a response cache and web search.
#[derive(Debug, Parser)]
#[command(name = "wirefetch", version, about)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["url", "search", "clear_cache"]),
))]
struct Cli {
    /// Make an HTTP request to the given URL
    #[arg(short, long)]
    url: Option<String>,

    /// Search the web with the given terms
    #[arg(short, long, num_args = 1..)]
    search: Option<Vec<String>>,

    /// Clear the HTTP response cache
    #[arg(short, long)]
    clear_cache: bool,

    /// Preferred response format sent in the Accept header
    #[arg(long, value_enum, default_value_t = ContentFormat::Html)]
    format: ContentFormat,

    /// Neither read nor write the response cache
    #[arg(long)]
    no_cache: bool,

    /// Maximum number of redirects to follow
    #[arg(long, default_value_t = wirefetch::config::MAX_REDIRECT_HOPS)]
    max_redirects: usize,

    /// Maximum age of a cached response in milliseconds
    #[arg(long, default_value_t = wirefetch::config::CACHE_MAX_AGE_MS)]
    cache_max_age_ms: u64,

    /// Maximum number of cached responses
    #[arg(long, default_value_t = wirefetch::config::CACHE_MAX_SIZE)]
    cache_max_size: usize,

    /// User-Agent header value
    #[arg(long)]
    user_agent: Option<String>,

    /// Cache file location (default: ~/.wirefetch/cache.json)
    #[arg(long)]
    cache_path: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,

    /// Log format: plain or json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,
}

impl Cli {
    fn config(&self) -> Config {
        let defaults = Config::default();
        Config {
            cache_enabled: !self.no_cache,
            cache_max_age_ms: self.cache_max_age_ms,
            cache_max_size: self.cache_max_size,
            cache_path: self.cache_path.clone().unwrap_or(defaults.cache_path),
            max_redirects: self.max_redirects,
            preferred_format: self.format,
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            ..defaults
        }
    }

    fn command(&self) -> Option<Command> {
        if self.clear_cache {
            Some(Command::ClearCache)
        } else if let Some(url) = &self.url {
            Some(Command::Fetch(url.clone()))
        } else {
            self.search
                .as_ref()
                .map(|terms| Command::Search(terms.join(" ")))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.config();
    config.validate().context("Invalid configuration")?;

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;
    init_crypto_provider();

    let command = cli
        .command()
        .context("One of --url, --search or --clear-cache is required")?;
    app::run(command, &config).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red(), e);
        process::exit(1);
    }
}
