//! Configuration types and option enums.
//!
//! This module defines the enums and structs that configure the client, the
//! response cache and logging. None of them depend on the CLI layer.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::constants::{
    CACHE_DIR_NAME, CACHE_FILE_NAME, CACHE_MAX_AGE_MS, CACHE_MAX_SIZE, DEFAULT_USER_AGENT,
    MAX_REDIRECT_HOPS, MAX_SEARCH_RESULTS,
};
use crate::error_handling::ConfigValidationError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Preferred response representation, used to weight the `Accept` header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    /// Prefer `text/html`
    #[default]
    Html,
    /// Prefer `application/json`
    Json,
}

impl ContentFormat {
    /// Returns the `Accept` header value weighted towards this format.
    pub fn accept_header(self) -> &'static str {
        match self {
            ContentFormat::Json => "application/json;q=1.0, text/html;q=0.8",
            ContentFormat::Html => "text/html;q=1.0, application/json;q=0.8",
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// Every field is a read-only input once the client has been built.
///
/// # Examples
///
/// ```no_run
/// use wirefetch::Config;
///
/// let config = Config {
///     cache_enabled: false,
///     max_redirects: 3,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether responses are cached at all
    pub cache_enabled: bool,

    /// Maximum age of a cache entry, in milliseconds
    pub cache_max_age_ms: u64,

    /// Maximum number of cache entries
    pub cache_max_size: usize,

    /// Location of the JSON cache file
    pub cache_path: PathBuf,

    /// Maximum redirect hops per top-level request
    pub max_redirects: usize,

    /// Format requested when the caller does not pick one
    pub preferred_format: ContentFormat,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Maximum number of search results listed
    pub max_search_results: usize,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_max_age_ms: CACHE_MAX_AGE_MS,
            cache_max_size: CACHE_MAX_SIZE,
            cache_path: default_cache_path(),
            max_redirects: MAX_REDIRECT_HOPS,
            preferred_format: ContentFormat::Html,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_search_results: MAX_SEARCH_RESULTS,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Checks that the configuration can drive a client.
    ///
    /// # Errors
    ///
    /// Returns the first offending field with an actionable message.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.cache_max_size == 0 {
            return Err(ConfigValidationError::new(
                "cache_max_size",
                "cache_max_size must be greater than 0 (use --no-cache to disable caching)",
            ));
        }
        if self.cache_enabled && self.cache_max_age_ms == 0 {
            return Err(ConfigValidationError::new(
                "cache_max_age_ms",
                "cache_max_age_ms must be greater than 0 (use --no-cache to disable caching)",
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigValidationError::new(
                "user_agent",
                "user_agent must not be empty",
            ));
        }
        Ok(())
    }
}

/// Returns the per-user cache file location: `<home>/.wirefetch/cache.json`.
///
/// Falls back to the current directory when no home directory is known.
pub fn default_cache_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_DIR_NAME)
        .join(CACHE_FILE_NAME)
}
