//! Error type definitions.
//!
//! This module defines every error surfaced by the transport pipeline, the
//! response cache and application start-up.

use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigValidationError),
}

/// A configuration field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// Actionable description of the problem
    pub message: String,
}

impl ConfigValidationError {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Socket-level failure while exchanging a request with a peer.
///
/// Never retried; the whole request (including any redirect chain) fails.
#[derive(Error, Debug)]
pub enum TransportError {
    /// TCP connect failed (refused, unreachable, DNS failure, ...).
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// The hostname cannot be used as a TLS server name.
    #[error("invalid TLS server name: {0}")]
    InvalidServerName(String),

    /// TLS handshake failed.
    #[error("TLS handshake with {host} failed: {source}")]
    Tls {
        host: String,
        #[source]
        source: io::Error,
    },

    /// Writing the serialized request failed.
    #[error("failed to write request to {host}: {source}")]
    Write {
        host: String,
        #[source]
        source: io::Error,
    },

    /// Reading the response failed before the peer closed the connection.
    #[error("failed to read response from {host}: {source}")]
    Read {
        host: String,
        #[source]
        source: io::Error,
    },
}

/// Malformed response bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The first line does not carry an `HTTP/x.y NNN` status.
    #[error("malformed status line: {0:?}")]
    MalformedStatusLine(String),
}

/// Failure of a top-level request.
///
/// This is the single failure outcome the orchestrator reports to its caller.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL scheme is neither `http` nor `https`, or the URL has no host.
    #[error("unsupported URL '{0}': only http:// and https:// URLs with a host are supported")]
    UnsupportedUrl(String),

    /// Socket-level failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The redirect hop budget was exhausted.
    #[error("Maximum number of redirects ({limit}) exceeded")]
    TooManyRedirects { limit: usize },
}

/// Failure reading or writing the cache file.
///
/// Always logged and swallowed; the in-memory cache stays authoritative.
#[derive(Error, Debug)]
pub enum CachePersistenceError {
    /// The cache directory could not be created.
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache file could not be read.
    #[error("failed to read cache file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache file is not a valid entry map.
    #[error("failed to parse cache file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The entry map could not be serialized.
    #[error("failed to serialize cache: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The cache file could not be written.
    #[error("failed to write cache file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure of a web search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The search request itself failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The search endpoint answered with a non-200 status.
    #[error("Search failed with status code {0}")]
    Status(u16),
}
