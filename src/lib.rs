//! wirefetch library: a minimal HTTP/1.1 user-agent over raw sockets.
//!
//! Requests are serialized by hand, sent over a fresh TCP or TLS connection,
//! and read until the peer closes. Redirects are followed within a hop budget
//! and successful GET responses are kept in a persistent JSON cache.
//!
//! # Example
//!
//! ```no_run
//! use wirefetch::{Config, HttpClient, RequestOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! wirefetch::initialization::init_crypto_provider();
//!
//! let client = HttpClient::new(&Config::default());
//! let response = client
//!     .request("https://example.com/", RequestOptions::default())
//!     .await?;
//! println!("{} ({} bytes)", response.status_code, response.body.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod app;
pub mod cache;
pub mod config;
pub mod display;
mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod search;
pub mod transport;

// Re-export public API
pub use cache::{CacheEntry, CacheSettings, ResponseCache};
pub use config::{Config, ContentFormat, LogFormat, LogLevel};
pub use error_handling::{
    CachePersistenceError, ConfigValidationError, FetchError, InitializationError, ParseError,
    SearchError, TransportError,
};
pub use fetch::{Headers, HttpClient, Method, RequestOptions, Response};
pub use search::{SearchResult, SearchService};
pub use transport::{Target, TcpTransport, Transport};
