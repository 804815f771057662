//! Configuration constants.
//!
//! Defaults for the transport, redirect and cache layers. All of them can be
//! overridden through [`Config`](super::Config).

/// Default User-Agent string sent with every request.
///
/// Mimics a modern Chrome browser on Windows. Users can override this via the
/// `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// Redirect handling
/// Maximum number of redirect hops followed for one top-level request.
/// The budget is shared by the whole chain.
pub const MAX_REDIRECT_HOPS: usize = 5;

// Ports
/// Port used for `http://` URLs without an explicit port
pub const DEFAULT_HTTP_PORT: u16 = 80;
/// Port used for `https://` URLs without an explicit port
pub const DEFAULT_HTTPS_PORT: u16 = 443;

/// Size of the buffer used for each socket read
pub const READ_CHUNK_SIZE: usize = 8 * 1024;

// Response cache
/// Maximum age of a cached response in milliseconds (1 minute)
pub const CACHE_MAX_AGE_MS: u64 = 60_000;
/// Maximum number of cached responses
pub const CACHE_MAX_SIZE: usize = 50;
/// Directory (under the user's home directory) holding the cache file
pub const CACHE_DIR_NAME: &str = ".wirefetch";
/// Name of the cache file inside [`CACHE_DIR_NAME`]
pub const CACHE_FILE_NAME: &str = "cache.json";

// Search
/// DuckDuckGo HTML endpoint used by the search command
pub const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
/// Maximum number of search results shown
pub const MAX_SEARCH_RESULTS: usize = 10;

// HTTP header names
pub const HEADER_HOST: &str = "Host";
pub const HEADER_CONNECTION: &str = "Connection";
pub const HEADER_ACCEPT: &str = "Accept";
pub const HEADER_USER_AGENT: &str = "User-Agent";
/// Lower-cased, as stored in parsed responses
pub const HEADER_LOCATION: &str = "location";
/// Lower-cased, as stored in parsed responses
pub const HEADER_CACHE_CONTROL: &str = "cache-control";
/// Lower-cased, as stored in parsed responses
pub const HEADER_CONTENT_TYPE: &str = "content-type";
