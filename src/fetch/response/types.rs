//! Response data structures.

use serde::{Deserialize, Serialize};

use crate::config::{HEADER_CACHE_CONTROL, HEADER_CONTENT_TYPE, HEADER_LOCATION};
use crate::fetch::Headers;

/// A parsed HTTP response.
///
/// Header names are lower-cased. The body is everything after the first blank
/// line, exactly as received: no `Content-Length` truncation and no chunked
/// transfer-encoding reassembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: Headers,
    pub body: String,
}

impl Response {
    /// `2xx`
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(HEADER_LOCATION)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(HEADER_CONTENT_TYPE)
    }

    /// Whether `cache-control` forbids storing this response.
    pub fn is_no_store(&self) -> bool {
        self.headers
            .get(HEADER_CACHE_CONTROL)
            .is_some_and(|value| value.contains("no-store"))
    }
}
