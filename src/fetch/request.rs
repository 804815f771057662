//! HTTP request options and header building.
//!
//! This module provides the request description accepted by
//! [`HttpClient::request`](crate::fetch::HttpClient::request) and builds the
//! header set sent on the wire for each attempt.

use std::fmt;

use url::Url;

use crate::config::{
    ContentFormat, HEADER_ACCEPT, HEADER_CONNECTION, HEADER_HOST, HEADER_USER_AGENT,
};
use crate::fetch::Headers;

/// Request method. Only the methods the user-agent issues are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request options supplied by the caller.
///
/// `method: None` means GET; both are eligible for caching.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Request method, `None` for an implicit GET
    pub method: Option<Method>,
    /// Caller-supplied headers; these win over the defaults on collision
    pub headers: Headers,
    /// Preferred response format, falls back to the client's default
    pub preferred_format: Option<ContentFormat>,
}

impl RequestOptions {
    /// Options for a plain GET with the given preferred format.
    pub fn with_format(format: ContentFormat) -> Self {
        Self {
            preferred_format: Some(format),
            ..Default::default()
        }
    }

    /// Whether the response to this request may be served from or stored in the cache.
    pub fn is_cacheable(&self) -> bool {
        matches!(self.method, None | Some(Method::Get))
    }
}

/// Default request headers sent with every attempt.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Builds the header set for one attempt against `url`.
    ///
    /// Defaults come first, in a fixed order: `Host`, `Connection: close`,
    /// `Accept` weighted by `format`, `User-Agent`. Caller headers are merged
    /// last and replace defaults with the same (case-insensitive) name.
    pub(crate) fn build(
        url: &Url,
        user_agent: &str,
        format: ContentFormat,
        custom: &Headers,
    ) -> Headers {
        let mut headers = Headers::new();
        headers.insert(HEADER_HOST, host_header_value(url));
        headers.insert(HEADER_CONNECTION, "close");
        headers.insert(HEADER_ACCEPT, format.accept_header());
        headers.insert(HEADER_USER_AGENT, user_agent);
        headers.merge(custom);
        headers
    }
}

/// `Host` value: the hostname, plus the port when it is not the scheme default.
fn host_header_value(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Splits a URL into the request-line path and query (`?`-prefixed, or empty).
pub(crate) fn request_target(url: &Url) -> (&str, String) {
    let query = url.query().map(|q| format!("?{q}")).unwrap_or_default();
    (url.path(), query)
}
