//! HTTP redirect resolution.
//!
//! Decides, for one parsed response, whether the client must issue another
//! request and with which URL and method. The hop budget itself is enforced by
//! the caller's loop in [`HttpClient::request`](crate::fetch::HttpClient::request).

use url::Url;

use crate::error_handling::FetchError;
use crate::fetch::{Method, Response};

/// Status codes that trigger a redirect when a `location` header is present.
pub const REDIRECT_CODES: [u16; 5] = [301, 302, 303, 307, 308];

/// The next request of a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectHop {
    pub url: Url,
    /// `None` keeps the implicit GET of the original request
    pub method: Option<Method>,
}

/// Resolves the redirect for `response`, if any.
///
/// - Only [`REDIRECT_CODES`] with a `location` header redirect; anything else
///   is final and yields `Ok(None)`.
/// - A location starting with `http` is parsed as absolute; otherwise it is
///   joined onto `current`.
/// - 307 and 308 keep `method`; 301, 302 and 303 switch to GET.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] if the location cannot be resolved.
pub fn next_hop(
    response: &Response,
    current: &Url,
    method: Option<Method>,
) -> Result<Option<RedirectHop>, FetchError> {
    if !REDIRECT_CODES.contains(&response.status_code) {
        return Ok(None);
    }
    let Some(location) = response.location() else {
        log::warn!(
            "Redirect status {} for {} but no Location header",
            response.status_code,
            current
        );
        return Ok(None);
    };

    let resolved = if location.starts_with("http") {
        Url::parse(location)
    } else {
        current.join(location)
    };
    let url = resolved.map_err(|source| FetchError::InvalidUrl {
        url: location.to_string(),
        source,
    })?;

    let method = match response.status_code {
        307 | 308 => method,
        _ => Some(Method::Get),
    };

    Ok(Some(RedirectHop { url, method }))
}
