//! HTTP client.
//!
//! Composes the pipeline for one top-level request:
//! cache check → headers → transport → parse → redirect loop → cache store.
//!
//! Redirects are followed in a bounded loop carrying the remaining hop budget;
//! only the original request consults the cache, hops go straight to the
//! transport. Any failure aborts the whole request, including an in-progress
//! redirect chain.

mod codec;
mod headers;
mod redirects;
mod request;
mod response;


use std::sync::Arc;

use log::{debug, info};
use url::Url;

use crate::cache::{CacheSettings, ResponseCache};
use crate::config::{Config, ContentFormat};
use crate::error_handling::FetchError;
use crate::transport::{Target, TcpTransport, Transport};

pub use codec::{parse_response, serialize_request};
pub use headers::Headers;
pub use redirects::{next_hop, RedirectHop, REDIRECT_CODES};
pub use request::{Method, RequestOptions};
pub use response::Response;

use request::{request_target, RequestHeaders};

/// Client settings taken from [`Config`].
#[derive(Debug, Clone)]
struct ClientSettings {
    max_redirects: usize,
    user_agent: String,
    preferred_format: ContentFormat,
}

impl From<&Config> for ClientSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_redirects: config.max_redirects,
            user_agent: config.user_agent.clone(),
            preferred_format: config.preferred_format,
        }
    }
}

/// The user-agent. Generic over the [`Transport`] so tests can script peers.
pub struct HttpClient<T: Transport = TcpTransport> {
    transport: T,
    cache: Arc<ResponseCache>,
    settings: ClientSettings,
}

impl HttpClient<TcpTransport> {
    /// Builds a client on real sockets with its own cache loaded from
    /// `config.cache_path`.
    pub fn new(config: &Config) -> Self {
        let cache = Arc::new(ResponseCache::new(CacheSettings::from(config)));
        Self::with_transport(config, TcpTransport::new(), cache)
    }
}

impl<T: Transport> HttpClient<T> {
    /// Builds a client from explicit parts; the cache may be shared.
    pub fn with_transport(config: &Config, transport: T, cache: Arc<ResponseCache>) -> Self {
        Self {
            transport,
            cache,
            settings: ClientSettings::from(config),
        }
    }

    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Performs a request, following redirects and using the cache.
    ///
    /// GET requests (explicit or implicit) are answered from the cache when a
    /// fresh entry exists, without touching the network. Otherwise the final
    /// non-redirect response is stored if it is a `2xx` GET, then returned.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] / [`FetchError::UnsupportedUrl`] for bad URLs
    /// - [`FetchError::Transport`] for socket failures
    /// - [`FetchError::Parse`] for a malformed status line
    /// - [`FetchError::TooManyRedirects`] once the hop budget is exhausted
    pub async fn request(&self, url: &str, options: RequestOptions) -> Result<Response, FetchError> {
        let original = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        let cache_key = original.as_str().to_string();
        let cacheable = options.is_cacheable() && self.cache.settings().enabled;

        if cacheable {
            if let Some(cached) = self.cache.get(&cache_key) {
                info!("Using cached response for {cache_key}");
                return Ok(cached);
            }
        }

        let mut current = original;
        let mut method = options.method;
        let mut remaining = self.settings.max_redirects;
        let response = loop {
            let response = self.send_once(&current, method, &options).await?;
            match next_hop(&response, &current, method)? {
                Some(hop) => {
                    if remaining == 0 {
                        return Err(FetchError::TooManyRedirects {
                            limit: self.settings.max_redirects,
                        });
                    }
                    remaining -= 1;
                    debug!(
                        "{} redirect {} -> {} ({} hop(s) left)",
                        response.status_code, current, hop.url, remaining
                    );
                    current = hop.url;
                    method = hop.method;
                }
                None => break response,
            }
        };

        if cacheable && response.is_success() {
            self.cache.set(&cache_key, &response);
        }
        Ok(response)
    }

    /// Empties the response cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn is_cache_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// One attempt: one socket, one request, one parsed response.
    async fn send_once(
        &self,
        url: &Url,
        method: Option<Method>,
        options: &RequestOptions,
    ) -> Result<Response, FetchError> {
        let target = Target::from_url(url)?;
        let format = options
            .preferred_format
            .unwrap_or(self.settings.preferred_format);
        let headers = RequestHeaders::build(url, &self.settings.user_agent, format, &options.headers);
        let (path, query) = request_target(url);
        let method = method.unwrap_or(Method::Get);
        let bytes = serialize_request(method, path, &query, &headers);

        debug!("{method} {url}");
        let raw = self.transport.exchange(&target, &bytes).await?;
        Ok(parse_response(&raw)?)
    }
}
