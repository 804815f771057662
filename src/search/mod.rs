//! Web search through DuckDuckGo's HTML endpoint.
//!
//! The search page is fetched with the regular [`HttpClient`], so it goes
//! through the same cache and redirect handling as any other request. Because
//! the transport never de-chunks bodies, chunk-size lines are stripped here
//! before the page is parsed.

mod parse;

use log::debug;
use url::Url;

use crate::config::{Config, ContentFormat, SEARCH_ENDPOINT};
use crate::error_handling::{FetchError, SearchError};
use crate::fetch::{HttpClient, RequestOptions, Response};
use crate::transport::{TcpTransport, Transport};

pub use parse::{parse_results, resolve_result_url, strip_chunk_markers, SearchResult};

/// Builds the result page URL for `terms`, form-encoded into `q`.
pub fn search_url(terms: &str) -> Result<Url, FetchError> {
    Url::parse_with_params(SEARCH_ENDPOINT, &[("q", terms)]).map_err(|source| {
        FetchError::InvalidUrl {
            url: SEARCH_ENDPOINT.to_string(),
            source,
        }
    })
}

/// Runs searches and fetches the pages they point to.
pub struct SearchService<T: Transport = TcpTransport> {
    client: HttpClient<T>,
    max_results: usize,
    preferred_format: ContentFormat,
}

impl SearchService<TcpTransport> {
    pub fn new(config: &Config) -> Self {
        Self::with_client(HttpClient::new(config), config)
    }
}

impl<T: Transport> SearchService<T> {
    pub fn with_client(client: HttpClient<T>, config: &Config) -> Self {
        Self {
            client,
            max_results: config.max_search_results,
            preferred_format: config.preferred_format,
        }
    }

    /// Searches for `terms` and returns at most the configured number of results.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Status`] when the endpoint does not answer 200,
    /// or [`SearchError::Fetch`] when the request fails.
    pub async fn search(&self, terms: &str) -> Result<Vec<SearchResult>, SearchError> {
        let url = search_url(terms)?;
        let response = self
            .client
            .request(url.as_str(), RequestOptions::with_format(ContentFormat::Html))
            .await?;

        if response.status_code != 200 {
            return Err(SearchError::Status(response.status_code));
        }

        let html = strip_chunk_markers(&response.body);
        let results = parse_results(&html, self.max_results);
        debug!("Search for {terms:?} returned {} result(s)", results.len());
        Ok(results)
    }

    /// Fetches a result page with the configured preferred format.
    pub async fn fetch_url(&self, url: &str) -> Result<Response, FetchError> {
        self.client
            .request(url, RequestOptions::with_format(self.preferred_format))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::{CacheSettings, ResponseCache};
    use crate::transport::scripted::ScriptedTransport;

    const PAGE: &str = r#"<div class="result results_links"><h2><a class="result__a" href="https://a.test/">A</a></h2><a class="result__snippet">first</a></div><div class="result results_links"><h2><a class="result__a" href="https://b.test/">B</a></h2></div>"#;

    fn service(transport: &ScriptedTransport, max_results: usize) -> SearchService<ScriptedTransport> {
        let config = Config {
            max_search_results: max_results,
            ..Default::default()
        };
        let mut settings = CacheSettings::from(&config);
        settings.path = None;
        let client = HttpClient::with_transport(
            &config,
            transport.clone(),
            Arc::new(ResponseCache::new(settings)),
        );
        SearchService::with_client(client, &config)
    }

    #[test]
    fn test_search_url_encodes_terms() {
        let url = search_url("rust async & more").unwrap();
        assert_eq!(url.host_str(), Some("html.duckduckgo.com"));
        assert_eq!(url.path(), "/html/");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "q");
        assert_eq!(value, "rust async & more");
        assert!(!url.as_str().contains(' '));
    }

    #[tokio::test]
    async fn test_search_parses_chunked_page() {
        let url = search_url("rust").unwrap();
        let route = format!("https://html.duckduckgo.com:443{}?{}", url.path(), url.query().unwrap());
        let raw = format!(
            "HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nContent-Type: text/html\r\n\r\n{:x}\r\n{PAGE}\r\n0\r\n\r\n",
            PAGE.len()
        );
        let transport = ScriptedTransport::new(vec![(route.as_str(), raw)]);

        let results = service(&transport, 10).search("rust").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://a.test/");
        assert_eq!(results[0].description, "first");
        assert_eq!(results[1].title, "B");

        let request = &transport.exchanges()[0].request;
        assert!(request.contains("Accept: text/html;q=1.0"));
    }

    #[tokio::test]
    async fn test_search_respects_result_limit() {
        let url = search_url("rust").unwrap();
        let route = format!("https://html.duckduckgo.com:443{}?{}", url.path(), url.query().unwrap());
        let transport = ScriptedTransport::new(vec![(
            route.as_str(),
            format!("HTTP/1.1 200 OK\r\n\r\n{PAGE}"),
        )]);

        let results = service(&transport, 1).search("rust").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_search_non_200_is_error() {
        let url = search_url("rust").unwrap();
        let route = format!("https://html.duckduckgo.com:443{}?{}", url.path(), url.query().unwrap());
        let transport = ScriptedTransport::new(vec![(
            route.as_str(),
            "HTTP/1.1 202 Accepted\r\n\r\n".to_string(),
        )]);

        let err = service(&transport, 10).search("rust").await.unwrap_err();
        assert!(matches!(err, SearchError::Status(202)));
    }

    #[tokio::test]
    async fn test_search_transport_failure() {
        let transport = ScriptedTransport::default();
        let err = service(&transport, 10).search("rust").await.unwrap_err();
        assert!(matches!(err, SearchError::Fetch(FetchError::Transport(_))));
    }
}
