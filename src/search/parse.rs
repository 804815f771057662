//! DuckDuckGo HTML result page parsing.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

const NO_DESCRIPTION: &str = "No description available";

/// Chunk-size lines left in the body when the server used chunked encoding.
static CHUNK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[0-9a-f]+\r\n|\r\n[0-9a-f]+\r\n")
        .expect("Failed to compile chunk marker regex - this is a bug")
});

static RESULT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div.result").expect("Failed to parse result selector - this is a bug")
});

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a.result__a").expect("Failed to parse result title selector - this is a bug")
});

static SNIPPET_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".result__snippet")
        .expect("Failed to parse result snippet selector - this is a bug")
});

/// One organic search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// Removes chunk-size lines from a body that was not de-chunked on receipt.
pub fn strip_chunk_markers(body: &str) -> String {
    CHUNK_MARKER.replace_all(body, "").into_owned()
}

/// Extracts up to `max_results` results from a result page.
///
/// Blocks without a title link are skipped.
pub fn parse_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    document
        .select(&RESULT_SELECTOR)
        .filter_map(extract_result)
        .take(max_results)
        .collect()
}

fn extract_result(block: ElementRef<'_>) -> Option<SearchResult> {
    let anchor = block.select(&TITLE_SELECTOR).next()?;
    let href = anchor.value().attr("href")?;

    let title = element_text(anchor);
    let description = block
        .select(&SNIPPET_SELECTOR)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    Some(SearchResult {
        title,
        url: resolve_result_url(href),
        description,
    })
}

/// Unwraps DuckDuckGo's `/l/?uddg=<target>` redirect links to the target URL.
pub fn resolve_result_url(href: &str) -> String {
    if !href.contains("duckduckgo.com/l/") {
        return href.to_string();
    }
    href.split_once('?')
        .and_then(|(_, query)| {
            url::form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_else(|| href.to_string())
}

fn element_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
