//! Command handlers: fetch a URL, search, clear the cache.

use anyhow::{bail, Context, Result};
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::prompt::{print_results, run_prompt};
use crate::app::url::normalize_url;
use crate::config::{Config, ContentFormat};
use crate::display::render_response;
use crate::fetch::{HttpClient, RequestOptions};
use crate::search::SearchService;
use crate::transport::Transport;

/// Fetches `url` and renders the body for the terminal.
///
/// # Errors
///
/// Fails when the request fails or the final status is not 200.
pub async fn fetch_and_render<T: Transport>(
    client: &HttpClient<T>,
    url: &str,
    format: ContentFormat,
) -> Result<String> {
    let response = client
        .request(url, RequestOptions::with_format(format))
        .await?;

    if response.status_code != 200 {
        bail!("Request failed with status code {}", response.status_code);
    }

    Ok(render_response(&response.body, response.content_type()))
}

/// `--url`: fetch one page and print it.
pub async fn fetch_command(config: &Config, url: &str) -> Result<()> {
    let url = normalize_url(url)?;
    println!("{}", format!("Fetching {url}...").blue());

    let client = HttpClient::new(config);
    let rendered = fetch_and_render(&client, &url, config.preferred_format)
        .await
        .context("Failed to fetch URL")?;
    println!("{rendered}");
    Ok(())
}

/// `--search`: list results, then let the user open them interactively.
pub async fn search_command(config: &Config, terms: &str) -> Result<()> {
    println!("{}", format!("Searching for \"{terms}\"...").blue());

    let service = SearchService::new(config);
    let results = service.search(terms).await.context("Search failed")?;

    if results.is_empty() {
        println!("{}", "No results found.".yellow());
        return Ok(());
    }

    print_results(&results);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    run_prompt(&results, &service, &mut lines).await
}

/// `--clear-cache`: empty the persistent cache.
pub fn clear_cache_command(config: &Config) {
    let client = HttpClient::new(config);
    client.clear_cache();
    println!("{}", "Cache cleared successfully".green());
}
