//! Command-line application layer.
//!
//! Turns a parsed [`Command`] into calls on the library and prints the
//! results. Everything here reports errors through `anyhow`.

mod commands;
mod prompt;
mod url;

use anyhow::Result;

use crate::config::Config;

pub use commands::{clear_cache_command, fetch_and_render, fetch_command, search_command};
pub use prompt::{print_results, run_prompt};
pub use url::normalize_url;

/// What the user asked the binary to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch and display one URL
    Fetch(String),
    /// Search the web for the given terms
    Search(String),
    /// Empty the response cache
    ClearCache,
}

/// Runs `command` with `config`.
pub async fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Fetch(url) => fetch_command(config, &url).await,
        Command::Search(terms) => search_command(config, &terms).await,
        Command::ClearCache => {
            clear_cache_command(config);
            Ok(())
        }
    }
}
