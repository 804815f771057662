//! Interactive search result browser.

use std::io::Write;

use anyhow::Result;
use colored::*;
use tokio::io::{AsyncBufRead, Lines};

use crate::display::render_response;
use crate::search::{SearchResult, SearchService};
use crate::transport::Transport;

/// Answer to the result list prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Choice {
    Exit,
    /// Zero-based index into the result list
    Open(usize),
    Invalid,
}

/// Interprets the answer to the result list prompt for `count` results.
pub(crate) fn parse_choice(input: &str, count: usize) -> Choice {
    let input = input.trim();
    if input.is_empty() {
        return Choice::Exit;
    }
    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Open(n - 1),
        _ => Choice::Invalid,
    }
}

/// `true` when the answer after viewing a page asks to quit.
pub(crate) fn wants_quit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("q")
}

/// Prints the numbered result list.
pub fn print_results(results: &[SearchResult]) {
    println!("{}", format!("\nTop {} results:", results.len()).green());
    for (i, result) in results.iter().enumerate() {
        println!("{}", format!("\n[{}] {}", i + 1, result.title).cyan());
        println!("{}", result.url.blue());
        println!("{}", result.description);
    }
}

fn ask(question: &str) {
    print!("{}", question.yellow());
    // A failed flush only delays the prompt text
    let _ = std::io::stdout().flush();
}

/// Lets the user open results by number until they exit.
///
/// Enter (or end of input) on the list prompt exits. After a page is shown,
/// Enter returns to the list and `q` quits.
pub async fn run_prompt<R, T>(
    results: &[SearchResult],
    service: &SearchService<T>,
    lines: &mut Lines<R>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    T: Transport,
{
    loop {
        ask("\nEnter a number to open a result, or press Enter to exit: ");
        let Some(answer) = lines.next_line().await? else {
            return Ok(());
        };

        let result = match parse_choice(&answer, results.len()) {
            Choice::Exit => return Ok(()),
            Choice::Invalid => {
                println!(
                    "{}",
                    format!("Please enter a number between 1 and {}.", results.len()).red()
                );
                continue;
            }
            Choice::Open(index) => &results[index],
        };

        println!("{}", format!("\nFetching {}...", result.url).blue());
        match service.fetch_url(&result.url).await {
            Ok(response) if response.status_code == 200 => {
                println!("{}", render_response(&response.body, response.content_type()));
                ask("\nPress Enter to return to search results or 'q' to quit: ");
                match lines.next_line().await? {
                    Some(answer) if !wants_quit(&answer) => {}
                    _ => return Ok(()),
                }
            }
            Ok(response) => {
                println!(
                    "{}",
                    format!("Request failed with status code {}", response.status_code).red()
                );
            }
            Err(e) => println!("{}", format!("Error: {e}").red()),
        }
        print_results(results);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::io::{AsyncBufReadExt, BufReader};

    use super::*;
    use crate::cache::{CacheSettings, ResponseCache};
    use crate::config::Config;
    use crate::fetch::HttpClient;
    use crate::transport::scripted::ScriptedTransport;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("", 3), Choice::Exit);
        assert_eq!(parse_choice("  \n", 3), Choice::Exit);
        assert_eq!(parse_choice("1", 3), Choice::Open(0));
        assert_eq!(parse_choice(" 3 ", 3), Choice::Open(2));
        assert_eq!(parse_choice("0", 3), Choice::Invalid);
        assert_eq!(parse_choice("4", 3), Choice::Invalid);
        assert_eq!(parse_choice("two", 3), Choice::Invalid);
        assert_eq!(parse_choice("-1", 3), Choice::Invalid);
    }

    #[test]
    fn test_wants_quit() {
        assert!(wants_quit("q"));
        assert!(wants_quit(" Q "));
        assert!(!wants_quit(""));
        assert!(!wants_quit("quit"));
    }

    #[tokio::test]
    async fn test_prompt_opens_result_then_quits() {
        let transport = ScriptedTransport::new(vec![(
            "https://a.test:443/",
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\npage".to_string(),
        )]);
        let config = Config::default();
        let mut settings = CacheSettings::from(&config);
        settings.path = None;
        let client = HttpClient::with_transport(
            &config,
            transport.clone(),
            Arc::new(ResponseCache::new(settings)),
        );
        let service = SearchService::with_client(client, &config);
        let results = vec![SearchResult {
            title: "A".to_string(),
            url: "https://a.test/".to_string(),
            description: "first".to_string(),
        }];

        // invalid answer, open #1, then quit
        let input: &[u8] = b"9\n1\nq\n";
        let mut lines = BufReader::new(input).lines();
        run_prompt(&results, &service, &mut lines).await.unwrap();

        assert_eq!(transport.sockets_opened(), 1);
        assert!(lines.next_line().await.unwrap().is_none());
    }
}
