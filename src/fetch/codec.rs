//! HTTP/1.1 wire codec.
//!
//! Requests are written by hand; responses are parsed from the complete byte
//! stream accumulated until the peer closed the connection.

use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::ParseError;
use crate::fetch::{Headers, Method, Response};

const CRLF: &str = "\r\n";
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

// Status line pattern, e.g. "HTTP/1.1 200 OK"
const STATUS_LINE_PATTERN: &str = r"^HTTP/\d\.\d (\d{3})(?:\s|$)";

static STATUS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(STATUS_LINE_PATTERN).expect("Failed to compile status line regex - this is a bug")
});

/// Serializes a request line and headers.
///
/// Produces `"<METHOD> <path><query> HTTP/1.1\r\n"`, one `"Name: value\r\n"`
/// line per header in map order, then the terminating empty line. An empty
/// path is sent as `/`. Values are written verbatim.
pub fn serialize_request(method: Method, path: &str, query: &str, headers: &Headers) -> Vec<u8> {
    let path = if path.is_empty() { "/" } else { path };
    let mut out = format!("{method} {path}{query} HTTP/1.1{CRLF}");
    for (name, value) in headers.iter() {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str(CRLF);
    }
    out.push_str(CRLF);
    out.into_bytes()
}

/// Parses a complete raw response.
///
/// The stream is split on the first `\r\n\r\n`; everything after it is the
/// body, including later blank-line sequences. Header lines are split on the
/// first `:`, names are trimmed and lower-cased, values trimmed. Lines without
/// a colon are ignored and the last duplicate wins.
///
/// # Errors
///
/// Returns [`ParseError::MalformedStatusLine`] when the first line carries no
/// `HTTP/x.y NNN` status or the code is outside `100..=599`.
pub fn parse_response(raw: &[u8]) -> Result<Response, ParseError> {
    let (head, body) = match find_subsequence(raw, HEADER_TERMINATOR) {
        Some(index) => (&raw[..index], &raw[index + HEADER_TERMINATOR.len()..]),
        None => (raw, &raw[raw.len()..]),
    };

    let head = String::from_utf8_lossy(head);
    let mut lines = head.split(CRLF);
    let status_line = lines.next().unwrap_or_default();
    let status_code = parse_status_line(status_line)?;

    let mut headers = Headers::new();
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        headers.insert(name.to_ascii_lowercase(), value.trim());
    }

    Ok(Response {
        status_code,
        headers,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

fn parse_status_line(line: &str) -> Result<u16, ParseError> {
    let malformed = || ParseError::MalformedStatusLine(line.to_string());
    let captures = STATUS_LINE.captures(line).ok_or_else(malformed)?;
    let code: u16 = captures[1].parse().map_err(|_| malformed())?;
    if !(100..=599).contains(&code) {
        return Err(malformed());
    }
    Ok(code)
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
