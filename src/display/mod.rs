//! Terminal rendering of response bodies.
//!
//! The media type (the part of `content-type` before `;`) picks the renderer:
//! JSON is pretty-printed, HTML is reduced to readable text, anything else is
//! shown as received.

mod html;

use colored::*;

pub use html::html_to_text;

const JSON_MEDIA_TYPE: &str = "application/json";
const HTML_MEDIA_TYPE: &str = "text/html";

/// Renders `body` for the terminal according to `content_type`.
pub fn render_response(body: &str, content_type: Option<&str>) -> String {
    let media_type = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mt| mt.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if media_type.contains(JSON_MEDIA_TYPE) {
        render_json(body)
    } else if media_type.contains(HTML_MEDIA_TYPE) {
        format!("{}\n{}", "HTML Response:".cyan(), html_to_text(body))
    } else {
        body.to_string()
    }
}

fn render_json(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => {
            let pretty = serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string());
            format!("{}\n{}", "JSON Response:".cyan(), pretty.yellow())
        }
        Err(e) => {
            log::debug!("Response declared JSON but did not parse: {e}");
            format!("{}\n{}", "Failed to parse JSON response".red(), body)
        }
    }
}
