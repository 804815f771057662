//! HTML to plain text.

use colored::*;
use scraper::{ElementRef, Html, Node};

/// Elements whose content is never shown.
const SKIPPED_ELEMENTS: &[&str] = &["head", "script", "style", "img", "noscript", "template"];

const HEADING_ELEMENTS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Elements rendered as their own paragraph.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "div", "dl", "dt", "fieldset",
    "figure", "footer", "form", "header", "hr", "main", "nav", "ol", "p", "pre", "section",
    "table", "ul",
];

/// Elements that start a new line without a blank line before them.
const LINE_ELEMENTS: &[&str] = &["br", "tr", "li"];

/// Extracts readable text from an HTML document.
///
/// Whitespace is collapsed, block elements are separated by blank lines,
/// headings are emphasized and list items bulleted (or numbered in `<ol>`). Links whose target differs
/// from their text are followed by the target in brackets.
pub fn html_to_text(body: &str) -> String {
    let document = Html::parse_document(body);
    let mut writer = TextWriter::default();
    walk(document.root_element(), &mut writer);
    writer.finish()
}

fn walk(element: ElementRef<'_>, writer: &mut TextWriter) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => writer.push_text(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    render_element(child, writer);
                }
            }
            _ => {}
        }
    }
}

fn render_element(element: ElementRef<'_>, writer: &mut TextWriter) {
    let name = element.value().name();

    if SKIPPED_ELEMENTS.contains(&name) {
        return;
    }

    if HEADING_ELEMENTS.contains(&name) {
        let text = collapse_whitespace(&element.text().collect::<String>());
        writer.block_break();
        if !text.is_empty() {
            writer.push_raw(&text.bold().cyan().to_string());
        }
        writer.block_break();
        return;
    }

    match name {
        "br" => writer.line_break(),
        "li" => {
            writer.line_break();
            writer.push_raw(&list_marker(element));
            walk(element, writer);
            writer.line_break();
        }
        "a" => {
            walk(element, writer);
            let text = collapse_whitespace(&element.text().collect::<String>());
            if let Some(href) = element.value().attr("href") {
                let href = href.trim();
                if !href.is_empty() && href != text && !href.starts_with('#') {
                    writer.push_text(" ");
                    writer.push_raw(&format!("[{href}]"));
                }
            }
        }
        _ if BLOCK_ELEMENTS.contains(&name) => {
            writer.block_break();
            walk(element, writer);
            writer.block_break();
        }
        _ if LINE_ELEMENTS.contains(&name) => {
            writer.line_break();
            walk(element, writer);
            writer.line_break();
        }
        _ => walk(element, writer),
    }
}

/// `"* "` for unordered items, `"N. "` for items of an `<ol>` (honouring `start`).
fn list_marker(item: ElementRef<'_>) -> String {
    let ordered = item
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|list| list.value().name() == "ol");
    match ordered {
        Some(list) => {
            let start = list
                .value()
                .attr("start")
                .and_then(|start| start.trim().parse::<i64>().ok())
                .unwrap_or(1);
            let preceding = item
                .prev_siblings()
                .filter_map(ElementRef::wrap)
                .filter(|sibling| sibling.value().name() == "li")
                .count();
            format!("{}. ", start.saturating_add(preceding as i64))
        }
        None => "* ".to_string(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Accumulates text with pending separators, so breaks and spaces never stack.
#[derive(Default)]
struct TextWriter {
    out: String,
    pending_space: bool,
    pending_newlines: usize,
}

impl TextWriter {
    fn push_text(&mut self, text: &str) {
        if text.starts_with(char::is_whitespace) {
            self.pending_space = true;
        }
        let mut words = text.split_whitespace().peekable();
        while let Some(word) = words.next() {
            self.flush_separator();
            self.out.push_str(word);
            self.pending_space = words.peek().is_some();
        }
        if text.ends_with(char::is_whitespace) {
            self.pending_space = true;
        }
    }

    fn push_raw(&mut self, text: &str) {
        self.flush_separator();
        self.out.push_str(text);
    }

    fn line_break(&mut self) {
        self.pending_newlines = self.pending_newlines.max(1);
    }

    fn block_break(&mut self) {
        self.pending_newlines = self.pending_newlines.max(2);
    }

    fn flush_separator(&mut self) {
        if self.out.is_empty() {
            // nothing to separate from
        } else if self.pending_newlines > 0 {
            while self.out.ends_with(' ') {
                self.out.pop();
            }
            let trailing = self.out.len() - self.out.trim_end_matches('\n').len();
            for _ in trailing..self.pending_newlines {
                self.out.push('\n');
            }
        } else if self.pending_space && !self.out.ends_with([' ', '\n']) {
            self.out.push(' ');
        }
        self.pending_space = false;
        self.pending_newlines = 0;
    }

    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }
}
