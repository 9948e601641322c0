//! HTML to plain text flattening.
//!
//! Visible text nodes are concatenated in document order. Block-level
//! elements end with a word break, and every whitespace run collapses to a
//! single space, so the same markup always flattens to the same string.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node};
use tracing::{debug, instrument};

/// Elements whose content is never visible.
const HIDDEN_TAGS: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Elements that end with a word break.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Flatten an HTML document into its visible text.
#[instrument(skip_all, fields(html_len = html.len()))]
pub fn flatten(html: &str) -> String {
    let doc = Html::parse_document(html);

    let mut raw = String::with_capacity(html.len() / 2);
    push_visible_text(doc.root_element(), &mut raw);

    let text = WHITESPACE_RUN.replace_all(&raw, " ").trim().to_string();
    debug!(text_len = text.len(), "flattened document");
    text
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if HIDDEN_TAGS.contains(&name) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    push_visible_text(child_el, out);
                }
            }
            _ => {}
        }
    }

    if BLOCK_TAGS.contains(&name) {
        out.push(' ');
    }
}
