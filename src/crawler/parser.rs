//! HTML parser for extracting page content
//!
//! This module handles parsing HTML content to extract:
//! - Page title
//! - Visible text
//! - Raw link targets from anchor tags

use scraper::{Html, Node, Selector};

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "title", "noscript", "template"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Visible text nodes joined by spaces
    pub text: String,

    /// Raw `href` values of every anchor, unresolved
    pub links: Vec<String>,
}

/// Parses HTML content into title, visible text and link targets
///
/// Links are returned exactly as written; resolving them against the page
/// directory and validating them is the crawl engine's job.
///
/// # Example
///
/// ```
/// use quarry::crawler::parse_page;
///
/// let html = r#"<html><head><title>Test</title></head><body>Hello <a href="next.htm">next</a></body></html>"#;
/// let parsed = parse_page(html);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["next.htm".to_string()]);
/// assert_eq!(parsed.text, "Hello next");
/// ```
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        text: extract_text(&document),
        links: extract_links(&document),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects text nodes that are not inside a hidden element
fn extract_text(document: &Html) -> String {
    let mut pieces = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            pieces.push(trimmed);
        }
    }

    pieces.join(" ")
}

/// Extracts the href of every anchor in document order
fn extract_links(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect()
}
