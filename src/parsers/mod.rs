pub mod price;
pub mod schema;

pub use price::*;
pub use schema::*;

use html_escape::decode_html_entities;
use scraper::ElementRef;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cleaned text content of an element, `None` when it is blank.
pub fn element_text(element: &ElementRef<'_>) -> Option<String> {
    non_empty(clean_text(&element.text().collect::<String>()))
}

/// Attribute value of an element, `None` when missing or blank.
pub fn element_attr(element: &ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .and_then(|value| non_empty(clean_text(value)))
}

pub fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
