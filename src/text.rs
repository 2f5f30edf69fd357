//! # Text Extraction
//!
//! Converts a fragment of markup into plain text while keeping paragraph and
//! list boundaries as line breaks, so the classifier sees the description the
//! way a reader would.
//!
//! The walk runs over the crate's own [`Node`] tree rather than over a parser
//! API. [`Node::from_element`] lowers a `scraper` element into that tree.
//!
//! Rules:
//! - a text node contributes its trimmed content plus one space, or nothing
//!   when it is blank;
//! - an element contributes its children, then a newline if its tag is a
//!   block tag;
//! - `script` and `style` contribute nothing;
//! - the final result is trimmed, inner whitespace of a text run is kept.

use scraper::{ElementRef, Html, Selector};

use crate::feed::FetchError;

/// Tags that end with a line break
const BLOCK_TAGS: [&str; 11] = [
    "p", "br", "div", "ul", "li", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Tags whose children are not content
const SKIPPED_TAGS: [&str; 2] = ["script", "style"];

/// A minimal markup tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A run of character data
    Text(String),

    /// An element with its tag name and child nodes
    Element {
        /// Lowercase tag name
        tag: String,
        /// Child nodes in document order
        children: Vec<Node>,
    },
}

impl Node {
    /// Create a text node
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Create an element node
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.into(),
            children,
        }
    }

    /// Lower a parsed `scraper` element into a `Node` tree
    ///
    /// Comments, doctypes and processing instructions are dropped.
    pub fn from_element(element: ElementRef<'_>) -> Self {
        let children = element
            .children()
            .filter_map(|child| match child.value() {
                scraper::Node::Text(text) => Some(Node::Text(String::from(&**text))),
                scraper::Node::Element(_) => ElementRef::wrap(child).map(Node::from_element),
                _ => None,
            })
            .collect();

        Node::Element {
            tag: element.value().name().to_ascii_lowercase(),
            children,
        }
    }
}

/// Extract the plain text of a fragment's content nodes
pub fn extract_text(root: &Node) -> String {
    let mut out = String::new();
    if let Node::Element { children, .. } = root {
        for child in children {
            walk(child, &mut out);
        }
    } else {
        walk(root, &mut out);
    }
    out.trim().to_string()
}

fn walk(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push_str(trimmed);
                out.push(' ');
            }
        }
        Node::Element { tag, children } => {
            if SKIPPED_TAGS.contains(&tag.as_str()) {
                return;
            }
            for child in children {
                walk(child, out);
            }
            if BLOCK_TAGS.contains(&tag.as_str()) {
                out.push('\n');
            }
        }
    }
}

/// Extract the text of the first element in `html` matching `selector`
///
/// Returns an empty string when no element matches.
pub fn extract_container_text(html: &str, selector: &str) -> Result<String, FetchError> {
    let selector = Selector::parse(selector)
        .map_err(|e| FetchError::HtmlParse(format!("Invalid selector '{}': {}", selector, e)))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .next()
        .map(|container| extract_text(&Node::from_element(container)))
        .unwrap_or_default())
}
