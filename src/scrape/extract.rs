//! Item extraction from page snapshots
//!
//! Each scroll iteration takes a fresh copy of the page HTML and parses it
//! here. Items are addressed only by their position within one snapshot, so
//! nothing from an earlier iteration can go stale.

use crate::scrape::sites::SiteProfile;
use crate::{ScrapeError, ScrapeResult};
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose boundaries start a new line of text
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Elements whose text is never rendered
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Per-item extraction faults
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// The item has no nested timestamp element
    MissingTimestamp { selector: String },
}

impl std::fmt::Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTimestamp { selector } => {
                write!(f, "no '{}' element inside item", selector)
            }
        }
    }
}

/// One item element as seen in a single snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    /// Position of the element within its snapshot
    pub index: usize,

    /// Rendered text, trimmed
    pub text: String,

    /// Timestamp lookup result; `Ok(None)` when the element exists but lacks
    /// the attribute
    pub timestamp: Result<Option<String>, ItemError>,
}

/// Compiled selectors for one site profile
#[derive(Debug)]
pub struct ItemExtractor {
    item: Selector,
    timestamp: Selector,
    timestamp_selector: String,
    timestamp_attribute: String,
}

impl ItemExtractor {
    /// Compiles the item selector and the profile's timestamp selector
    pub fn new(item_selector: &str, site: &SiteProfile) -> ScrapeResult<Self> {
        Ok(Self {
            item: parse_selector(item_selector)?,
            timestamp: parse_selector(site.timestamp_selector)?,
            timestamp_selector: site.timestamp_selector.to_string(),
            timestamp_attribute: site.timestamp_attribute.to_string(),
        })
    }

    /// Extracts every item element present in the given HTML, in document order
    pub fn extract(&self, html: &str) -> Vec<ItemSnapshot> {
        let document = Html::parse_document(html);

        document
            .select(&self.item)
            .enumerate()
            .map(|(index, element)| ItemSnapshot {
                index,
                text: rendered_text(element),
                timestamp: self.timestamp_of(element),
            })
            .collect()
    }

    fn timestamp_of(&self, element: ElementRef<'_>) -> Result<Option<String>, ItemError> {
        element
            .select(&self.timestamp)
            .next()
            .map(|time| time.value().attr(&self.timestamp_attribute).map(str::to_string))
            .ok_or_else(|| ItemError::MissingTimestamp {
                selector: self.timestamp_selector.clone(),
            })
    }
}

fn parse_selector(selector: &str) -> ScrapeResult<Selector> {
    Selector::parse(selector).map_err(|_| ScrapeError::InvalidSelector(selector.to_string()))
}

/// Approximates the browser's rendered text of an element
///
/// Whitespace runs collapse to one space, block-level elements start new
/// lines, blank lines are dropped, and the result is trimmed.
pub fn rendered_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();

    for node in element.descendants() {
        match node.value() {
            Node::Element(el) if BLOCK_ELEMENTS.contains(&el.name()) => raw.push('\n'),
            Node::Text(text) => {
                let hidden = node
                    .parent()
                    .and_then(|parent| parent.value().as_element().map(|el| el.name()))
                    .map(|name| HIDDEN_ELEMENTS.contains(&name))
                    .unwrap_or(false);
                if !hidden {
                    raw.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
                }
            }
            _ => {}
        }
    }

    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
