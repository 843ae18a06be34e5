use crate::vendor::Vendor;
use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::sanitize::collapse_whitespace;

/// Elements whose text never reaches the reader
const INVISIBLE_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

/// A parsed product page, captured once and then read by every strategy
///
/// The parsed document is not `Send`; build the snapshot, extract what is
/// needed and drop it before awaiting.
pub struct PageSnapshot {
    html: Html,
    source: String,
    url: Url,
    vendor: Vendor,
    captured_at: DateTime<Utc>,
}

impl PageSnapshot {
    /// Parses page source captured from `url`
    pub fn parse(source: &str, url: Url, vendor: Vendor) -> Self {
        Self {
            html: Html::parse_document(source),
            source: source.to_string(),
            url,
            vendor,
            captured_at: Utc::now(),
        }
    }

    /// Overrides the capture time used by timestamp placeholders
    pub fn with_captured_at(mut self, captured_at: DateTime<Utc>) -> Self {
        self.captured_at = captured_at;
        self
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// All elements matching `selector`; an invalid selector matches nothing
    pub fn select(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(parsed) => self.html.select(&parsed).collect(),
            Err(e) => {
                tracing::debug!("Invalid selector '{}': {:?}", selector, e);
                Vec::new()
            }
        }
    }

    /// First element matching `selector` whose text is non-empty
    pub fn first_text(&self, selector: &str) -> Option<String> {
        self.select(selector)
            .into_iter()
            .map(element_text)
            .find(|text| !text.is_empty())
    }

    /// First element matching `selector` that appears after `anchor` in
    /// document order (descendants of `anchor` included)
    pub fn next_matching<'a>(
        &'a self,
        anchor: ElementRef<'a>,
        selector: &str,
    ) -> Option<ElementRef<'a>> {
        let parsed = Selector::parse(selector).ok()?;
        self.html
            .tree
            .root()
            .descendants()
            .skip_while(|node| node.id() != anchor.id())
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|element| parsed.matches(element))
    }

    /// Trimmed, non-empty text nodes outside script and style elements
    pub fn visible_texts(&self) -> Vec<&str> {
        self.html
            .tree
            .root()
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let parent = node.parent()?;
                if let Some(element) = parent.value().as_element() {
                    if INVISIBLE_TAGS.contains(&element.name()) {
                        return None;
                    }
                }
                let trimmed = text.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            })
            .collect()
    }

    /// Resolves an attribute value against the page URL
    pub fn resolve(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        self.url.join(href).ok().map(String::from)
    }
}

/// Element text with whitespace collapsed
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Text nodes that are direct children of `element`, collapsed
pub fn own_text(element: ElementRef<'_>) -> String {
    let direct: Vec<&str> = element
        .children()
        .filter_map(|child| child.value().as_text().map(|text| &**text))
        .collect();
    collapse_whitespace(&direct.join(" "))
}
