//! Page sessions
//!
//! This module defines the page session interface used by discovery and
//! scraping:
//! - Navigation with explicit, bounded waits
//! - Selector queries and clicks on controls
//! - Cookie and User-Agent access for authenticated downloads
//!
//! A plain-HTTP implementation is provided; browser-driven sessions plug
//! into the same traits.

mod http;
mod traits;

pub use http::{build_session_client, parse_cookie_header, HttpPageSession, HttpSessionFactory};
pub use traits::{
    Cookie, Element, Locator, PageSession, SessionFactory, SCROLL_TO_BOTTOM_SCRIPT,
    USER_AGENT_SCRIPT,
};

use crate::{HarvestError, Result};
use scraper::{Html, Selector};

/// Runs a CSS selector over an HTML document
///
/// Element text has its whitespace collapsed; attributes are copied as-is.
pub fn select_elements(html: &str, selector: &str) -> Result<Vec<Element>> {
    let parsed = Selector::parse(selector)
        .map_err(|e| HarvestError::Session(format!("invalid selector '{}': {:?}", selector, e)))?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&parsed)
        .map(|element| Element {
            tag: element.value().name().to_string(),
            text: element
                .text()
                .collect::<Vec<_>>()
                .join(" ")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
            attributes: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
        .collect())
}
