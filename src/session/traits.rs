use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Script that scrolls the page to the bottom
pub const SCROLL_TO_BOTTOM_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Script that reports the browser's User-Agent
pub const USER_AGENT_SCRIPT: &str = "return navigator.userAgent;";

/// A cookie read from the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A snapshot of one element matched by a selector
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Lower-case tag name
    pub tag: String,
    /// Visible text with whitespace collapsed
    pub text: String,
    /// Attribute name → value
    pub attributes: HashMap<String, String>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Locates a clickable control: a CSS selector, optionally narrowed to
/// elements whose text contains a fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub selector: String,
    pub text: Option<String>,
}

impl Locator {
    pub fn css(selector: &str) -> Self {
        Self {
            selector: selector.to_string(),
            text: None,
        }
    }

    pub fn css_with_text(selector: &str, text: &str) -> Self {
        Self {
            selector: selector.to_string(),
            text: Some(text.to_string()),
        }
    }

    /// Whether an element with the given text satisfies the text filter
    pub fn accepts_text(&self, text: &str) -> bool {
        match &self.text {
            Some(fragment) => text.to_lowercase().contains(&fragment.to_lowercase()),
            None => true,
        }
    }
}

/// A page session: one rendered page at a time
///
/// Every operation that waits is bounded by an explicit timeout. A session
/// is opened once per product URL and closed even when processing fails.
#[async_trait]
pub trait PageSession: Send {
    /// Loads a URL; fails with `HarvestError::Navigation` if the page does not load
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Waits until the page has no outstanding network activity
    async fn wait_for_network_idle(&mut self, timeout: Duration) -> Result<()>;

    /// Runs a script in the page and returns its result as text
    async fn execute_script(&mut self, script: &str) -> Result<String>;

    /// Returns every element matching a CSS selector, in document order
    async fn query_selector_all(&mut self, selector: &str) -> Result<Vec<Element>>;

    /// Clicks the first matching control once it is visible and clickable
    ///
    /// Returns `Ok(false)` when no such control appears within `timeout`.
    async fn click_when_clickable(&mut self, locator: &Locator, timeout: Duration) -> Result<bool>;

    /// Serialized DOM of the current page
    async fn page_source(&mut self) -> Result<String>;

    /// URL of the current page after redirects
    fn current_url(&self) -> Option<&str>;

    /// Cookies visible to the current page
    async fn cookies(&mut self) -> Result<Vec<Cookie>>;

    /// Saves a full-page screenshot as PNG
    async fn screenshot(&mut self, path: &Path) -> Result<()>;

    /// Releases the session
    async fn close(&mut self) -> Result<()>;

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.execute_script(SCROLL_TO_BOTTOM_SCRIPT).await.map(|_| ())
    }

    async fn user_agent(&mut self) -> Result<String> {
        self.execute_script(USER_AGENT_SCRIPT).await
    }
}

/// Opens a fresh session for each product URL
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self) -> Result<Box<dyn PageSession>>;
}
