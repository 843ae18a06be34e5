//! Page session over plain HTTP fetches
//!
//! Documents are taken as served: there is no script engine, so the
//! network is idle as soon as the body arrives, dynamic controls cannot be
//! clicked and screenshots cannot be taken. Product pages that render
//! server-side still extract fully through this session.

use crate::config::SessionConfig;
use crate::session::traits::{Cookie, Element, Locator, PageSession, SessionFactory};
use crate::session::select_elements;
use crate::{HarvestError, Result};
use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Builds the HTTP client used by page sessions
///
/// Cookies set by the catalog are kept in `jar` so they can later be
/// forwarded to authenticated asset downloads.
pub fn build_session_client(config: &SessionConfig, jar: Arc<Jar>) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .cookie_provider(jar)
        .timeout(config.page_timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

struct LoadedPage {
    url: Url,
    html: String,
}

/// A [`PageSession`] backed by `reqwest`
pub struct HttpPageSession {
    client: Client,
    jar: Arc<Jar>,
    user_agent: String,
    current: Option<LoadedPage>,
}

impl HttpPageSession {
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let jar = Arc::new(Jar::default());
        let client = build_session_client(config, jar.clone())?;

        Ok(Self {
            client,
            jar,
            user_agent: config.user_agent.clone(),
            current: None,
        })
    }

    fn loaded(&self) -> Result<&LoadedPage> {
        self.current
            .as_ref()
            .ok_or_else(|| HarvestError::Session("no page loaded".to_string()))
    }
}

#[async_trait]
impl PageSession for HttpPageSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let navigation_error = |message: String| HarvestError::Navigation {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(navigation_error(format!("HTTP {}", status.as_u16())));
        }

        let final_url = response.url().clone();
        let html = response
            .text()
            .await
            .map_err(|e| navigation_error(e.to_string()))?;

        tracing::debug!("Loaded {} ({} bytes)", final_url, html.len());
        self.current = Some(LoadedPage {
            url: final_url,
            html,
        });

        Ok(())
    }

    async fn wait_for_network_idle(&mut self, _timeout: Duration) -> Result<()> {
        self.loaded().map(|_| ())
    }

    async fn execute_script(&mut self, _script: &str) -> Result<String> {
        Err(HarvestError::Session(
            "script execution requires a browser-backed session".to_string(),
        ))
    }

    async fn query_selector_all(&mut self, selector: &str) -> Result<Vec<Element>> {
        select_elements(&self.loaded()?.html, selector)
    }

    async fn click_when_clickable(&mut self, locator: &Locator, _timeout: Duration) -> Result<bool> {
        let present = select_elements(&self.loaded()?.html, &locator.selector)?
            .iter()
            .any(|element| locator.accepts_text(&element.text));

        if present {
            tracing::debug!(
                "Control '{}' is present but static pages cannot be clicked",
                locator.selector
            );
        }

        Ok(false)
    }

    async fn page_source(&mut self) -> Result<String> {
        Ok(self.loaded()?.html.clone())
    }

    fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|page| page.url.as_str())
    }

    async fn cookies(&mut self) -> Result<Vec<Cookie>> {
        let url = &self.loaded()?.url;
        let header = self.jar.cookies(url);

        Ok(header
            .as_ref()
            .and_then(|value| value.to_str().ok())
            .map(parse_cookie_header)
            .unwrap_or_default())
    }

    async fn screenshot(&mut self, _path: &Path) -> Result<()> {
        Err(HarvestError::Session(
            "screenshots require a browser-backed session".to_string(),
        ))
    }

    async fn close(&mut self) -> Result<()> {
        self.current = None;
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        Ok(())
    }

    async fn user_agent(&mut self) -> Result<String> {
        Ok(self.user_agent.clone())
    }
}

/// Splits a `Cookie` request header into name/value pairs
pub fn parse_cookie_header(header: &str) -> Vec<Cookie> {
    header
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                None
            } else {
                Some(Cookie::new(name, value.trim()))
            }
        })
        .collect()
}

/// Opens an [`HttpPageSession`] per product URL
pub struct HttpSessionFactory {
    config: SessionConfig,
}

impl HttpSessionFactory {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionFactory for HttpSessionFactory {
    async fn open(&self) -> Result<Box<dyn PageSession>> {
        Ok(Box::new(HttpPageSession::new(&self.config)?))
    }
}
