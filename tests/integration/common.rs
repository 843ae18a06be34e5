//! Shared fixtures

use async_trait::async_trait;
use catalog_harvest::config::{Config, DiscoveryConfig, DownloadConfig, SessionConfig};
use catalog_harvest::session::{
    select_elements, Cookie, Element, Locator, PageSession, SessionFactory,
};
use catalog_harvest::{HarvestError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Configuration with every pause and settle delay shortened for tests
pub fn create_test_config() -> Config {
    Config {
        session: SessionConfig {
            spec_panel_timeout_ms: 10,
            spec_panel_settle_ms: 0,
            scroll_settle_ms: 0,
            ..SessionConfig::default()
        },
        discovery: DiscoveryConfig {
            load_more_timeout_ms: 10,
            load_more_settle_ms: 0,
            scroll_settle_ms: 0,
            ..DiscoveryConfig::default()
        },
        download: DownloadConfig {
            retry_pause_ms: 10,
            asset_pause_ms: 0,
            request_timeout_secs: 5,
            ..DownloadConfig::default()
        },
        ..Config::default()
    }
}

/// A rendered-page stand-in serving canned HTML
///
/// Screenshots are written as small placeholder files so the folder
/// layout can be checked.
pub struct FixtureSession {
    pages: Arc<HashMap<String, String>>,
    current: Option<String>,
    closed: Arc<Mutex<usize>>,
}

impl FixtureSession {
    fn html(&self) -> Result<&str> {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .map(String::as_str)
            .ok_or_else(|| HarvestError::Session("no page loaded".to_string()))
    }
}

#[async_trait]
impl PageSession for FixtureSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        if !self.pages.contains_key(url) {
            return Err(HarvestError::Navigation {
                url: url.to_string(),
                message: "HTTP 404".to_string(),
            });
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn wait_for_network_idle(&mut self, _timeout: Duration) -> Result<()> {
        Ok(())
    }

    async fn execute_script(&mut self, _script: &str) -> Result<String> {
        Ok(String::new())
    }

    async fn query_selector_all(&mut self, selector: &str) -> Result<Vec<Element>> {
        select_elements(self.html()?, selector)
    }

    async fn click_when_clickable(
        &mut self,
        _locator: &Locator,
        _timeout: Duration,
    ) -> Result<bool> {
        Ok(false)
    }

    async fn page_source(&mut self) -> Result<String> {
        self.html().map(str::to_string)
    }

    fn current_url(&self) -> Option<&str> {
        self.current.as_deref()
    }

    async fn cookies(&mut self) -> Result<Vec<Cookie>> {
        Ok(vec![Cookie::new("PHPSESSID", "fixture")])
    }

    async fn screenshot(&mut self, path: &Path) -> Result<()> {
        std::fs::write(path, b"\x89PNG fixture")?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let mut closed = self.closed.lock().unwrap();
        *closed += 1;
        Ok(())
    }

    async fn user_agent(&mut self) -> Result<String> {
        Ok("FixtureAgent/1.0".to_string())
    }
}

/// Opens [`FixtureSession`]s over a shared page map and counts closes
#[derive(Default)]
pub struct FixtureFactory {
    pages: Arc<HashMap<String, String>>,
    closed: Arc<Mutex<usize>>,
}

impl FixtureFactory {
    pub fn new(pages: Vec<(String, String)>) -> Self {
        Self {
            pages: Arc::new(pages.into_iter().collect()),
            closed: Arc::new(Mutex::new(0)),
        }
    }

    pub fn session(&self) -> FixtureSession {
        FixtureSession {
            pages: Arc::clone(&self.pages),
            current: None,
            closed: Arc::clone(&self.closed),
        }
    }

    pub fn closed_sessions(&self) -> usize {
        *self.closed.lock().unwrap()
    }
}

#[async_trait]
impl SessionFactory for FixtureFactory {
    async fn open(&self) -> Result<Box<dyn PageSession>> {
        Ok(Box::new(self.session()))
    }
}
