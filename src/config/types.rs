use crate::vendor::Vendor;
use serde::Deserialize;
use std::time::Duration;

/// Browser-like identity forwarded with every request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Grace delay after opening the technical specifications panel
pub const SPEC_PANEL_SETTLE_MS: u64 = 2000;

/// Grace delay after scrolling a product page before the screenshot
pub const SCREENSHOT_SCROLL_SETTLE_MS: u64 = 1000;

/// Grace delay after clicking "load more" on a paginated listing
pub const LOAD_MORE_SETTLE_MS: u64 = 1000;

/// Grace delay after scrolling a collection page so lazy anchors render
pub const LISTING_SCROLL_SETTLE_MS: u64 = 500;

/// Pause between a failed download attempt and the next one
pub const RETRY_PAUSE_MS: u64 = 1000;

/// Pause between consecutive technical asset downloads
pub const ASSET_PAUSE_MS: u64 = 1000;

/// Main configuration structure for Catalog-Harvest
///
/// Every section is optional; a missing file or section yields the
/// built-in defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default, rename = "vendor")]
    pub vendors: Vec<VendorEntry>,
    #[serde(default = "default_categories", rename = "category")]
    pub categories: Vec<CategoryEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            discovery: DiscoveryConfig::default(),
            download: DownloadConfig::default(),
            naming: NamingConfig::default(),
            vendors: Vec::new(),
            categories: default_categories(),
        }
    }
}

impl Config {
    fn vendor_entry(&self, vendor: Vendor) -> Option<&VendorEntry> {
        self.vendors.iter().find(|entry| entry.name == vendor)
    }

    /// Catalog root URL for a vendor, honoring overrides
    pub fn root_url(&self, vendor: Vendor) -> String {
        self.vendor_entry(vendor)
            .and_then(|entry| entry.root_url.clone())
            .unwrap_or_else(|| vendor.default_root_url().to_string())
    }

    /// Link file for a vendor, honoring overrides
    pub fn link_file(&self, vendor: Vendor) -> String {
        self.vendor_entry(vendor)
            .and_then(|entry| entry.link_file.clone())
            .unwrap_or_else(|| vendor.default_link_file().to_string())
    }
}

/// Page session behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// User-Agent sent by the page session
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Maximum time for a page navigation (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Maximum wait for the network to go idle after navigation (milliseconds)
    #[serde(rename = "network-idle-timeout-ms")]
    pub network_idle_timeout_ms: u64,

    /// Maximum wait for the specifications control to become clickable (milliseconds)
    #[serde(rename = "spec-panel-timeout-ms")]
    pub spec_panel_timeout_ms: u64,

    /// Settle delay after opening the specifications panel (milliseconds)
    #[serde(rename = "spec-panel-settle-ms")]
    pub spec_panel_settle_ms: u64,

    /// Settle delay after scrolling before the screenshot (milliseconds)
    #[serde(rename = "scroll-settle-ms")]
    pub scroll_settle_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            page_timeout_secs: 30,
            network_idle_timeout_ms: 10_000,
            spec_panel_timeout_ms: 3000,
            spec_panel_settle_ms: SPEC_PANEL_SETTLE_MS,
            scroll_settle_ms: SCREENSHOT_SCROLL_SETTLE_MS,
        }
    }
}

impl SessionConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn network_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.network_idle_timeout_ms)
    }

    pub fn spec_panel_timeout(&self) -> Duration {
        Duration::from_millis(self.spec_panel_timeout_ms)
    }

    pub fn spec_panel_settle(&self) -> Duration {
        Duration::from_millis(self.spec_panel_settle_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }
}

/// Link discovery configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Maximum wait for the "load more" control to become clickable (milliseconds)
    #[serde(rename = "load-more-timeout-ms")]
    pub load_more_timeout_ms: u64,

    /// Settle delay after each "load more" click (milliseconds)
    #[serde(rename = "load-more-settle-ms")]
    pub load_more_settle_ms: u64,

    /// Safety bound on "load more" clicks per listing
    #[serde(rename = "max-load-more-clicks")]
    pub max_load_more_clicks: u32,

    /// Settle delay after scrolling a collection page (milliseconds)
    #[serde(rename = "scroll-settle-ms")]
    pub scroll_settle_ms: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            load_more_timeout_ms: 5000,
            load_more_settle_ms: LOAD_MORE_SETTLE_MS,
            max_load_more_clicks: 500,
            scroll_settle_ms: LISTING_SCROLL_SETTLE_MS,
        }
    }
}

impl DiscoveryConfig {
    pub fn load_more_timeout(&self) -> Duration {
        Duration::from_millis(self.load_more_timeout_ms)
    }

    pub fn load_more_settle(&self) -> Duration {
        Duration::from_millis(self.load_more_settle_ms)
    }

    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }
}

/// Asset download configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Attempts per asset, including the first
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Pause after a failed attempt (milliseconds)
    #[serde(rename = "retry-pause-ms")]
    pub retry_pause_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Pause between consecutive technical assets (milliseconds)
    #[serde(rename = "asset-pause-ms")]
    pub asset_pause_ms: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_pause_ms: RETRY_PAUSE_MS,
            request_timeout_secs: 30,
            asset_pause_ms: ASSET_PAUSE_MS,
        }
    }
}

impl DownloadConfig {
    pub fn retry_pause(&self) -> Duration {
        Duration::from_millis(self.retry_pause_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn asset_pause(&self) -> Duration {
        Duration::from_millis(self.asset_pause_ms)
    }
}

/// Folder naming configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Maximum composed name length (characters)
    #[serde(rename = "max-length")]
    pub max_length: usize,

    /// Composed names shorter than this are replaced by a fallback
    #[serde(rename = "min-length")]
    pub min_length: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            max_length: 150,
            min_length: 3,
        }
    }
}

/// Per-vendor overrides
#[derive(Debug, Clone, Deserialize)]
pub struct VendorEntry {
    /// Vendor identifier ("villagres" or "biancogres")
    pub name: Vendor,

    /// Catalog root URL
    #[serde(default, rename = "root-url")]
    pub root_url: Option<String>,

    /// Output file for discovered links and default scrape input
    #[serde(default, rename = "link-file")]
    pub link_file: Option<String>,
}

/// One row of the organizer's keyword table; table order is precedence order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryEntry {
    /// Category folder name
    pub name: String,

    /// Upper-case substrings that select this category
    pub keywords: Vec<String>,
}

impl CategoryEntry {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Built-in keyword table
pub fn default_categories() -> Vec<CategoryEntry> {
    vec![
        CategoryEntry::new("EXTERNO", &["EXTERNO", "EXT"]),
        CategoryEntry::new("POLIDO", &["POLIDO"]),
        CategoryEntry::new("ACETINADO", &["ACETINADO"]),
        CategoryEntry::new("NATURAL", &["NATURAL"]),
        CategoryEntry::new("DECOR", &["DECOR", "DECORACAO"]),
        CategoryEntry::new("VINILICO", &["VINILICO"]),
    ]
}
