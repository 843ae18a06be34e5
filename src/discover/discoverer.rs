//! Catalog link discovery
//!
//! Walks a vendor catalog with a page session and collects every product
//! URL it can reach:
//! - Hierarchical catalogs: root → collections → subcollections → products
//! - Flat catalogs: one listing, expanded by clicking "load more" until
//!   the control disappears

use crate::config::DiscoveryConfig;
use crate::session::{Locator, PageSession};
use crate::url::{resolve_link, Level, UrlClassifier};
use crate::vendor::{Vendor, VendorGrammar};
use crate::Result;
use std::collections::{BTreeSet, HashSet};
use std::time::Duration;
use url::Url;

/// Default wait for network idle after each navigation
const NETWORK_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one discovery run
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// Product URLs, sorted ascending and free of duplicates
    pub product_urls: Vec<String>,

    /// Collections whose pages were loaded
    pub collections_visited: usize,

    /// Subcollections whose pages were loaded
    pub subcollections_visited: usize,

    /// "Load more" clicks performed on a flat listing
    pub load_more_clicks: u32,

    /// Pages that failed to load; their branches were skipped
    pub failed_pages: Vec<String>,
}

/// Discovers product URLs below a catalog root
pub struct LinkDiscoverer<'a> {
    session: &'a mut dyn PageSession,
    classifier: UrlClassifier,
    config: DiscoveryConfig,
    network_idle_timeout: Duration,
    listing_selector: String,
    link_filter: String,
    load_more: Option<Locator>,
    visited: HashSet<String>,
}

impl<'a> LinkDiscoverer<'a> {
    /// Creates a discoverer that harvests every `/produtos/` anchor
    pub fn new(
        session: &'a mut dyn PageSession,
        classifier: UrlClassifier,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            session,
            classifier,
            config,
            network_idle_timeout: NETWORK_IDLE_TIMEOUT,
            listing_selector: "a[href]".to_string(),
            link_filter: "/produtos/".to_string(),
            load_more: None,
            visited: HashSet::new(),
        }
    }

    /// Creates a discoverer with a vendor's selectors and URL grammar
    pub fn for_vendor(
        session: &'a mut dyn PageSession,
        vendor: Vendor,
        root_url: &str,
        config: DiscoveryConfig,
    ) -> Result<Self> {
        let classifier = UrlClassifier::for_root_url(root_url, vendor.grammar())?;
        let mut discoverer = Self::new(session, classifier, config)
            .with_listing(vendor.listing_selector(), vendor.link_filter());
        discoverer.load_more = vendor.load_more_selector().map(Locator::css);
        Ok(discoverer)
    }

    /// Overrides the anchor selector and the substring links must contain
    pub fn with_listing(mut self, selector: &str, link_filter: &str) -> Self {
        self.listing_selector = selector.to_string();
        self.link_filter = link_filter.to_string();
        self
    }

    pub fn with_network_idle_timeout(mut self, timeout: Duration) -> Self {
        self.network_idle_timeout = timeout;
        self
    }

    /// Runs discovery from the catalog root
    ///
    /// Never fails as a whole: a page that cannot be loaded only removes
    /// its own branch and is recorded in [`DiscoveryReport::failed_pages`].
    pub async fn discover(&mut self, root_url: &str) -> DiscoveryReport {
        let mut report = DiscoveryReport::default();

        let products = match self.classifier.grammar() {
            VendorGrammar::Hierarchical => self.discover_hierarchy(root_url, &mut report).await,
            VendorGrammar::Flat => self.discover_listing(root_url, &mut report).await,
        };

        report.product_urls = products.into_iter().collect();
        tracing::info!(
            "Discovery finished: {} products, {} collections, {} subcollections, {} failed pages",
            report.product_urls.len(),
            report.collections_visited,
            report.subcollections_visited,
            report.failed_pages.len()
        );

        report
    }

    async fn discover_hierarchy(
        &mut self,
        root_url: &str,
        report: &mut DiscoveryReport,
    ) -> BTreeSet<String> {
        let mut products = BTreeSet::new();

        let collections = match self.visit(root_url, false).await {
            Ok(links) => self.keep_level(links, Level::Collection),
            Err(e) => {
                tracing::error!("Failed to load catalog root {}: {}", root_url, e);
                report.failed_pages.push(root_url.to_string());
                return products;
            }
        };
        tracing::info!("{} collections found", collections.len());

        for collection in collections {
            if !self.visited.insert(collection.clone()) {
                continue;
            }

            tracing::info!("Processing collection: {}", collection);
            let subcollections = match self.visit(&collection, true).await {
                Ok(links) => self.keep_level(links, Level::Subcollection),
                Err(e) => {
                    tracing::warn!("Skipping collection {}: {}", collection, e);
                    report.failed_pages.push(collection);
                    continue;
                }
            };
            report.collections_visited += 1;
            tracing::info!("{} subcollections found in {}", subcollections.len(), collection);

            for subcollection in subcollections {
                if !self.visited.insert(subcollection.clone()) {
                    continue;
                }

                tracing::info!("Processing subcollection: {}", subcollection);
                let found = match self.visit(&subcollection, true).await {
                    Ok(links) => self.keep_level(links, Level::Product),
                    Err(e) => {
                        tracing::warn!("Skipping subcollection {}: {}", subcollection, e);
                        report.failed_pages.push(subcollection);
                        continue;
                    }
                };
                report.subcollections_visited += 1;

                if found.is_empty() {
                    tracing::warn!("No products found in {}", subcollection);
                } else {
                    tracing::info!("{} products found in {}", found.len(), subcollection);
                }
                products.extend(found);
            }
        }

        products
    }

    async fn discover_listing(
        &mut self,
        root_url: &str,
        report: &mut DiscoveryReport,
    ) -> BTreeSet<String> {
        if let Err(e) = self.load(root_url).await {
            tracing::error!("Failed to load catalog listing {}: {}", root_url, e);
            report.failed_pages.push(root_url.to_string());
            return BTreeSet::new();
        }

        report.load_more_clicks = self.expand_listing().await;

        match self.collect_links().await {
            Ok(links) => self.keep_level(links, Level::Product),
            Err(e) => {
                tracing::error!("Failed to read listing {}: {}", root_url, e);
                report.failed_pages.push(root_url.to_string());
                BTreeSet::new()
            }
        }
    }

    /// Clicks "load more" until the control disappears or the click bound is hit
    async fn expand_listing(&mut self) -> u32 {
        let Some(locator) = self.load_more.clone() else {
            return 0;
        };

        let mut clicks = 0;
        loop {
            if clicks >= self.config.max_load_more_clicks {
                tracing::warn!(
                    "Stopped after {} 'load more' clicks; the listing may be incomplete",
                    clicks
                );
                break;
            }

            match self
                .session
                .click_when_clickable(&locator, self.config.load_more_timeout())
                .await
            {
                Ok(true) => {
                    clicks += 1;
                    tracing::info!("Clicked 'load more' ({})", clicks);
                    tokio::time::sleep(self.config.load_more_settle()).await;
                }
                Ok(false) => {
                    tracing::info!("No more 'load more' controls");
                    break;
                }
                Err(e) => {
                    tracing::warn!("'load more' control failed: {}", e);
                    break;
                }
            }
        }

        clicks
    }

    async fn load(&mut self, url: &str) -> Result<()> {
        self.session.navigate(url).await?;
        self.session
            .wait_for_network_idle(self.network_idle_timeout)
            .await
    }

    /// Loads a page and returns the catalog links on it
    async fn visit(&mut self, url: &str, scroll: bool) -> Result<Vec<String>> {
        self.load(url).await?;

        if scroll {
            if let Err(e) = self.session.scroll_to_bottom().await {
                tracing::debug!("Scroll failed on {}: {}", url, e);
            }
            tokio::time::sleep(self.config.scroll_settle()).await;
        }

        self.collect_links().await
    }

    /// Absolute hrefs of listing anchors containing the link filter
    async fn collect_links(&mut self) -> Result<Vec<String>> {
        let base = self.session.current_url().map(Url::parse).transpose()?;
        let elements = self.session.query_selector_all(&self.listing_selector).await?;

        Ok(elements
            .iter()
            .filter_map(|element| element.attr("href"))
            .filter_map(|href| match &base {
                Some(base) => resolve_link(href, base),
                None => Url::parse(href.trim()).ok().map(|url| url.to_string()),
            })
            .filter(|url| url.contains(&self.link_filter))
            .collect())
    }

    fn keep_level(&self, links: Vec<String>, level: Level) -> BTreeSet<String> {
        links
            .into_iter()
            .filter(|link| self.classifier.classify(link) == level)
            .collect()
    }
}
