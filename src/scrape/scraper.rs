use super::report::{BatchSummary, ProductReport};
use crate::config::{Config, DownloadConfig, SessionConfig};
use crate::download::{AssetDownloader, AssetTask, AuthContext};
use crate::extract::{
    find_asset_links, find_document_links, find_primary_image, AssetLink, DocumentLink,
    ExtractionRecord, FieldExtractor, PageSnapshot,
};
use crate::naming::{ComposedName, NameComposer};
use crate::session::{Locator, PageSession, SessionFactory};
use crate::vendor::{Vendor, VendorGrammar};
use crate::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::Instant;
use url::Url;

/// File name of the full-page screenshot saved in every product folder
pub const SCREENSHOT_FILE_NAME: &str = "screenshot.png";

/// Controls that reveal the technical specification panel
const SPEC_PANEL_CONTROLS: &str = "button, a";
const SPEC_PANEL_TEXT: &str = "Especificações";

/// Everything read from one rendered product page
#[derive(Debug, Clone)]
pub struct PageAnalysis {
    pub record: ExtractionRecord,
    pub name: ComposedName,
    pub primary_image: Option<String>,
    pub assets: Vec<AssetLink>,
    pub documents: Vec<DocumentLink>,
}

/// Per-URL pipeline: navigate, extract, name, download
pub struct ProductScraper {
    session: SessionConfig,
    download: DownloadConfig,
    downloader: AssetDownloader,
    composer: NameComposer,
    extractor: FieldExtractor,
    output_root: PathBuf,
    default_vendor: Vendor,
}

impl ProductScraper {
    /// Creates a scraper writing product folders under `output_root`
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    /// * `output_root` - Directory that receives one folder per product
    ///
    /// # Returns
    ///
    /// * `Ok(ProductScraper)` - Ready to process URLs
    /// * `Err(HarvestError)` - The download client could not be built
    pub fn new(config: &Config, output_root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            session: config.session.clone(),
            download: config.download.clone(),
            downloader: AssetDownloader::new(&config.download)?,
            composer: NameComposer::new(&config.naming),
            extractor: FieldExtractor::new(),
            output_root: output_root.into(),
            default_vendor: Vendor::Villagres,
        })
    }

    /// Vendor assumed for URLs whose host matches no known vendor
    pub fn with_default_vendor(mut self, vendor: Vendor) -> Self {
        self.default_vendor = vendor;
        self
    }

    pub fn vendor_for(&self, url: &str) -> Vendor {
        Vendor::from_url(url).unwrap_or(self.default_vendor)
    }

    /// Extracts fields, composes the name and lists assets of a page source
    ///
    /// Synchronous on purpose: the parsed document never crosses an await.
    pub fn analyze(
        &self,
        source: &str,
        page_url: &Url,
        vendor: Vendor,
        now: DateTime<Utc>,
    ) -> PageAnalysis {
        let page = PageSnapshot::parse(source, page_url.clone(), vendor).with_captured_at(now);
        let record = self.extractor.extract(&page);
        let name = self.composer.compose(&record, page_url, now);

        let documents = match vendor.grammar() {
            VendorGrammar::Flat => find_document_links(&page),
            VendorGrammar::Hierarchical => Vec::new(),
        };

        PageAnalysis {
            primary_image: find_primary_image(&page),
            assets: find_asset_links(&page),
            documents,
            record,
            name,
        }
    }

    /// Processes one product URL with an open session
    ///
    /// # Arguments
    ///
    /// * `session` - Session used for this URL only
    /// * `url` - The product page
    ///
    /// # Returns
    ///
    /// * `Ok(ProductReport)` - The page was processed; individual asset
    ///   failures are recorded in the report
    /// * `Err(HarvestError)` - The page could not be loaded or its folder
    ///   could not be created
    pub async fn scrape_product(
        &self,
        session: &mut dyn PageSession,
        url: &str,
    ) -> Result<ProductReport> {
        let started = Instant::now();
        let vendor = self.vendor_for(url);
        let page_url = Url::parse(url)?;

        session.navigate(url).await?;
        if let Err(e) = session
            .wait_for_network_idle(self.session.network_idle_timeout())
            .await
        {
            tracing::warn!("Page did not settle for {}: {}", url, e);
        }
        self.open_spec_panel(session).await;

        let source = session.page_source().await?;
        let analysis = self.analyze(&source, &page_url, vendor, Utc::now());

        let folder = self.output_root.join(analysis.name.folder_name());
        tokio::fs::create_dir_all(&folder).await?;
        tracing::info!("Product folder: {}", folder.display());
        for (field, value) in analysis.record.present() {
            tracing::info!("{}: {}", field, value);
        }

        let auth = self.auth_context(session, url).await;
        let mut downloads = Vec::new();

        match &analysis.primary_image {
            Some(image) => {
                let task = AssetTask::new(image.as_str(), &folder).with_auth(auth.clone());
                downloads.push(self.downloader.download(&task).await);
            }
            None => tracing::warn!("No product image found on {}", url),
        }

        let screenshot = self.capture_screenshot(session, &folder).await;

        for asset in &analysis.assets {
            let task = AssetTask::new(asset.url.as_str(), &folder)
                .with_file_name(analysis.name.asset_file_name(asset.kind, &asset.url))
                .with_auth(auth.clone());
            tracing::info!("Downloading {}: {}", asset.kind, asset.url);
            downloads.push(self.downloader.download(&task).await);
            tokio::time::sleep(self.download.asset_pause()).await;
        }

        for document in &analysis.documents {
            let task = AssetTask::new(document.url.as_str(), &folder)
                .with_file_name(document.file_name.as_str())
                .with_auth(auth.clone());
            tracing::info!("Downloading document: {}", document.url);
            downloads.push(self.downloader.download(&task).await);
        }

        Ok(ProductReport {
            url: url.to_string(),
            vendor,
            folder,
            record: analysis.record,
            downloads,
            screenshot,
            elapsed: started.elapsed(),
        })
    }

    /// Processes every URL with a fresh session each
    ///
    /// A failing URL is logged and counted; the batch always continues.
    pub async fn run_batch(&self, factory: &dyn SessionFactory, urls: &[String]) -> BatchSummary {
        let batch_started = Instant::now();
        let mut summary = BatchSummary::new(urls.len());

        for (index, url) in urls.iter().enumerate() {
            tracing::info!("[{}/{}] Processing: {}", index + 1, urls.len(), url);
            let started = Instant::now();

            let mut session = match factory.open().await {
                Ok(session) => session,
                Err(e) => {
                    tracing::error!("Could not open a session for {}: {}", url, e);
                    summary.record_failure(url);
                    continue;
                }
            };

            let result = self.scrape_product(session.as_mut(), url).await;
            if let Err(e) = session.close().await {
                tracing::warn!("Failed to close session: {}", e);
            }

            match result {
                Ok(report) => summary.record(&report),
                Err(e) => {
                    tracing::error!("Error processing {}: {}", url, e);
                    summary.record_failure(url);
                }
            }
            tracing::info!(
                "Processed {} in {:.2}s",
                url,
                started.elapsed().as_secs_f64()
            );
        }

        summary.elapsed = batch_started.elapsed();
        summary
    }

    /// Clicks the "Especificações" control if the page has one
    async fn open_spec_panel(&self, session: &mut dyn PageSession) {
        let locator = Locator::css_with_text(SPEC_PANEL_CONTROLS, SPEC_PANEL_TEXT);
        match session
            .click_when_clickable(&locator, self.session.spec_panel_timeout())
            .await
        {
            Ok(true) => {
                tracing::debug!("Opened specification panel");
                tokio::time::sleep(self.session.spec_panel_settle()).await;
            }
            Ok(false) => tracing::debug!("No specification panel control"),
            Err(e) => tracing::warn!("Could not open specification panel: {}", e),
        }
    }

    async fn auth_context(&self, session: &mut dyn PageSession, referer: &str) -> AuthContext {
        let cookies = session.cookies().await.unwrap_or_else(|e| {
            tracing::warn!("Could not read session cookies: {}", e);
            Vec::new()
        });
        let user_agent = match session.user_agent().await {
            Ok(agent) if !agent.trim().is_empty() => Some(agent),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("User-Agent unavailable: {}", e);
                None
            }
        };

        AuthContext {
            cookies,
            user_agent,
            referer: Some(referer.to_string()),
        }
    }

    async fn capture_screenshot(
        &self,
        session: &mut dyn PageSession,
        folder: &Path,
    ) -> Option<PathBuf> {
        if let Err(e) = session.scroll_to_bottom().await {
            tracing::debug!("Scroll before screenshot failed: {}", e);
        }
        tokio::time::sleep(self.session.scroll_settle()).await;

        let path = folder.join(SCREENSHOT_FILE_NAME);
        match session.screenshot(&path).await {
            Ok(()) => {
                tracing::info!("Screenshot saved to {}", path.display());
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Screenshot failed: {}", e);
                None
            }
        }
    }
}
