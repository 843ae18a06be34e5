use crate::download::DownloadOutcome;
use crate::extract::ExtractionRecord;
use crate::vendor::Vendor;
use std::path::PathBuf;
use std::time::Duration;

/// Result of processing one product URL
#[derive(Debug, Clone)]
pub struct ProductReport {
    pub url: String,
    pub vendor: Vendor,
    pub folder: PathBuf,
    pub record: ExtractionRecord,
    pub downloads: Vec<DownloadOutcome>,
    pub screenshot: Option<PathBuf>,
    pub elapsed: Duration,
}

impl ProductReport {
    pub fn downloads_succeeded(&self) -> usize {
        self.downloads.iter().filter(|d| d.success).count()
    }

    pub fn downloads_failed(&self) -> usize {
        self.downloads.len() - self.downloads_succeeded()
    }
}

/// Totals of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// URLs in the input list
    pub total: usize,

    /// URLs processed to completion
    pub processed: usize,

    /// URLs abandoned, in input order
    pub failed_urls: Vec<String>,

    pub downloads_succeeded: usize,
    pub downloads_failed: usize,
    pub screenshots: usize,

    /// Wall-clock time of the whole batch
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, report: &ProductReport) {
        self.processed += 1;
        self.downloads_succeeded += report.downloads_succeeded();
        self.downloads_failed += report.downloads_failed();
        if report.screenshot.is_some() {
            self.screenshots += 1;
        }
    }

    pub fn record_failure(&mut self, url: &str) {
        self.failed_urls.push(url.to_string());
    }

    /// Mean wall-clock time per input URL
    pub fn average_per_url(&self) -> Duration {
        match u32::try_from(self.total) {
            Ok(0) | Err(_) => Duration::ZERO,
            Ok(total) => self.elapsed / total,
        }
    }
}
