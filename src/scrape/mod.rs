//! Product scraping
//!
//! This module contains the per-URL pipeline and the batch loop:
//! - Open a session, load the page and reveal the specification panel
//! - Extract fields, compose the folder name and save a screenshot
//! - Download the primary image, typed assets and technical documents

mod report;
mod scraper;

pub use report::{BatchSummary, ProductReport};
pub use scraper::{PageAnalysis, ProductScraper, SCREENSHOT_FILE_NAME};
