//! Product link discovery
//!
//! This module contains the catalog traversal that feeds the scraper:
//! - Level-by-level descent through hierarchical catalogs
//! - "Load more" pagination of flat listings
//! - Persisting the sorted product list to the link file

mod discoverer;

pub use discoverer::{DiscoveryReport, LinkDiscoverer};

use crate::config::Config;
use crate::output::write_link_file;
use crate::session::PageSession;
use crate::vendor::Vendor;
use crate::Result;
use std::path::Path;

/// Discovers a vendor's product URLs and writes them to `output`
///
/// # Arguments
///
/// * `session` - The page session to drive
/// * `vendor` - The catalog to walk
/// * `config` - The harvester configuration
/// * `output` - Destination link file (one URL per line, sorted)
///
/// # Returns
///
/// * `Ok(DiscoveryReport)` - Discovery ran and the link file was written
/// * `Err(HarvestError)` - The link file could not be written
pub async fn discover_to_file(
    session: &mut dyn PageSession,
    vendor: Vendor,
    config: &Config,
    output: &Path,
) -> Result<DiscoveryReport> {
    let root_url = config.root_url(vendor);
    tracing::info!("Discovering {} products from {}", vendor, root_url);

    let mut discoverer =
        LinkDiscoverer::for_vendor(session, vendor, &root_url, config.discovery.clone())?
            .with_network_idle_timeout(config.session.network_idle_timeout());
    let report = discoverer.discover(&root_url).await;

    write_link_file(output, &report.product_urls)?;
    tracing::info!(
        "{} product links saved to '{}'",
        report.product_urls.len(),
        output.display()
    );

    Ok(report)
}
