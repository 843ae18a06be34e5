//! Post-hoc catalog organization
//!
//! This module reclassifies downloaded product folders, independent of the
//! live crawl:
//! - Vendor recovered from the folder-name sentinel
//! - Category from an ordered keyword table
//! - Format token from the name, or `SEM_FORMATO`
//!
//! Destinations are `<root>/<VENDOR>/<category>/<format>/<original name>`.

mod categories;
mod normalize;
mod organizer;

pub use categories::CategoryTable;
pub use normalize::{format_token, normalize_for_matching, NO_FORMAT};
pub use organizer::{CatalogOrganizer, FolderEntry, MoveOutcome, OrganizeSummary};

use crate::config::Config;
use crate::Result;
use std::path::Path;

/// Organizes `root` with the configured keyword table
pub fn organize(root: &Path, config: &Config) -> Result<OrganizeSummary> {
    tracing::info!("Organizing product folders under {}", root.display());
    CatalogOrganizer::new(root, CategoryTable::new(config.categories.clone())).run()
}
