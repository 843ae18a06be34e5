//! Product field extraction
//!
//! This module turns a rendered product page into structured data:
//! - Ordered fallback strategies per field, first present value wins
//! - Name sanitization applied to every extracted string
//! - Typed asset and document links, plus the primary product image

mod assets;
mod format;
mod record;
mod sanitize;
mod snapshot;
pub mod strategies;

pub use assets::{
    find_asset_links, find_document_links, find_primary_image, url_basename, AssetKind,
    AssetLink, DocumentLink,
};
pub use format::extract_format;
pub use record::{ExtractionRecord, Field};
pub use sanitize::{
    collapse_whitespace, percent_decode, sanitize_name, title_case, truncate_chars,
    FORBIDDEN_CHARS,
};
pub use snapshot::{element_text, PageSnapshot};
pub use strategies::{default_chain, Strategy};

use std::collections::HashMap;

/// Runs the per-field strategy chains over a page
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    chains: HashMap<Field, &'static [Strategy]>,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self {
            chains: Field::ALL
                .iter()
                .map(|field| (*field, default_chain(*field)))
                .collect(),
        }
    }
}

impl FieldExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the chain used for one field
    pub fn with_chain(mut self, field: Field, chain: &'static [Strategy]) -> Self {
        self.chains.insert(field, chain);
        self
    }

    pub fn chain(&self, field: Field) -> &'static [Strategy] {
        self.chains.get(&field).copied().unwrap_or(&[])
    }

    /// Extracts every field from the page
    ///
    /// A value counts as present only if it survives sanitization non-empty;
    /// otherwise the next strategy is tried.
    pub fn extract(&self, page: &PageSnapshot) -> ExtractionRecord {
        let mut record = ExtractionRecord::new(page.vendor());
        for field in Field::ALL {
            record.set(field, self.extract_field(page, field));
        }
        record
    }

    /// Runs one field's chain
    pub fn extract_field(&self, page: &PageSnapshot, field: Field) -> Option<String> {
        for strategy in self.chain(field) {
            let Some(raw) = (strategy.run)(page) else {
                continue;
            };
            let value = sanitize_name(&raw);
            if value.is_empty() {
                continue;
            }
            tracing::debug!("{}: '{}' via {}", field, value, strategy.name);
            return Some(value);
        }
        tracing::debug!("{}: no strategy matched", field);
        None
    }
}
