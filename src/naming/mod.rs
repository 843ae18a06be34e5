//! Folder and file naming
//!
//! Names follow a fixed per-vendor grammar:
//! - Villagres: `<product>[ - <environment>][ - <format>]`
//! - Biancogres: `<product>[ - <finish>][ <format>]`, with a terminal
//!   sentinel added to the folder name
//!
//! Every name is sanitized and capped, and a name shorter than the minimum
//! length is replaced by a fallback derived from the page URL.

use crate::config::NamingConfig;
use crate::extract::{
    percent_decode, sanitize_name, title_case, truncate_chars, url_basename, AssetKind,
    ExtractionRecord,
};
use crate::url::path_segments;
use crate::vendor::{Vendor, VendorGrammar, SENTINEL};
use chrono::{DateTime, Utc};
use std::path::Path;
use url::Url;

/// Extension used when an asset URL does not carry one
pub const DEFAULT_ASSET_EXTENSION: &str = ".rar";

/// Extension forced for assets served as rendered images
pub const IMAGE_ASSET_EXTENSION: &str = ".jpg";

/// A composed product name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedName {
    vendor: Vendor,
    base: String,
}

impl ComposedName {
    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    /// Sanitized, capped name without the sentinel
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Name of the product folder
    pub fn folder_name(&self) -> String {
        if self.vendor.uses_sentinel() {
            format!("{}{}", self.base, SENTINEL)
        } else {
            self.base.clone()
        }
    }

    /// File name for a typed asset downloaded from `source_url`
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_harvest::config::NamingConfig;
    /// use catalog_harvest::extract::{AssetKind, ExtractionRecord};
    /// use catalog_harvest::naming::NameComposer;
    /// use catalog_harvest::Vendor;
    ///
    /// let mut record = ExtractionRecord::new(Vendor::Villagres);
    /// record.product = Some("Alameda".to_string());
    /// let url = url::Url::parse("https://villagres.com.br/PT/produtos/a/alameda/1").unwrap();
    /// let name = NameComposer::new(&NamingConfig::default()).compose(&record, &url, chrono::Utc::now());
    ///
    /// assert_eq!(
    ///     name.asset_file_name(AssetKind::SketchupBlock, "https://cdn/x/bloco.skp"),
    ///     "Alameda - BLOCO DE SKETCHUP.skp"
    /// );
    /// ```
    pub fn asset_file_name(&self, kind: AssetKind, source_url: &str) -> String {
        let folder = self.folder_name();
        let url_extension =
            url_extension(source_url).unwrap_or_else(|| DEFAULT_ASSET_EXTENSION.to_string());

        match self.vendor.grammar() {
            VendorGrammar::Hierarchical => match kind {
                AssetKind::SketchupBlock => {
                    format!("{} - BLOCO DE SKETCHUP{}", folder, url_extension)
                }
                AssetKind::ProductFaces => format!("{}_{}{}", folder, kind.label(), url_extension),
                AssetKind::Pagination | AssetKind::Ambience => {
                    format!("{}_{}{}", folder, kind.label(), IMAGE_ASSET_EXTENSION)
                }
            },
            VendorGrammar::Flat => format!(
                "{}_{}{}",
                folder,
                kind.label().replace(' ', "_"),
                url_extension
            ),
        }
    }
}

/// Extension of the URL's last path segment, with its leading dot
pub fn url_extension(url: &str) -> Option<String> {
    let basename = url_basename(url);
    Path::new(&basename)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext))
}

/// Builds product names from extraction records
#[derive(Debug, Clone)]
pub struct NameComposer {
    max_length: usize,
    min_length: usize,
}

impl NameComposer {
    pub fn new(config: &NamingConfig) -> Self {
        Self {
            max_length: config.max_length,
            min_length: config.min_length,
        }
    }

    /// Composes the product name for a record
    ///
    /// # Arguments
    ///
    /// * `record` - Extracted attributes; its vendor selects the grammar
    /// * `page_url` - The product page, used for the short-name fallback
    /// * `now` - Time used when no URL segment is usable
    ///
    /// # Returns
    ///
    /// A name of at least the minimum length and at most the maximum
    /// length, free of forbidden filesystem characters
    pub fn compose(
        &self,
        record: &ExtractionRecord,
        page_url: &Url,
        now: DateTime<Utc>,
    ) -> ComposedName {
        let raw = match record.vendor.grammar() {
            VendorGrammar::Hierarchical => join_present(
                &[
                    record.product.as_deref(),
                    record.environment.as_deref(),
                    record.format.as_deref(),
                ],
                " - ",
            ),
            VendorGrammar::Flat => {
                let head = join_present(
                    &[record.product.as_deref(), record.surface.as_deref()],
                    " - ",
                );
                join_present(&[Some(head.as_str()), record.format.as_deref()], " ")
            }
        };

        let mut name = sanitize_name(&raw);
        if name.chars().count() < self.min_length {
            tracing::warn!("Composed name '{}' too short, using fallback", name);
            name = fallback_name(page_url, now);
        }

        let base = truncate_chars(&name, self.max_length).trim_end().to_string();
        ComposedName {
            vendor: record.vendor,
            base,
        }
    }
}

fn join_present(parts: &[Option<&str>], separator: &str) -> String {
    parts
        .iter()
        .flatten()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// `Produto <Segment>` from the second-to-last path segment, else
/// `Produto <unix time>`
fn fallback_name(page_url: &Url, now: DateTime<Utc>) -> String {
    let segments = path_segments(page_url.path());
    if segments.len() >= 2 {
        let segment = percent_decode(segments[segments.len() - 2]).replace('-', " ");
        let segment = sanitize_name(&title_case(&segment));
        if !segment.is_empty() {
            return format!("Produto {}", segment);
        }
    }
    format!("Produto {}", now.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn composer() -> NameComposer {
        NameComposer::new(&NamingConfig::default())
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn villagres_url() -> Url {
        Url::parse("https://villagres.com.br/PT/produtos/naturale/alameda/200021a").unwrap()
    }

    fn biancogres_url() -> Url {
        Url::parse("https://www.biancogres.com.br/produto/abruzzo-massima-pro").unwrap()
    }

    fn record(vendor: Vendor, fields: &[(&str, &str)]) -> ExtractionRecord {
        let mut record = ExtractionRecord::new(vendor);
        for (field, value) in fields {
            let value = Some(value.to_string());
            match *field {
                "product" => record.product = value,
                "format" => record.format = value,
                "surface" => record.surface = value,
                "environment" => record.environment = value,
                other => panic!("unexpected field {}", other),
            }
        }
        record
    }

    #[test]
    fn test_villagres_grammar() {
        let r = record(
            Vendor::Villagres,
            &[("product", "Alameda - Branco"), ("format", "60X60cm")],
        );
        let name = composer().compose(&r, &villagres_url(), now());
        assert_eq!(name.folder_name(), "Alameda - Branco - 60X60cm");

        let r = record(
            Vendor::Villagres,
            &[
                ("product", "Alameda"),
                ("environment", "Externo"),
                ("format", "60X60cm"),
            ],
        );
        let name = composer().compose(&r, &villagres_url(), now());
        assert_eq!(name.base(), "Alameda - Externo - 60X60cm");
    }

    #[test]
    fn test_biancogres_grammar_and_sentinel() {
        let r = record(
            Vendor::Biancogres,
            &[
                ("product", "Abruzzo"),
                ("surface", "Polido"),
                ("format", "60x120"),
            ],
        );
        let name = composer().compose(&r, &biancogres_url(), now());
        assert_eq!(name.base(), "Abruzzo - Polido 60x120");
        assert_eq!(name.folder_name(), "Abruzzo - Polido 60x120\u{3002}");

        let r = record(Vendor::Biancogres, &[("product", "Abruzzo")]);
        let name = composer().compose(&r, &biancogres_url(), now());
        assert_eq!(name.folder_name(), "Abruzzo\u{3002}");
    }

    #[test]
    fn test_short_name_uses_url_fallback() {
        let r = record(Vendor::Villagres, &[("product", "A")]);
        let name = composer().compose(&r, &villagres_url(), now());
        assert_eq!(name.base(), "Produto Alameda");
    }

    #[test]
    fn test_short_name_uses_timestamp_without_segments() {
        let r = ExtractionRecord::new(Vendor::Villagres);
        let url = Url::parse("https://villagres.com.br/x").unwrap();
        let name = composer().compose(&r, &url, now());
        assert_eq!(name.base(), "Produto 1700000000");
    }

    #[test]
    fn test_length_cap() {
        let long = "A".repeat(400);
        let r = record(Vendor::Villagres, &[("product", &long), ("format", "60X60cm")]);
        let name = composer().compose(&r, &villagres_url(), now());
        assert_eq!(name.base().chars().count(), 150);
    }

    #[test]
    fn test_cap_does_not_leave_trailing_space() {
        let config = NamingConfig {
            max_length: 8,
            min_length: 3,
        };
        let r = record(Vendor::Villagres, &[("product", "Alameda Branco")]);
        let name = NameComposer::new(&config).compose(&r, &villagres_url(), now());
        assert_eq!(name.base(), "Alameda");
    }

    #[test]
    fn test_villagres_asset_names() {
        let r = record(Vendor::Villagres, &[("product", "Alameda")]);
        let name = composer().compose(&r, &villagres_url(), now());

        assert_eq!(
            name.asset_file_name(AssetKind::ProductFaces, "https://h/f/faces.zip"),
            "Alameda_faces do produto.zip"
        );
        assert_eq!(
            name.asset_file_name(AssetKind::ProductFaces, "https://h/f/download"),
            "Alameda_faces do produto.rar"
        );
        assert_eq!(
            name.asset_file_name(AssetKind::SketchupBlock, "https://h/f/bloco"),
            "Alameda - BLOCO DE SKETCHUP.rar"
        );
        assert_eq!(
            name.asset_file_name(AssetKind::Ambience, "https://h/f/amb.png"),
            "Alameda_ambiente.jpg"
        );
        assert_eq!(
            name.asset_file_name(AssetKind::Pagination, "https://h/f/pag"),
            "Alameda_paginação.jpg"
        );
    }

    #[test]
    fn test_biancogres_asset_names() {
        let r = record(Vendor::Biancogres, &[("product", "Abruzzo")]);
        let name = composer().compose(&r, &biancogres_url(), now());

        assert_eq!(
            name.asset_file_name(AssetKind::SketchupBlock, "https://h/f/bloco.skp"),
            "Abruzzo\u{3002}_bloco_de_sketchup.skp"
        );
        assert_eq!(
            name.asset_file_name(AssetKind::Ambience, "https://h/f/amb"),
            "Abruzzo\u{3002}_ambiente.rar"
        );
    }

    #[test]
    fn test_url_extension() {
        assert_eq!(url_extension("https://h/a/b.tar.gz?x=1").as_deref(), Some(".gz"));
        assert_eq!(url_extension("https://h/a/b"), None);
        assert_eq!(url_extension("https://h/a/"), None);
    }
}
