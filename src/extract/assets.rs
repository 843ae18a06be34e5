//! Downloadable assets listed on a product page

use super::sanitize::{collapse_whitespace, percent_decode, sanitize_name};
use super::snapshot::{element_text, PageSnapshot};
use std::collections::HashSet;
use std::fmt;

/// Recognized download types of the `a.download-link` buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    ProductFaces,
    SketchupBlock,
    Pagination,
    Ambience,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::ProductFaces,
        AssetKind::SketchupBlock,
        AssetKind::Pagination,
        AssetKind::Ambience,
    ];

    /// Button label as shown on the page, lower-cased
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductFaces => "faces do produto",
            Self::SketchupBlock => "bloco de sketchup",
            Self::Pagination => "paginação",
            Self::Ambience => "ambiente",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = collapse_whitespace(label).to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == normalized)
    }

    /// Whether the vendor serves this type as a rendered image
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Pagination | Self::Ambience)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed download button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLink {
    pub kind: AssetKind,
    pub url: String,
}

/// A technical document link (spec sheet, installation guide)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLink {
    pub url: String,
    pub file_name: String,
}

/// Finds `a.download-link` buttons whose `h5` label is a known asset type
///
/// The target URL is read from `data-download-url` and resolved against
/// the page URL. Unknown labels and buttons without a target are skipped.
pub fn find_asset_links(page: &PageSnapshot) -> Vec<AssetLink> {
    let Ok(label_selector) = scraper::Selector::parse("h5") else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for button in page.select("a.download-link") {
        let Some(label) = button.select(&label_selector).next().map(element_text) else {
            continue;
        };
        let Some(kind) = AssetKind::from_label(&label) else {
            tracing::debug!("Ignoring download button '{}'", label);
            continue;
        };
        let Some(url) = button
            .value()
            .attr("data-download-url")
            .and_then(|href| page.resolve(href))
        else {
            tracing::warn!("Download button '{}' has no target", label);
            continue;
        };
        links.push(AssetLink { kind, url });
    }
    links
}

fn is_document_anchor(href: &str, text: &str) -> bool {
    let href = href.to_lowercase();
    let text = text.to_lowercase();
    href.ends_with(".pdf")
        || href.contains("/download/")
        || text.contains("ficha técnica")
        || text.contains("guia")
}

/// Finds technical documents: `.pdf` links, `/download/` links and anchors
/// labelled "ficha técnica" or "guia"
///
/// The file name comes from the `download` attribute, else the URL's last
/// path segment, and always ends in `.pdf`. Duplicate URLs are dropped.
pub fn find_document_links(page: &PageSnapshot) -> Vec<DocumentLink> {
    let mut seen = HashSet::new();
    let mut documents = Vec::new();

    for anchor in page.select("a[href]") {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !is_document_anchor(href, &element_text(anchor)) {
            continue;
        }
        let Some(url) = page.resolve(href) else {
            continue;
        };
        if !seen.insert(url.clone()) {
            continue;
        }

        let suggested = anchor
            .value()
            .attr("download")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| url_basename(&url));
        let mut file_name = sanitize_name(&suggested);
        if file_name.is_empty() {
            file_name = "documento".to_string();
        }
        if !file_name.to_lowercase().ends_with(".pdf") {
            file_name.push_str(".pdf");
        }

        documents.push(DocumentLink { url, file_name });
    }
    documents
}

/// Source of the vendor's primary product image
pub fn find_primary_image(page: &PageSnapshot) -> Option<String> {
    page.select(page.vendor().primary_image_selector())
        .into_iter()
        .filter_map(|img| img.value().attr("src"))
        .find_map(|src| page.resolve(src))
}

/// Last path segment of a URL, percent-decoded
pub fn url_basename(url: &str) -> String {
    let path = match url::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or(url).to_string(),
    };
    let last = path.rsplit('/').next().unwrap_or_default();
    percent_decode(last).into_owned()
}
