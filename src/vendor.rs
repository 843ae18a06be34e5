//! Vendor definitions
//!
//! Each supported catalog has its own URL grammar, page layout and folder
//! naming grammar. The `Vendor` tag travels with extraction records and
//! composed names so the vendor never has to be guessed from a string,
//! except by the organizer, which only sees folder names on disk.

use crate::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Terminal marker appended to Biancogres folder names.
///
/// Windows rejects names ending in `.`, so the ideographic full stop is used.
pub const SENTINEL: char = '\u{3002}';

/// URL grammar used by a vendor's catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorGrammar {
    /// root → collection → subcollection → product
    Hierarchical,
    /// a single paginated listing of `/produto/<slug>` pages
    Flat,
}

/// Supported catalog vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Villagres,
    Biancogres,
}

impl Vendor {
    pub const ALL: [Vendor; 2] = [Vendor::Villagres, Vendor::Biancogres];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Villagres => "villagres",
            Self::Biancogres => "biancogres",
        }
    }

    pub fn grammar(&self) -> VendorGrammar {
        match self {
            Self::Villagres => VendorGrammar::Hierarchical,
            Self::Biancogres => VendorGrammar::Flat,
        }
    }

    /// Catalog root listing
    pub fn default_root_url(&self) -> &'static str {
        match self {
            Self::Villagres => "https://villagres.com.br/PT/produtos",
            Self::Biancogres => "https://www.biancogres.com.br/pt_BR/produtos",
        }
    }

    /// Default file for discovered links, also the default scrape input
    pub fn default_link_file(&self) -> &'static str {
        match self {
            Self::Villagres => "product_links.txt",
            Self::Biancogres => "biancogres_links.txt",
        }
    }

    /// URL written into a freshly created input list as an example
    pub fn example_product_url(&self) -> &'static str {
        match self {
            Self::Villagres => "https://villagres.com.br/PT/produtos/naturale/alameda/200021a",
            Self::Biancogres => "https://www.biancogres.com.br/produto/abruzzo-massima-pro",
        }
    }

    /// Substring a catalog anchor must contain to be considered at all
    pub fn link_filter(&self) -> &'static str {
        match self {
            Self::Villagres => "/produtos/",
            Self::Biancogres => "/produto/",
        }
    }

    /// Anchors collected from listing pages
    pub fn listing_selector(&self) -> &'static str {
        match self {
            Self::Villagres => "a[href]",
            Self::Biancogres => "a.products-gallery__item",
        }
    }

    /// "Load more" control of a paginated listing
    pub fn load_more_selector(&self) -> Option<&'static str> {
        match self {
            Self::Villagres => None,
            Self::Biancogres => Some("button.products-gallery__button"),
        }
    }

    pub fn primary_image_selector(&self) -> &'static str {
        match self {
            Self::Villagres => r#"img[style*="object-fit: contain"][src]"#,
            Self::Biancogres => "div.swiper-slide img[src]",
        }
    }

    /// Top-level folder the organizer files this vendor's products under
    pub fn organizer_root(&self) -> &'static str {
        match self {
            Self::Villagres => "VILLAGRES",
            Self::Biancogres => "BIANCOGRES",
        }
    }

    /// Whether materialized folder names carry the [`SENTINEL`] suffix
    pub fn uses_sentinel(&self) -> bool {
        matches!(self, Self::Biancogres)
    }

    /// Recovers the vendor from a folder name on disk
    pub fn from_folder_name(name: &str) -> Self {
        if name.ends_with(SENTINEL) {
            Self::Biancogres
        } else {
            Self::Villagres
        }
    }

    /// Infers the vendor from a product URL's host
    pub fn from_url(url: &str) -> Option<Self> {
        let host = ::url::Url::parse(url).ok()?.host_str()?.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|vendor| host.contains(vendor.name()))
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Vendor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|vendor| vendor.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownVendor(s.to_string()))
    }
}
