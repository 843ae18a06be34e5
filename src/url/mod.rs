//! URL handling module for Catalog-Harvest
//!
//! This module provides link resolution and the structural classification
//! of catalog URLs into hierarchy levels.

mod normalize;

use crate::vendor::VendorGrammar;
use url::Url;

// Re-export main functions
pub use normalize::{host_key, path_segments, resolve_link};

/// Hierarchy level of a catalog URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// The catalog root listing itself
    Root,
    /// First grouping level below the root
    Collection,
    /// Second grouping level below the root
    Subcollection,
    /// An individual product page
    Product,
    /// Anything else - silently excluded from discovery
    Unknown,
}

/// Classifies a URL against a catalog root path
///
/// Classification is purely structural: the root path's segments are
/// stripped, and the remaining non-empty segments are counted.
///
/// | Grammar | Remainder | Level |
/// |---------|-----------|-------|
/// | Hierarchical | none | Root |
/// | Hierarchical | `a` | Collection |
/// | Hierarchical | `a/b` | Subcollection |
/// | Hierarchical | `a/b/c1` (last alphanumeric) | Product |
/// | Flat | ends in `produto/<slug>` | Product |
///
/// Every other shape is `Unknown`. Query strings, fragments and trailing
/// slashes do not take part in classification.
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::{classify, Level};
/// use catalog_harvest::VendorGrammar;
///
/// let grammar = VendorGrammar::Hierarchical;
/// assert_eq!(classify("https://host/produtos/a", "/produtos", grammar), Level::Collection);
/// assert_eq!(classify("https://host/produtos/a/b/c1", "/produtos", grammar), Level::Product);
/// ```
pub fn classify(url: &str, root_path: &str, grammar: VendorGrammar) -> Level {
    match Url::parse(url.trim()) {
        Ok(parsed) => classify_path(parsed.path(), root_path, grammar),
        Err(_) => Level::Unknown,
    }
}

fn classify_path(path: &str, root_path: &str, grammar: VendorGrammar) -> Level {
    let segments = path_segments(path);
    let root = path_segments(root_path);

    match grammar {
        VendorGrammar::Hierarchical => {
            if !segments.starts_with(&root) {
                return Level::Unknown;
            }

            match &segments[root.len()..] {
                [] => Level::Root,
                [_] => Level::Collection,
                [_, _] => Level::Subcollection,
                [_, _, code] if is_product_code(code) => Level::Product,
                _ => Level::Unknown,
            }
        }
        VendorGrammar::Flat => {
            if segments == root {
                return Level::Root;
            }

            match segments.as_slice() {
                [.., "produto", _slug] => Level::Product,
                _ => Level::Unknown,
            }
        }
    }
}

fn is_product_code(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric())
}

/// A classifier bound to one catalog root
///
/// When built from a full root URL, links pointing at another host are
/// classified as `Unknown`. A leading `www.` is ignored when comparing hosts.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    root_path: String,
    host: Option<String>,
    grammar: VendorGrammar,
}

impl UrlClassifier {
    /// Creates a classifier that accepts any host
    pub fn new(root_path: impl Into<String>, grammar: VendorGrammar) -> Self {
        Self {
            root_path: root_path.into(),
            host: None,
            grammar,
        }
    }

    /// Creates a classifier restricted to the root URL's host
    pub fn for_root_url(root_url: &str, grammar: VendorGrammar) -> Result<Self, url::ParseError> {
        let root = Url::parse(root_url)?;
        Ok(Self {
            root_path: root.path().to_string(),
            host: root.host_str().map(host_key),
            grammar,
        })
    }

    pub fn grammar(&self) -> VendorGrammar {
        self.grammar
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    /// Classifies a URL relative to this classifier's root
    pub fn classify(&self, url: &str) -> Level {
        let parsed = match Url::parse(url.trim()) {
            Ok(parsed) => parsed,
            Err(_) => return Level::Unknown,
        };

        if let Some(expected) = &self.host {
            match parsed.host_str() {
                Some(host) if host_key(host) == *expected => {}
                _ => return Level::Unknown,
            }
        }

        classify_path(parsed.path(), &self.root_path, self.grammar)
    }
}
