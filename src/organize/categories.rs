use super::normalize::normalize_for_matching;
use crate::config::{default_categories, CategoryEntry};

/// Ordered category → keywords table
///
/// The first category with a keyword contained in the normalized name wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    entries: Vec<CategoryEntry>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new(default_categories())
    }
}

impl CategoryTable {
    /// Keywords are normalized the same way folder names are
    pub fn new(entries: Vec<CategoryEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| CategoryEntry {
                keywords: entry
                    .keywords
                    .iter()
                    .map(|keyword| normalize_for_matching(keyword))
                    .filter(|keyword| !keyword.is_empty())
                    .collect(),
                name: entry.name,
            })
            .collect();
        Self { entries }
    }

    /// Category folder names in precedence order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Category of an already-normalized name
    pub fn classify(&self, normalized: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| {
                entry
                    .keywords
                    .iter()
                    .any(|keyword| normalized.contains(keyword.as_str()))
            })
            .map(|entry| entry.name.as_str())
    }
}
