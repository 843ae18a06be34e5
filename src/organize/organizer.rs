use super::categories::CategoryTable;
use super::normalize::{format_token, normalize_for_matching};
use crate::vendor::{Vendor, SENTINEL};
use crate::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A product folder found at the organizer root, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub original_path: PathBuf,
    pub original_name: String,
    pub vendor: Vendor,
    pub category: String,
    pub format: String,
}

impl FolderEntry {
    /// `<root>/<VENDOR>/<category>/<format>/<original name>`
    pub fn destination(&self, root: &Path) -> PathBuf {
        root.join(self.vendor.organizer_root())
            .join(&self.category)
            .join(&self.format)
            .join(&self.original_name)
    }
}

/// What happened to one folder
#[derive(Debug)]
pub enum MoveOutcome {
    Moved(PathBuf),
    AlreadyInPlace,
    Collision(PathBuf),
    Failed(std::io::Error),
}

/// Aggregate counters of one organizer run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizeSummary {
    pub scanned: usize,
    pub organized: usize,
    pub already_in_place: usize,
    pub uncategorized: Vec<String>,
    pub collisions: Vec<String>,
    pub failed: Vec<String>,
    pub formats: BTreeSet<String>,
}

/// Sorts product folders into a vendor/category/format tree
pub struct CatalogOrganizer {
    root: PathBuf,
    categories: CategoryTable,
}

impl CatalogOrganizer {
    pub fn new(root: impl Into<PathBuf>, categories: CategoryTable) -> Self {
        Self {
            root: root.into(),
            categories,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Classifies a folder name; `None` when no category keyword matches
    pub fn inspect(&self, name: &str, path: &Path) -> Option<FolderEntry> {
        let vendor = Vendor::from_folder_name(name);
        let normalized = normalize_for_matching(name);
        let category = self.categories.classify(&normalized)?;

        Some(FolderEntry {
            original_path: path.to_path_buf(),
            original_name: name.to_string(),
            vendor,
            category: category.to_string(),
            format: format_token(name.trim_end_matches(SENTINEL)),
        })
    }

    /// Organizes every top-level product folder under the root
    ///
    /// Folders are processed in name order. Vendor roots are never
    /// scanned, so a second run over the same tree moves nothing.
    ///
    /// # Returns
    ///
    /// * `Ok(OrganizeSummary)` - Per-folder problems are counted, not raised
    /// * `Err(HarvestError)` - The root could not be prepared or listed
    pub fn run(&self) -> Result<OrganizeSummary> {
        self.prepare_roots()?;

        let vendor_roots: Vec<&str> = Vendor::ALL.iter().map(|v| v.organizer_root()).collect();
        let mut folders: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if vendor_roots.contains(&name.as_str()) => {}
                Ok(name) => folders.push((name, entry.path())),
                Err(raw) => tracing::warn!("Skipping non UTF-8 folder name {:?}", raw),
            }
        }
        folders.sort();

        let mut summary = OrganizeSummary::default();
        for (name, path) in folders {
            summary.scanned += 1;

            let Some(entry) = self.inspect(&name, &path) else {
                tracing::warn!("No category found for '{}'", name);
                summary.uncategorized.push(name);
                continue;
            };
            summary.formats.insert(entry.format.clone());

            match self.relocate(&entry) {
                MoveOutcome::Moved(destination) => {
                    tracing::info!("Moved '{}' to {}", name, destination.display());
                    summary.organized += 1;
                }
                MoveOutcome::AlreadyInPlace => {
                    tracing::info!("'{}' is already in place", name);
                    summary.already_in_place += 1;
                }
                MoveOutcome::Collision(destination) => {
                    tracing::warn!(
                        "'{}' not moved: {} already exists",
                        name,
                        destination.display()
                    );
                    summary.collisions.push(name);
                }
                MoveOutcome::Failed(e) => {
                    tracing::error!("Failed to move '{}': {}", name, e);
                    summary.failed.push(name);
                }
            }
        }

        Ok(summary)
    }

    /// Creates both vendor roots with every category folder beneath them
    fn prepare_roots(&self) -> Result<()> {
        for vendor in Vendor::ALL {
            let vendor_root = self.root.join(vendor.organizer_root());
            for category in self.categories.names() {
                fs::create_dir_all(vendor_root.join(category))?;
            }
        }
        Ok(())
    }

    fn relocate(&self, entry: &FolderEntry) -> MoveOutcome {
        let destination = entry.destination(&self.root);
        if destination == entry.original_path {
            return MoveOutcome::AlreadyInPlace;
        }
        if destination.exists() {
            return MoveOutcome::Collision(destination);
        }
        if let Some(parent) = destination.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                return MoveOutcome::Failed(e);
            }
        }
        match fs::rename(&entry.original_path, &destination) {
            Ok(()) => MoveOutcome::Moved(destination),
            Err(e) => MoveOutcome::Failed(e),
        }
    }
}
