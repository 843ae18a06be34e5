//! Link and URL list files
//!
//! Both files are UTF-8 text with one URL per line. The discovery output
//! is sorted and duplicate-free; the scrape input additionally allows
//! blank lines and `#` comments.

use crate::Result;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Writes discovered product URLs, sorted ascending with duplicates removed
pub fn write_link_file(path: &Path, urls: &[String]) -> Result<()> {
    let unique: BTreeSet<&str> = urls
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .collect();

    let mut content = String::new();
    for url in unique {
        content.push_str(url);
        content.push('\n');
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Extracts URLs from list file content, skipping blanks and `#` comments
pub fn parse_url_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads the scrape input list
///
/// A missing file is created with a commented template containing
/// `example_url`, and an empty list is returned so the caller reports
/// zero work instead of failing.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The URLs in file order (possibly empty)
/// * `Err(HarvestError)` - The file exists but could not be read, or the
///   template could not be written
pub fn read_url_list(path: &Path, example_url: &str) -> Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => {
            let urls = parse_url_list(&content);
            if urls.is_empty() {
                tracing::warn!(
                    "{} is empty or contains only comments",
                    path.display()
                );
            } else {
                tracing::info!("Read {} URLs from {}", urls.len(), path.display());
            }
            Ok(urls)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::error!("{} not found", path.display());
            fs::write(path, url_list_template(example_url))?;
            tracing::info!(
                "Created example file {}. Edit it and run again.",
                path.display()
            );
            Ok(Vec::new())
        }
        Err(e) => Err(e.into()),
    }
}

fn url_list_template(example_url: &str) -> String {
    format!(
        "# URLs to harvest (one per line)\n\
         # Lines starting with # are comments and are ignored\n\
         \n\
         {}\n\
         # {}/another-product\n",
        example_url,
        example_url.rsplit_once('/').map(|(head, _)| head).unwrap_or(example_url)
    )
}
