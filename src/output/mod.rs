//! Output module for link files and command summaries
//!
//! This module handles:
//! - Writing the sorted product link file produced by discovery
//! - Reading the scrape input list (creating a template when missing)
//! - Printing end-of-run summaries

mod link_file;
mod summary;

pub use link_file::{parse_url_list, read_url_list, write_link_file};
pub use summary::{print_batch_summary, print_discovery_summary, print_organize_summary};
