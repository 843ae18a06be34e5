//! Integration tests for Catalog-Harvest
//!
//! These tests use wiremock for HTTP endpoints and temporary directories
//! for the product folders, and drive the public API end to end.

mod common;
mod discover_tests;
mod organize_tests;
mod scrape_tests;
