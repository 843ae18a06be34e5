//! Console summaries printed at the end of each command

use crate::discover::DiscoveryReport;
use crate::organize::OrganizeSummary;
use crate::scrape::BatchSummary;

/// Prints the result of a discovery run
pub fn print_discovery_summary(report: &DiscoveryReport) {
    println!("=== Discovery Summary ===\n");
    println!("  Product links found: {}", report.product_urls.len());
    println!("  Collections visited: {}", report.collections_visited);
    println!("  Subcollections visited: {}", report.subcollections_visited);
    if report.load_more_clicks > 0 {
        println!("  \"Load more\" clicks: {}", report.load_more_clicks);
    }
    println!();

    if !report.failed_pages.is_empty() {
        println!("Pages that failed to load ({}):", report.failed_pages.len());
        for url in &report.failed_pages {
            println!("  - {}", url);
        }
        println!();
    }
}

/// Prints the totals of a scrape batch
pub fn print_batch_summary(summary: &BatchSummary) {
    println!("=== Scrape Summary ===\n");
    println!("  URLs processed: {} / {}", summary.processed, summary.total);
    println!(
        "  Downloads: {} succeeded, {} failed",
        summary.downloads_succeeded, summary.downloads_failed
    );
    println!("  Screenshots: {}", summary.screenshots);
    println!();

    if !summary.failed_urls.is_empty() {
        println!("Failed URLs ({}):", summary.failed_urls.len());
        for url in &summary.failed_urls {
            println!("  - {}", url);
        }
        println!();
    }

    println!(
        "Total time: {:.2}s ({:.2}s per URL)",
        summary.elapsed.as_secs_f64(),
        summary.average_per_url().as_secs_f64()
    );
}

/// Prints the counters of an organizer run
pub fn print_organize_summary(summary: &OrganizeSummary) {
    println!("=== Organization Summary ===\n");
    println!("  Folders scanned: {}", summary.scanned);
    println!("  Organized: {}", summary.organized);
    println!("  Already in place: {}", summary.already_in_place);
    println!("  Uncategorized: {}", summary.uncategorized.len());
    println!("  Collisions: {}", summary.collisions.len());
    println!("  Failed moves: {}", summary.failed.len());
    println!();

    for (title, names) in [
        ("Uncategorized", &summary.uncategorized),
        ("Collisions", &summary.collisions),
        ("Failed moves", &summary.failed),
    ] {
        if names.is_empty() {
            continue;
        }
        println!("{} ({}):", title, names.len());
        for name in names {
            println!("  - {}", name);
        }
        println!();
    }

    println!("Formats found ({}):", summary.formats.len());
    for format in &summary.formats {
        println!("  - {}", format);
    }
}
