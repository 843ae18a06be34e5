//! Hierarchical discovery over HTTP, served by wiremock

use crate::common::create_test_config;
use catalog_harvest::config::VendorEntry;
use catalog_harvest::discover::discover_to_file;
use catalog_harvest::session::HttpPageSession;
use catalog_harvest::Vendor;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_discover_hierarchical_catalog() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/PT/produtos",
        r#"<a href="/PT/produtos/naturale">Naturale</a>
           <a href="/PT/produtos/urban/">Urban</a>
           <a href="/PT/contato">Contato</a>
           <a href="https://elsewhere.example/PT/produtos/x">Fora</a>"#,
    )
    .await;
    mount_page(
        &server,
        "/PT/produtos/naturale",
        r#"<a href="/PT/produtos/naturale/alameda">Alameda</a>
           <a href="/PT/produtos/urban">Urban</a>"#,
    )
    .await;
    mount_page(
        &server,
        "/PT/produtos/naturale/alameda",
        r#"<a href="/PT/produtos/naturale/alameda/200021b">B</a>
           <a href="/PT/produtos/naturale/alameda/200021a#top">A</a>
           <a href="/PT/produtos/naturale/alameda/200021a">A again</a>"#,
    )
    .await;
    // urban has no mock, so it answers 404 and its branch is skipped

    let mut config = create_test_config();
    config.vendors = vec![VendorEntry {
        name: Vendor::Villagres,
        root_url: Some(format!("{}/PT/produtos", server.uri())),
        link_file: None,
    }];

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("product_links.txt");
    let mut session = HttpPageSession::new(&config.session).unwrap();

    let report = discover_to_file(&mut session, Vendor::Villagres, &config, &output)
        .await
        .unwrap();

    let base = server.uri();
    assert_eq!(
        report.product_urls,
        vec![
            format!("{}/PT/produtos/naturale/alameda/200021a", base),
            format!("{}/PT/produtos/naturale/alameda/200021b", base),
        ]
    );
    assert_eq!(report.collections_visited, 1);
    assert_eq!(report.subcollections_visited, 1);
    assert_eq!(report.failed_pages, vec![format!("{}/PT/produtos/urban", base)]);

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        format!(
            "{base}/PT/produtos/naturale/alameda/200021a\n{base}/PT/produtos/naturale/alameda/200021b\n",
            base = base
        )
    );
}

#[tokio::test]
async fn test_unreachable_root_writes_empty_file() {
    let server = MockServer::start().await;

    let mut config = create_test_config();
    config.vendors = vec![VendorEntry {
        name: Vendor::Villagres,
        root_url: Some(format!("{}/PT/produtos", server.uri())),
        link_file: None,
    }];

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("product_links.txt");
    let mut session = HttpPageSession::new(&config.session).unwrap();

    let report = discover_to_file(&mut session, Vendor::Villagres, &config, &output)
        .await
        .unwrap();

    assert!(report.product_urls.is_empty());
    assert_eq!(report.failed_pages.len(), 1);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}
