//! End-to-end product scraping against a fixture page and a mock asset host

use crate::common::{create_test_config, FixtureFactory};
use catalog_harvest::extract::AssetKind;
use catalog_harvest::scrape::{ProductScraper, SCREENSHOT_FILE_NAME};
use catalog_harvest::Vendor;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ALAMEDA_URL: &str = "https://villagres.com.br/PT/produtos/naturale/alameda/200021a";
const ABRUZZO_URL: &str = "https://www.biancogres.com.br/produto/abruzzo";

fn alameda_page(asset_host: &str) -> String {
    format!(
        r#"<html><head><title>Villagres | Alameda - Branco</title></head><body>
        <nav id="timeline"><ol><li class="breadcrumb-item active">Alameda</li></ol></nav>
        <div class="specs">
          <h5>Especificações Técnicas</h5>
          <h6 class="font-weight-light texto-padrao text-uppercase">Produto</h6>
          <span class="font-weight-light fw-bold">Alameda - Branco</span>
          <h6 class="font-weight-light texto-padrao text-uppercase">Formato</h6>
          <span class="font-weight-light fw-bold">60X60cm</span>
        </div>
        <img style="object-fit: contain" src="{host}/img/alameda.jpg">
        <a class="download-link" data-download-url="{host}/files/faces.zip"><h5>Faces do produto</h5></a>
        <a class="download-link" data-download-url="{host}/files/bloco"><h5>Bloco de SketchUp</h5></a>
        </body></html>"#,
        host = asset_host
    )
}

fn abruzzo_page(asset_host: &str) -> String {
    format!(
        r#"<html><body>
        <h2 class="product__title">Abruzzo</h2>
        <label class="product__sizes__button active">60x120</label>
        <section class="product__technical__informations__container active"><ul>
          <li><span class="product__technical__informations__name">Acabamento</span>
              <span class="product__technical__informations__value">Polido</span></li>
        </ul></section>
        <div class="swiper-slide"><img src="{host}/img/abruzzo.png"></div>
        <a href="{host}/docs/ficha.pdf">Ficha técnica</a>
        </body></html>"#,
        host = asset_host
    )
}

async fn mount_assets(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/img/alameda.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/abruzzo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNG".to_vec()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/faces.zip"))
        .and(header("cookie", "PHPSESSID=fixture"))
        .and(header("user-agent", "FixtureAgent/1.0"))
        .and(header("referer", ALAMEDA_URL))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK-faces".to_vec()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/bloco"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"skp".to_vec()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/ficha.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4".to_vec()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scrape_villagres_product() {
    let server = MockServer::start().await;
    mount_assets(&server).await;

    let factory = FixtureFactory::new(vec![(
        ALAMEDA_URL.to_string(),
        alameda_page(&server.uri()),
    )]);
    let output = TempDir::new().unwrap();
    let scraper = ProductScraper::new(&create_test_config(), output.path()).unwrap();

    let mut session = factory.session();
    let report = scraper.scrape_product(&mut session, ALAMEDA_URL).await.unwrap();

    let folder = output.path().join("Alameda - Branco - 60X60cm");
    assert_eq!(report.vendor, Vendor::Villagres);
    assert_eq!(report.folder, folder);
    assert_eq!(report.record.product.as_deref(), Some("Alameda - Branco"));
    assert_eq!(report.record.format.as_deref(), Some("60X60cm"));
    assert_eq!(report.record.environment, None);

    assert_eq!(report.downloads.len(), 3);
    assert!(report.downloads.iter().all(|d| d.success));
    assert!(folder.join("alameda.jpg").is_file());
    assert!(folder.join(SCREENSHOT_FILE_NAME).is_file());
    assert_eq!(
        std::fs::read(folder.join("Alameda - Branco - 60X60cm_faces do produto.zip")).unwrap(),
        b"PK-faces"
    );
    assert!(folder
        .join("Alameda - Branco - 60X60cm - BLOCO DE SKETCHUP.rar")
        .is_file());
}

#[tokio::test]
async fn test_scrape_biancogres_product() {
    let server = MockServer::start().await;
    mount_assets(&server).await;

    let factory = FixtureFactory::new(vec![(
        ABRUZZO_URL.to_string(),
        abruzzo_page(&server.uri()),
    )]);
    let output = TempDir::new().unwrap();
    let scraper = ProductScraper::new(&create_test_config(), output.path()).unwrap();

    let mut session = factory.session();
    let report = scraper.scrape_product(&mut session, ABRUZZO_URL).await.unwrap();

    let folder = output.path().join("Abruzzo - Polido 60x120\u{3002}");
    assert_eq!(report.vendor, Vendor::Biancogres);
    assert_eq!(report.folder, folder);
    assert!(folder.join("abruzzo.png").is_file());
    assert!(folder.join("ficha.pdf").is_file());
    assert!(folder.join(SCREENSHOT_FILE_NAME).is_file());
}

#[test]
fn test_analysis_is_rerun_stable() {
    let config = create_test_config();
    let scraper = ProductScraper::new(&config, ".").unwrap();
    let url = url::Url::parse(ALAMEDA_URL).unwrap();
    let page = alameda_page("https://cdn.example.com");
    let now = chrono::Utc::now();

    let first = scraper.analyze(&page, &url, Vendor::Villagres, now);
    let second = scraper.analyze(&page, &url, Vendor::Villagres, now);
    assert_eq!(first.name, second.name);
    assert_eq!(first.record, second.record);

    let kinds: Vec<_> = first.assets.iter().map(|a| a.kind).collect();
    assert_eq!(kinds, vec![AssetKind::ProductFaces, AssetKind::SketchupBlock]);
    assert!(first.documents.is_empty());
}

#[tokio::test]
async fn test_batch_continues_after_failure() {
    let server = MockServer::start().await;
    mount_assets(&server).await;

    let factory = FixtureFactory::new(vec![(
        ALAMEDA_URL.to_string(),
        alameda_page(&server.uri()),
    )]);
    let output = TempDir::new().unwrap();
    let scraper = ProductScraper::new(&create_test_config(), output.path()).unwrap();

    let missing = "https://villagres.com.br/PT/produtos/naturale/alameda/999999z".to_string();
    let urls = vec![missing.clone(), ALAMEDA_URL.to_string()];
    let summary = scraper.run_batch(&factory, &urls).await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed_urls, vec![missing]);
    assert_eq!(summary.downloads_succeeded, 3);
    assert_eq!(summary.screenshots, 1);
    // every opened session is closed, including the failed one
    assert_eq!(factory.closed_sessions(), 2);
}
