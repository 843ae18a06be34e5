//! Catalog organization over a real directory tree

use catalog_harvest::config::{parse_config, Config};
use catalog_harvest::organize::{organize, NO_FORMAT};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn make_product(root: &Path, name: &str) {
    let folder = root.join(name);
    fs::create_dir_all(&folder).unwrap();
    fs::write(folder.join("screenshot.png"), b"png").unwrap();
}

#[test]
fn test_organize_tree_and_idempotence() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    make_product(root, "Alameda Natural - Externo - 60X60cm");
    make_product(root, "Abruzzo - Polido 60x120\u{3002}");
    make_product(root, "Linha Decoração");
    make_product(root, "Alameda - Branco - 60X60cm");

    let config = Config::default();
    let summary = organize(root, &config).unwrap();

    assert_eq!(summary.scanned, 4);
    assert_eq!(summary.organized, 3);
    assert_eq!(summary.uncategorized, vec!["Alameda - Branco - 60X60cm".to_string()]);
    assert!(summary.collisions.is_empty());
    assert!(summary.failed.is_empty());
    assert_eq!(
        summary.formats.iter().cloned().collect::<Vec<_>>(),
        vec!["60X120".to_string(), "60X60CM".to_string(), NO_FORMAT.to_string()]
    );

    assert!(root
        .join("VILLAGRES/EXTERNO/60X60CM/Alameda Natural - Externo - 60X60cm/screenshot.png")
        .is_file());
    assert!(root
        .join("BIANCOGRES/POLIDO/60X120/Abruzzo - Polido 60x120\u{3002}")
        .is_dir());
    assert!(root.join("VILLAGRES/DECOR/SEM_FORMATO/Linha Decoração").is_dir());
    assert!(root.join("Alameda - Branco - 60X60cm").is_dir());

    let second = organize(root, &config).unwrap();
    assert_eq!(second.organized, 0);
    assert_eq!(second.scanned, 1);
    assert_eq!(second.uncategorized.len(), 1);
}

#[test]
fn test_organize_with_configured_categories() {
    let config = parse_config(
        r#"
[[category]]
name = "MADEIRA"
keywords = ["MADEIRA", "WOOD"]

[[category]]
name = "POLIDO"
keywords = ["POLIDO"]
"#,
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    make_product(dir.path(), "Piso Madeira Polido 20X120cm");

    let summary = organize(dir.path(), &config).unwrap();
    assert_eq!(summary.organized, 1);
    assert!(dir
        .path()
        .join("VILLAGRES/MADEIRA/20X120CM/Piso Madeira Polido 20X120cm")
        .is_dir());
    assert!(dir.path().join("BIANCOGRES/MADEIRA").is_dir());
    assert!(!dir.path().join("VILLAGRES/EXTERNO").exists());
}
