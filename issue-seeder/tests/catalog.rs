use std::path::PathBuf;

use issue_seeder::{load_catalog, CatalogError};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("..")
}

#[test]
fn roadmap_catalog_loads() {
    let catalog = load_catalog(&workspace_root().join("catalog/roadmap.toml")).unwrap();

    assert_eq!(catalog.len(), 37);
    assert_eq!(
        catalog.repository().map(ToString::to_string).as_deref(),
        Some("SkanderMulder/extractoR")
    );

    let first = &catalog.issues()[0];
    assert_eq!(first.title, "Run full CRAN checks and fix all NOTEs/WARNINGs");
    assert_eq!(first.labels, vec!["cran", "priority-high", "phase-1"]);
    assert!(first.body.starts_with("Run comprehensive CRAN checks"));

    assert!(catalog
        .issues()
        .iter()
        .all(|issue| !issue.title.trim().is_empty() && issue.milestone.is_none()));
}

#[test]
fn blank_title_fixture_is_rejected() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/blank_title.toml");

    match load_catalog(&path) {
        Err(CatalogError::ValidationError { message, .. }) => {
            assert!(message.contains("issue 2"), "unexpected message: {message}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
