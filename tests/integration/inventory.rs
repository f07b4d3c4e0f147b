//! Integration tests for source inventory.

use pdfjoin::PdfJoinError;
use pdfjoin::io::{DocumentInfo, PdfReader};
use pdfjoin::utils::collect_paths_for_patterns;

use crate::common::Sources;

#[tokio::test]
async fn test_inventory_reports_page_counts_in_order() {
    let sources = Sources::new(&[12, 7, 1]);

    let inventory = PdfReader::new().inventory(&sources.paths, 2).await.unwrap();

    let counts: Vec<usize> = inventory.iter().map(|info| info.total_pages).collect();
    assert_eq!(counts, vec![12, 7, 1]);
    assert_eq!(inventory[1].file, sources.paths[1]);
}

#[tokio::test]
async fn test_inventory_is_independent_of_jobs() {
    let sources = Sources::new(&[3, 5, 2, 4]);
    let reader = PdfReader::new();

    let sequential = reader.inventory(&sources.paths, 1).await.unwrap();
    let concurrent = reader.inventory(&sources.paths, 8).await.unwrap();

    assert_eq!(sequential, concurrent);
}

#[tokio::test]
async fn test_inventory_of_same_file_twice() {
    let sources = Sources::new(&[4]);
    let paths = vec![sources.paths[0].clone(), sources.paths[0].clone()];

    let inventory = PdfReader::new().inventory(&paths, 2).await.unwrap();

    assert_eq!(inventory.len(), 2);
    assert_eq!(inventory[0], inventory[1]);
}

#[tokio::test]
async fn test_inventory_fails_as_a_whole() {
    let sources = Sources::new(&[2]);
    let paths = vec![sources.paths[0].clone(), sources.output("missing.pdf")];

    let err = PdfReader::new().inventory(&paths, 2).await.unwrap_err();

    assert!(matches!(err, PdfJoinError::FileNotFound { .. }));
    assert!(err.is_load_error());
}

#[tokio::test]
async fn test_inventory_from_glob() {
    let sources = Sources::new(&[1, 2, 3]);
    let pattern = sources.dir.path().join("source*.pdf");

    let paths = collect_paths_for_patterns([pattern.to_string_lossy()]).unwrap();
    let inventory = PdfReader::new().inventory(&paths, 1).await.unwrap();

    assert_eq!(paths, sources.paths);
    assert_eq!(inventory.len(), 3);
}

#[test]
fn test_inventory_json_shape() {
    let info = DocumentInfo {
        file: "a.pdf".into(),
        total_pages: 12,
    };

    let value = serde_json::to_value(&info).unwrap();

    assert_eq!(value, serde_json::json!({"file": "a.pdf", "totalPages": 12}));
}
