//! Integration tests for join-list validation against documents on disk.

use pdfjoin::join::{JoinListSource, decode_inline};
use pdfjoin::validation::JoinValidator;
use pdfjoin::{JoinItem, PdfJoinError};
use std::collections::BTreeMap;

use crate::common::Sources;

#[tokio::test]
async fn test_validate_reports_usage_per_source() {
    let sources = Sources::new(&[12, 7]);
    let items = decode_inline("0:1,blank,1:2-4,0:5,0:1").unwrap();

    let report = JoinValidator::new()
        .validate(&sources.paths, &items)
        .await
        .unwrap();

    assert!(report.is_valid());
    assert_eq!(report.usage[0].file, sources.paths[0]);
    assert_eq!(
        report.usage[0].used_pages,
        BTreeMap::from([(1, 2), (5, 1)])
    );
    assert_eq!(report.usage[1].distinct_pages(), 3);
    assert_eq!(report.blank_pages, 1);
    assert_eq!(report.planned_pages, 7);
}

#[tokio::test]
async fn test_validate_collects_every_fault() {
    let sources = Sources::new(&[12, 7]);
    let items = decode_inline("0:1,1:2,blank,0:99,1:6-8,2:1").unwrap();

    let report = JoinValidator::new()
        .jobs(2)
        .validate(&sources.paths, &items)
        .await
        .unwrap();

    assert_eq!(
        report.errors,
        vec![
            "Entry #3: pdf[0] has no page 99 (max 12)",
            "Entry #4: pdf[1] has no page 8 (max 7)",
            "Entry #5: pdf[2] has no page 1 (max 0)",
        ]
    );
    assert_eq!(
        report.usage[1].used_pages,
        BTreeMap::from([(2, 1), (6, 1), (7, 1)])
    );

    let err = report.into_result().unwrap_err();
    assert!(matches!(err, PdfJoinError::ValidationFailed { .. }));
    assert_eq!(err.exit_code(), 7);
}

#[tokio::test]
async fn test_validate_structured_join_list_from_file() {
    let sources = Sources::new(&[3, 3]);
    let list = sources.write_raw(
        "list.json",
        br#"[{"pdf":0,"page":1},{"blank":true},{"pdf":1,"page":"2-3"},{"pdf":1}]"#,
    );

    let items = JoinListSource::File(list).load().await.unwrap();
    let report = JoinValidator::new()
        .validate(&sources.paths, &items)
        .await
        .unwrap();

    assert_eq!(items.len(), 4);
    assert_eq!(report.errors, vec!["Entry #3: missing 'page' value"]);
    assert_eq!(report.planned_pages, 4);
}

#[tokio::test]
async fn test_validate_blank_only_list_without_sources() {
    let report = JoinValidator::new()
        .validate(&[], &[JoinItem::Blank])
        .await
        .unwrap();

    assert!(report.is_valid());
    assert_eq!(report.planned_pages, 1);
}

#[tokio::test]
async fn test_validate_fails_when_a_source_cannot_load() {
    let sources = Sources::new(&[2]);
    let broken = sources.write_raw("broken.pdf", b"not a pdf");
    let paths = vec![sources.paths[0].clone(), broken];

    let err = JoinValidator::new()
        .validate(&paths, &decode_inline("0:1").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfJoinError::FailedToLoadPdf { .. }));
    assert_eq!(err.exit_code(), 3);
}
