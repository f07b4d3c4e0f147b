//! Integration tests for error handling and edge cases.

use pdfjoin::PdfJoinError;
use pdfjoin::assemble::Assembler;
use pdfjoin::join::{JoinListSource, decode_inline};
use pdfjoin::{JoinItem, PageRef, PageSpec};
use std::path::PathBuf;

use crate::common::Sources;

#[tokio::test]
async fn test_error_nonexistent_input() {
    let err = Assembler::new()
        .assemble(
            &[PathBuf::from("/nonexistent/file.pdf")],
            &decode_inline("0:1").unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PdfJoinError::FileNotFound { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_error_directory_as_input() {
    let sources = Sources::new(&[1]);

    let err = Assembler::new()
        .assemble(
            &[sources.dir.path().to_path_buf()],
            &decode_inline("0:1").unwrap(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PdfJoinError::NotAFile { .. }));
}

#[tokio::test]
async fn test_error_not_a_pdf() {
    let sources = Sources::new(&[]);
    let path = sources.write_raw("notes.pdf", b"hello, world");

    let err = Assembler::new()
        .assemble(&[path], &decode_inline("0:1").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfJoinError::FailedToLoadPdf { .. }));
}

#[tokio::test]
async fn test_error_page_out_of_range_names_the_entry() {
    let sources = Sources::new(&[12, 7]);

    let err = Assembler::new()
        .assemble(&sources.paths, &decode_inline("0:1,1:2,blank,0:99").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Entry #3: pdf[0] has no page 99 (max 12)");
    assert!(err.is_entry_fault());
    assert_eq!(err.exit_code(), 6);
}

#[tokio::test]
async fn test_error_unknown_source() {
    let sources = Sources::new(&[2]);

    let err = Assembler::new()
        .assemble(&sources.paths, &decode_inline("0:1,4:1").unwrap())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PdfJoinError::UnknownSource {
            entry: 1,
            pdf: 4,
            available: 1
        }
    ));
}

#[tokio::test]
async fn test_error_malformed_entries() {
    let sources = Sources::new(&[2]);
    let assembler = Assembler::new();

    let missing_pdf = vec![JoinItem::Page(PageRef {
        pdf: None,
        page: Some(PageSpec::Page(1)),
    })];
    let err = assembler
        .assemble(&sources.paths, &missing_pdf)
        .await
        .unwrap_err();
    assert!(matches!(err, PdfJoinError::InvalidEntry { entry: 0 }));

    let missing_page = vec![
        JoinItem::Blank,
        JoinItem::Page(PageRef {
            pdf: Some(0),
            page: None,
        }),
    ];
    let err = assembler
        .assemble(&sources.paths, &missing_page)
        .await
        .unwrap_err();
    assert!(matches!(err, PdfJoinError::MissingPage { entry: 1 }));

    let bad_range = vec![JoinItem::page(0, PageSpec::Range("2-1".into()))];
    let err = assembler
        .assemble(&sources.paths, &bad_range)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PdfJoinError::InvalidPageSpec { entry: Some(0), .. }
    ));
}

#[test]
fn test_error_invalid_inline_token() {
    let err = decode_inline("0:1, x:2 ").unwrap_err();

    assert!(matches!(
        err,
        PdfJoinError::InvalidTokenFormat { ref token } if token == " x:2 "
    ));
}

#[tokio::test]
async fn test_error_join_list_file_missing() {
    let err = JoinListSource::File(PathBuf::from("/nonexistent/list.json"))
        .load()
        .await
        .unwrap_err();

    assert!(matches!(err, PdfJoinError::FailedToReadJoinList { .. }));
    assert_eq!(err.exit_code(), 2);
}

#[tokio::test]
async fn test_error_join_list_not_an_array() {
    let sources = Sources::new(&[]);
    let list = sources.write_raw("list.json", br#"{"pdf":0,"page":1}"#);

    let err = JoinListSource::File(list).load().await.unwrap_err();

    assert!(matches!(err, PdfJoinError::InvalidJoinList { .. }));
}
