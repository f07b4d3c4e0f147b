//! Integration tests for assembling and writing joined documents.

use pdfjoin::assemble::{AssembleOptions, Assembler};
use pdfjoin::config::{BlankPageSize, CompressionLevel};
use pdfjoin::io::{PdfReader, PdfWriter};
use pdfjoin::join::{JoinListSource, decode_inline, decode_structured};
use pdfjoin::validation::JoinValidator;
use rstest::rstest;

use crate::common::{BLANK, Sources, page_widths_of, width};

#[tokio::test]
async fn test_join_and_write() {
    let sources = Sources::new(&[12, 7]);
    let items = decode_inline("0:1,blank,1:2-4,0:5").unwrap();
    let output = sources.output("joined.pdf");

    let result = Assembler::new()
        .assemble(&sources.paths, &items)
        .await
        .unwrap();
    let stats = PdfWriter::new().write(&result.bytes, &output).await.unwrap();

    assert_eq!(stats.file_size, result.bytes.len() as u64);
    assert_eq!(
        page_widths_of(&output),
        vec![
            width(0, 1),
            BLANK,
            width(1, 2),
            width(1, 3),
            width(1, 4),
            width(0, 5)
        ]
    );
    assert_eq!(result.statistics.sources, 2);
    assert_eq!(result.statistics.copied_pages, 5);
    assert_eq!(result.statistics.blank_pages, 1);
    assert_eq!(result.statistics.total_pages, 6);
}

#[tokio::test]
async fn test_output_page_count_matches_validation() {
    let sources = Sources::new(&[4, 6]);
    let items = decode_inline("1:1-6,blank,0:4,0:4,,0:1-2").unwrap();

    let report = JoinValidator::new()
        .validate(&sources.paths, &items)
        .await
        .unwrap();
    let result = Assembler::new()
        .assemble(&sources.paths, &items)
        .await
        .unwrap();

    assert!(report.is_valid());
    assert_eq!(result.statistics.total_pages, report.planned_pages);
    assert_eq!(result.statistics.total_pages, 12);
}

#[tokio::test]
async fn test_repeated_and_reversed_selection() {
    let sources = Sources::new(&[3]);
    let items = decode_inline("0:3,0:2,0:1,0:2").unwrap();
    let output = sources.output("reversed.pdf");

    let result = Assembler::new()
        .jobs(1)
        .assemble(&sources.paths, &items)
        .await
        .unwrap();
    PdfWriter::new().write(&result.bytes, &output).await.unwrap();

    assert_eq!(
        page_widths_of(&output),
        vec![width(0, 3), width(0, 2), width(0, 1), width(0, 2)]
    );
}

#[tokio::test]
async fn test_same_file_given_twice() {
    let sources = Sources::new(&[2]);
    let paths = vec![sources.paths[0].clone(), sources.paths[0].clone()];
    let items = decode_inline("1:2,0:1").unwrap();

    let result = Assembler::new().assemble(&paths, &items).await.unwrap();
    let output = sources.output("twice.pdf");
    PdfWriter::new().write(&result.bytes, &output).await.unwrap();

    assert_eq!(page_widths_of(&output), vec![width(0, 2), width(0, 1)]);
}

#[tokio::test]
async fn test_output_can_be_loaded_as_a_source() {
    let sources = Sources::new(&[3, 2]);
    let first = Assembler::new()
        .assemble(&sources.paths, &decode_inline("1:1-2,0:3").unwrap())
        .await
        .unwrap();
    let intermediate = sources.output("intermediate.pdf");
    PdfWriter::new().write(&first.bytes, &intermediate).await.unwrap();

    let loaded = PdfReader::new().load(&intermediate).await.unwrap();
    assert_eq!(loaded.page_count, 3);

    let second = Assembler::new()
        .assemble(&[intermediate], &decode_inline("0:3,0:1").unwrap())
        .await
        .unwrap();
    let output = sources.output("final.pdf");
    PdfWriter::new().write(&second.bytes, &output).await.unwrap();

    assert_eq!(page_widths_of(&output), vec![width(0, 3), width(1, 1)]);
}

#[rstest]
#[case(BlankPageSize::A4, vec![width(0, 1), 595])]
#[case(BlankPageSize::Letter, vec![width(0, 1), 612])]
#[case(BlankPageSize::Match, vec![width(0, 1), width(0, 1)])]
#[tokio::test]
async fn test_blank_page_sizes(#[case] blank_page_size: BlankPageSize, #[case] expected: Vec<i64>) {
    let sources = Sources::new(&[1]);
    let options = AssembleOptions {
        blank_page_size,
        ..Default::default()
    };

    let result = Assembler::with_options(options)
        .assemble(&sources.paths, &decode_inline("0:1,blank").unwrap())
        .await
        .unwrap();
    let output = sources.output("blank.pdf");
    PdfWriter::new().write(&result.bytes, &output).await.unwrap();

    assert_eq!(page_widths_of(&output), expected);
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_every_compression_level_produces_a_loadable_document(
    #[case] compression: CompressionLevel,
) {
    let sources = Sources::new(&[4, 2]);
    let options = AssembleOptions {
        compression,
        ..Default::default()
    };

    let result = Assembler::with_options(options)
        .assemble(&sources.paths, &decode_inline("0:2-4,1:1").unwrap())
        .await
        .unwrap();
    let output = sources.output("compressed.pdf");
    PdfWriter::new().write(&result.bytes, &output).await.unwrap();

    assert_eq!(
        page_widths_of(&output),
        vec![width(0, 2), width(0, 3), width(0, 4), width(1, 1)]
    );
}

#[tokio::test]
async fn test_join_from_structured_list_on_disk() {
    let sources = Sources::new(&[5, 5]);
    let list = sources.write_raw(
        "list.json",
        br#"[{"pdf":1,"page":"4-5"},{"blank":true},{"pdf":0,"page":2}]"#,
    );

    let items = JoinListSource::File(list).load().await.unwrap();
    assert_eq!(
        items,
        decode_structured(r#"[{"pdf":1,"page":"4-5"},{"blank":true},{"pdf":0,"page":2}]"#)
            .unwrap()
    );

    let result = Assembler::new()
        .assemble(&sources.paths, &items)
        .await
        .unwrap();
    let output = sources.output("structured.pdf");
    PdfWriter::new().write(&result.bytes, &output).await.unwrap();

    assert_eq!(
        page_widths_of(&output),
        vec![width(1, 4), width(1, 5), BLANK, width(0, 2)]
    );
}

#[tokio::test]
async fn test_write_creates_missing_directories() {
    let sources = Sources::new(&[1]);
    let output = sources.output("nested/dir/joined.pdf");

    let result = Assembler::new()
        .assemble(&sources.paths, &decode_inline("0:1").unwrap())
        .await
        .unwrap();
    PdfWriter::new().write(&result.bytes, &output).await.unwrap();

    assert!(output.exists());
    assert_eq!(page_widths_of(&output), vec![width(0, 1)]);
}

#[tokio::test]
async fn test_empty_join_list_writes_a_document_without_pages() {
    let sources = Sources::new(&[2]);
    let items = decode_structured("[]").unwrap();

    let result = Assembler::new()
        .assemble(&sources.paths, &items)
        .await
        .unwrap();
    let output = sources.output("empty.pdf");
    PdfWriter::new().write(&result.bytes, &output).await.unwrap();

    assert_eq!(result.statistics.total_pages, 0);
    assert!(page_widths_of(&output).is_empty());
    assert_eq!(PdfReader::new().load(&output).await.unwrap().page_count, 0);
}
