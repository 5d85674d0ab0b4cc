//! Failures abort the merge and leave no output behind.

use pdfmerge::config::{FileSpec, MergeConfig, PageSelector};
use pdfmerge::error::PdfMergeError;
use pdfmerge::merge::Merger;

use crate::common::{page_widths, temp_dir, temp_files, write_pdf};

#[tokio::test]
async fn test_missing_input_writes_nothing() {
    let dir = temp_dir();
    let a = write_pdf(dir.path(), "file-1.pdf", 1, 100);
    let output = dir.path().join("merged-buffer.pdf");

    let config = MergeConfig::new(
        vec![FileSpec::new(&a), FileSpec::new(dir.path().join("file-2.pdf"))],
        &output,
    );
    let err = Merger::new().run(&config).await.unwrap_err();

    match &err {
        PdfMergeError::FileNotFound { path } => assert!(path.ends_with("file-2.pdf")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.stage(), "read");
    assert!(!output.exists());
}

#[tokio::test]
async fn test_failed_rerun_keeps_previous_output() {
    let dir = temp_dir();
    let a = write_pdf(dir.path(), "a.pdf", 2, 100);
    let output = dir.path().join("out.pdf");

    let good = MergeConfig::new(vec![FileSpec::new(&a)], &output);
    Merger::new().run(&good).await.unwrap();
    let before = std::fs::read(&output).unwrap();

    let bad = MergeConfig::new(
        vec![FileSpec::new(&a), FileSpec::with_pages(&a, PageSelector::Single(9))],
        &output,
    );
    let err = Merger::new().run(&bad).await.unwrap_err();

    assert!(matches!(err, PdfMergeError::InvalidPageRange { total_pages: 2, .. }));
    assert_eq!(std::fs::read(&output).unwrap(), before);
}

#[tokio::test]
async fn test_corrupt_input_names_file_and_selector() {
    let dir = temp_dir();
    let corrupt = dir.path().join("corrupt.pdf");
    std::fs::write(&corrupt, b"this is not a pdf").unwrap();
    let output = dir.path().join("out.pdf");

    let config = MergeConfig::new(
        vec![FileSpec::with_pages(&corrupt, PageSelector::Range(1, 2))],
        &output,
    );
    let err = Merger::new().run(&config).await.unwrap_err();

    match &err {
        PdfMergeError::MergeFailed { path, pages, .. } => {
            assert_eq!(path, &corrupt);
            assert_eq!(*pages, PageSelector::Range(1, 2));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.stage(), "merge");
    assert!(!output.exists());
}

#[tokio::test]
async fn test_empty_file_list() {
    let dir = temp_dir();
    let config = MergeConfig::new(Vec::new(), dir.path().join("out.pdf"));

    let err = Merger::new().run(&config).await.unwrap_err();
    assert!(matches!(err, PdfMergeError::NoFilesToMerge));
}

#[tokio::test]
async fn test_output_path_that_is_a_directory() {
    let dir = temp_dir();
    let a = write_pdf(dir.path(), "a.pdf", 1, 100);
    let output = dir.path().join("taken");
    std::fs::create_dir(&output).unwrap();

    let config = MergeConfig::new(vec![FileSpec::new(&a)], &output);
    let err = Merger::new().run(&config).await.unwrap_err();

    assert_eq!(err.stage(), "write");
    assert!(temp_files(dir.path()).is_empty());
}

#[tokio::test]
async fn test_input_sharing_output_stem_survives() {
    let dir = temp_dir();
    let input = write_pdf(dir.path(), "out.tmp", 3, 100);
    let before = std::fs::read(&input).unwrap();
    let output = dir.path().join("out.pdf");

    let config = MergeConfig::new(vec![FileSpec::new(&input)], &output);
    Merger::new().run(&config).await.unwrap();

    assert_eq!(std::fs::read(&input).unwrap(), before);
    assert_eq!(page_widths(&output), vec![101, 102, 103]);
    assert_eq!(temp_files(dir.path()), vec![input]);
}
