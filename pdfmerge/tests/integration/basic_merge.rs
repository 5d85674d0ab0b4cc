//! Merging whole files end to end.

use pdfmerge::config::{FileSpec, MergeConfig, PageSelector};
use pdfmerge::merge::Merger;
use serial_test::serial;

use crate::common::{page_widths, temp_dir, write_pdf};

#[tokio::test]
async fn test_page_count_is_sum_of_inputs() {
    let dir = temp_dir();
    let a = write_pdf(dir.path(), "a.pdf", 2, 100);
    let b = write_pdf(dir.path(), "b.pdf", 3, 200);
    let c = write_pdf(dir.path(), "c.pdf", 1, 300);
    let output = dir.path().join("out.pdf");

    let config = MergeConfig::new(
        vec![FileSpec::new(&a), FileSpec::new(&b), FileSpec::new(&c)],
        &output,
    );
    let (result, _) = Merger::new().run(&config).await.unwrap();

    assert_eq!(result.statistics.files_merged, 3);
    assert_eq!(result.statistics.total_pages, 6);
    assert_eq!(page_widths(&output).len(), 6);
}

#[tokio::test]
async fn test_output_follows_list_order() {
    let dir = temp_dir();
    let a = write_pdf(dir.path(), "a.pdf", 2, 100);
    let b = write_pdf(dir.path(), "b.pdf", 2, 200);
    let output = dir.path().join("out.pdf");

    let config = MergeConfig::new(vec![FileSpec::new(&b), FileSpec::new(&a)], &output);
    Merger::new().jobs(2).run(&config).await.unwrap();

    assert_eq!(page_widths(&output), vec![201, 202, 101, 102]);
}

#[tokio::test]
async fn test_same_file_listed_twice() {
    let dir = temp_dir();
    let a = write_pdf(dir.path(), "a.pdf", 2, 100);
    let output = dir.path().join("twice.pdf");

    let config = MergeConfig::new(
        vec![FileSpec::new(&a), FileSpec::with_pages(&a, PageSelector::Single(2))],
        &output,
    );
    Merger::new().run(&config).await.unwrap();

    assert_eq!(page_widths(&output), vec![101, 102, 102]);
}

#[tokio::test]
async fn test_rerun_overwrites_with_identical_output() {
    let dir = temp_dir();
    let a = write_pdf(dir.path(), "a.pdf", 3, 100);
    let b = write_pdf(dir.path(), "b.pdf", 3, 200);
    let output = dir.path().join("out.pdf");

    let config = MergeConfig::new(
        vec![FileSpec::new(&a), FileSpec::with_pages(&b, PageSelector::Range(2, 3))],
        &output,
    );
    let merger = Merger::new();

    merger.run(&config).await.unwrap();
    let first = std::fs::read(&output).unwrap();
    merger.run(&config).await.unwrap();
    let second = std::fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert_eq!(page_widths(&output), vec![101, 102, 103, 202, 203]);
}

#[tokio::test]
async fn test_config_file_drives_merge() {
    let dir = temp_dir();
    write_pdf(dir.path(), "a.pdf", 2, 100);
    write_pdf(dir.path(), "b.pdf", 2, 200);
    let output = dir.path().join("from-config.pdf");

    let json = serde_json::json!({
        "files": [
            { "filename": dir.path().join("a.pdf") },
            { "filename": dir.path().join("b.pdf"), "pages": 2 },
        ],
        "output": output,
    });
    let config_path = dir.path().join("merge.json");
    std::fs::write(&config_path, json.to_string()).unwrap();

    let config = MergeConfig::from_json_file(&config_path).await.unwrap();
    Merger::new().run(&config).await.unwrap();

    assert_eq!(page_widths(&output), vec![101, 102, 202]);
}

#[tokio::test]
#[serial]
async fn test_default_config_writes_merged_buffer_in_cwd() {
    let dir = temp_dir();
    write_pdf(dir.path(), "file-1.pdf", 2, 100);
    write_pdf(dir.path(), "file-2.pdf", 1, 200);
    write_pdf(dir.path(), "file-3.pdf", 3, 300);

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = Merger::new().run(&MergeConfig::default()).await;
    std::env::set_current_dir(previous).unwrap();

    let (output, _) = result.unwrap();
    assert_eq!(output.statistics.total_pages, 4);
    assert_eq!(
        page_widths(&dir.path().join("merged-buffer.pdf")),
        vec![101, 102, 201, 301]
    );
}
