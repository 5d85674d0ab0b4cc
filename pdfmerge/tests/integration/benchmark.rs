//! The benchmark runner over real merges.

use pdfmerge::bench::Benchmark;
use pdfmerge::config::{BenchConfig, FileSpec, MergeConfig, PageSelector};
use pdfmerge::error::PdfMergeError;
use pdfmerge::merge::Merger;

use crate::common::{page_widths, temp_dir, write_pdf};

#[tokio::test]
async fn test_benchmark_reports_means_and_leaves_output() {
    let dir = temp_dir();
    let a = write_pdf(dir.path(), "file-1.pdf", 2, 100);
    let b = write_pdf(dir.path(), "file-3.pdf", 3, 300);
    let output = dir.path().join("merged-buffer.pdf");

    let config = MergeConfig::new(
        vec![FileSpec::new(&a), FileSpec::with_pages(&b, PageSelector::Single(1))],
        &output,
    );
    let mut bench = Benchmark::new(BenchConfig { iterations: 3 });
    let report = bench.run(&Merger::new(), &config).await.unwrap();

    assert_eq!(report.iterations, 3);
    assert!(report.elapsed_seconds > 0.0);
    assert!(report.cpu_user >= 0.0);
    assert!(report.cpu_system >= 0.0);
    assert_eq!(page_widths(&output), vec![101, 102, 301]);

    let lines = report.lines();
    assert!(lines[0].starts_with("Average elapsed time: "));
    assert!(lines[0].ends_with(" seconds"));
    assert!(lines[1].starts_with("Average CPU usage: user "));
    assert!(lines[2].starts_with("Average memory usage: rss "));
}

#[tokio::test]
async fn test_benchmark_aborts_on_failing_merge() {
    let dir = temp_dir();
    let output = dir.path().join("merged-buffer.pdf");
    let config = MergeConfig::new(vec![FileSpec::new(dir.path().join("missing.pdf"))], &output);

    let mut bench = Benchmark::new(BenchConfig { iterations: 5 });
    let err = bench.run(&Merger::new(), &config).await.unwrap_err();

    assert!(matches!(err, PdfMergeError::FileNotFound { .. }));
    assert!(!output.exists());
}
