//! Page selectors applied during a merge.

use pdfmerge::config::{FileSpec, MergeConfig, PageSelector};
use pdfmerge::merge::Merger;
use rstest::rstest;

use crate::common::{page_object_count, page_widths, temp_dir, write_pdf};

#[rstest]
#[case(PageSelector::All, vec![101, 102, 103, 104, 105])]
#[case(PageSelector::Single(1), vec![101])]
#[case(PageSelector::Single(5), vec![105])]
#[case(PageSelector::Range(2, 4), vec![102, 103, 104])]
#[case(PageSelector::Range(3, 3), vec![103])]
#[tokio::test]
async fn test_selector_picks_pages(#[case] pages: PageSelector, #[case] expected: Vec<i64>) {
    let dir = temp_dir();
    let input = write_pdf(dir.path(), "five.pdf", 5, 100);
    let output = dir.path().join("out.pdf");

    let config = MergeConfig::new(vec![FileSpec::with_pages(&input, pages)], &output);
    let (result, _) = Merger::new().run(&config).await.unwrap();

    assert_eq!(result.statistics.total_pages, expected.len());
    assert_eq!(page_widths(&output), expected);
}

#[tokio::test]
async fn test_selectors_are_per_entry() {
    let dir = temp_dir();
    let a = write_pdf(dir.path(), "a.pdf", 4, 100);
    let b = write_pdf(dir.path(), "b.pdf", 4, 200);
    let output = dir.path().join("out.pdf");

    let config = MergeConfig::new(
        vec![
            FileSpec::with_pages(&a, PageSelector::Range(3, 4)),
            FileSpec::with_pages(&b, PageSelector::Single(1)),
            FileSpec::with_pages(&a, PageSelector::Single(1)),
        ],
        &output,
    );
    Merger::new().run(&config).await.unwrap();

    assert_eq!(page_widths(&output), vec![103, 104, 201, 101]);
}

#[tokio::test]
async fn test_selector_parsed_from_command_line_form() {
    let dir = temp_dir();
    let input = write_pdf(dir.path(), "doc.pdf", 3, 100);
    let output = dir.path().join("out.pdf");

    let spec: FileSpec = format!("{}:2-3", input.display()).parse().unwrap();
    let config = MergeConfig::new(vec![spec], &output);
    Merger::new().run(&config).await.unwrap();

    assert_eq!(page_widths(&output), vec![102, 103]);
}

#[tokio::test]
async fn test_output_holds_only_selected_pages() {
    let dir = temp_dir();
    let a = write_pdf(dir.path(), "a.pdf", 1, 100);
    let b = write_pdf(dir.path(), "b.pdf", 5, 200);
    let output = dir.path().join("out.pdf");

    let config = MergeConfig::new(
        vec![
            FileSpec::new(&a),
            FileSpec::with_pages(&b, PageSelector::Single(1)),
        ],
        &output,
    );
    Merger::new().run(&config).await.unwrap();

    assert_eq!(page_widths(&output), vec![101, 201]);
    assert_eq!(page_object_count(&output), 2);
}
