//! User-facing output.
//!
//! [`OutputFormatter`] prints status lines honoring quiet and verbose
//! modes. The `display_*` helpers render merge results and benchmark
//! reports through it.

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::bench::AverageReport;
use crate::io::WriteStatistics;
use crate::merge::MergeStatistics;

/// Display the outcome of a merge and its write.
pub fn display_merge_statistics(
    formatter: &OutputFormatter,
    stats: &MergeStatistics,
    write_stats: &WriteStatistics,
) {
    formatter.success(&format!(
        "Merged {} file(s) into {} ({} pages, {})",
        stats.files_merged,
        write_stats.output_path.display(),
        stats.total_pages,
        write_stats.format_file_size()
    ));

    if formatter.is_verbose() {
        formatter.section("Statistics");
        formatter.detail("Input files", &stats.files_merged.to_string());
        formatter.detail("Total pages", &stats.total_pages.to_string());
        formatter.detail("Input size", &stats.format_input_size());
        formatter.detail("Output size", &stats.format_output_size());
        formatter.detail(
            "Load time",
            &format!("{:.2}s", stats.load_time.as_secs_f64()),
        );
        formatter.detail(
            "Merge time",
            &format!("{:.2}s", stats.merge_time.as_secs_f64()),
        );
        formatter.detail(
            "Write time",
            &format!("{:.2}s", write_stats.write_time.as_secs_f64()),
        );
    }
}

/// Display the averaged benchmark report.
///
/// The three report lines are printed even in quiet mode.
pub fn display_report(formatter: &OutputFormatter, report: &AverageReport) {
    formatter.debug(&format!("Averaged over {} iteration(s)", report.iterations));
    for line in report.lines() {
        formatter.report(&line);
    }
}
