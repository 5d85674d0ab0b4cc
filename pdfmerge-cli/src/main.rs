//! pdfmerge - Merge page ranges of PDF files into one document.
//!
//! `pdfmerge merge` runs the merge once; `pdfmerge bench` repeats it and
//! prints the average elapsed time, CPU and memory usage.

mod cli;

use clap::Parser;
use std::process;

use crate::cli::{BenchArgs, Cli, Command, MergeArgs};
use pdfmerge::bench::{Benchmark, TrackingAllocator};
use pdfmerge::error::PdfMergeError;
use pdfmerge::merge::Merger;
use pdfmerge::output::{OutputFormatter, display_merge_statistics, display_report};

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.command.merge_args().log_filter()),
    )
    .init();

    if let Err(err) = run(cli).await {
        log::debug!("failed in {} stage", err.stage());
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), PdfMergeError> {
    match cli.command {
        Command::Merge(args) => run_merge(&args).await,
        Command::Bench(args) => run_bench(&args).await,
    }
}

fn formatter_for(args: &MergeArgs) -> OutputFormatter {
    OutputFormatter::new(args.quiet, args.verbose)
}

async fn run_merge(args: &MergeArgs) -> Result<(), PdfMergeError> {
    let config = args.to_config().await?;
    let formatter = formatter_for(args);

    formatter.section(&format!("{} v{}", pdfmerge::NAME, pdfmerge::VERSION));
    formatter.info(&format!("Merging {} file(s)...", config.files.len()));
    for spec in &config.files {
        formatter.debug(&spec.to_string());
    }

    let (output, write_stats) = Merger::new().run(&config).await?;
    display_merge_statistics(&formatter, &output.statistics, &write_stats);

    Ok(())
}

async fn run_bench(args: &BenchArgs) -> Result<(), PdfMergeError> {
    let config = args.merge.to_config().await?;
    let bench_config = args.to_bench_config()?;
    let formatter = formatter_for(&args.merge);

    formatter.info(&format!(
        "Benchmarking {} iteration(s) of a {}-file merge into {}...",
        bench_config.iterations,
        config.files.len(),
        config.output.display()
    ));

    let report = Benchmark::new(bench_config)
        .run(&Merger::new(), &config)
        .await?;
    display_report(&formatter, &report);

    Ok(())
}
