//! CLI argument parsing for pdfmerge.
//!
//! ```text
//! pdfmerge merge [FILE[:PAGES]]... [-o OUT] [-c CONFIG] [-j N] [-v | -q]
//! pdfmerge bench [FILE[:PAGES]]... [-n ITERATIONS] [-o OUT] [-c CONFIG] [-j N] [-v | -q]
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdfmerge::config::{BenchConfig, DEFAULT_ITERATIONS, FileSpec, MergeConfig};
use pdfmerge::error::Result;

/// Merge page ranges of PDF files into one document.
///
/// Without any FILE arguments or --config, merges file-1.pdf, file-2.pdf
/// and page 1 of file-3.pdf into merged-buffer.pdf.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Merge page ranges of PDF files into one document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// What to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge the files once and write the result
    Merge(MergeArgs),

    /// Repeat the merge and report average time, CPU and memory usage
    Bench(BenchArgs),
}

impl Command {
    /// Merge arguments shared by every subcommand.
    pub fn merge_args(&self) -> &MergeArgs {
        match self {
            Command::Merge(args) => args,
            Command::Bench(args) => &args.merge,
        }
    }
}

/// Arguments describing one merge.
#[derive(Args, Debug, Clone, Default)]
pub struct MergeArgs {
    /// Input files in merge order, each optionally followed by a page selector
    ///
    /// PAGES is a single page ("3") or an inclusive range ("2-5").
    ///
    /// Examples:
    ///   pdfmerge merge a.pdf b.pdf:2-4 c.pdf:1 -o out.pdf
    #[arg(value_name = "FILE[:PAGES]")]
    pub files: Vec<FileSpec>,

    /// Output PDF file path (overwritten on every run)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Read the file list from a JSON config file
    ///
    /// Shape: { "files": [{ "filename": "a.pdf", "pages": "1-2" }], "output": "out.pdf", "jobs": 2 }
    /// FILE arguments, --output and --jobs override the values it contains.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of files read concurrently
    ///
    /// Defaults to the number of CPU cores.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Verbose output, including debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl MergeArgs {
    /// Build the merge configuration these arguments describe.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the resulting configuration is invalid.
    pub async fn to_config(&self) -> Result<MergeConfig> {
        let mut config = match &self.config {
            Some(path) => MergeConfig::from_json_file(path).await?,
            None => MergeConfig::default(),
        };

        if !self.files.is_empty() {
            config.files = self.files.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if self.jobs.is_some() {
            config.jobs = self.jobs;
        }

        config.validate()?;
        Ok(config)
    }

    /// Default log filter for the verbosity flags.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Arguments of the `bench` subcommand.
#[derive(Args, Debug, Clone)]
pub struct BenchArgs {
    /// Merge to benchmark
    #[command(flatten)]
    pub merge: MergeArgs,

    /// Number of back-to-back merge iterations
    #[arg(short = 'n', long, value_name = "N", default_value_t = DEFAULT_ITERATIONS)]
    pub iterations: usize,
}

impl BenchArgs {
    /// Build the validated benchmark settings.
    pub fn to_bench_config(&self) -> Result<BenchConfig> {
        let config = BenchConfig {
            iterations: self.iterations,
        };
        config.validate()?;
        Ok(config)
    }
}
