//! The file merge runner.
//!
//! Loads every input concurrently, re-sequences the loaded documents into
//! list order, appends them to a fresh accumulator one at a time, and
//! finalizes once. [`Merger::run`] also writes the result to the configured
//! output path.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::{FileSpec, MergeConfig};
use crate::error::{PdfMergeError, Result};
use crate::io::{DocumentLoader, FileSource, FsSource, PdfWriter, WriteStatistics};
use crate::merge::accumulator::{LopdfAccumulator, MergeAccumulator};
use crate::utils::format_bytes;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of documents appended.
    pub files_merged: usize,

    /// Total number of pages in the merged document.
    pub total_pages: usize,

    /// Total size of the input files.
    pub input_size: u64,

    /// Size of the merged buffer.
    pub output_size: u64,

    /// Time taken to load all inputs.
    pub load_time: Duration,

    /// Total time for load, append and finalize.
    pub merge_time: Duration,
}

impl MergeStatistics {
    /// Format input size as human-readable string.
    pub fn format_input_size(&self) -> String {
        format_bytes(self.input_size)
    }

    /// Format output size as human-readable string.
    pub fn format_output_size(&self) -> String {
        format_bytes(self.output_size)
    }
}

/// Result of a merge operation.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The merged PDF bytes.
    pub bytes: Vec<u8>,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,

    /// Paths of files that were merged, in merge order.
    pub merged_files: Vec<PathBuf>,
}

/// Merges lists of files into one PDF buffer.
#[derive(Debug, Clone, Default)]
pub struct Merger<S = FsSource> {
    loader: DocumentLoader<S>,
    writer: PdfWriter,
    jobs: Option<usize>,
}

impl Merger<FsSource> {
    /// Create a merger reading from the filesystem.
    pub fn new() -> Self {
        Self {
            loader: DocumentLoader::new(),
            writer: PdfWriter::new(),
            jobs: None,
        }
    }
}

impl<S: FileSource> Merger<S> {
    /// Create a merger over a custom byte source.
    pub fn with_source(source: S) -> Self {
        Self {
            loader: DocumentLoader::with_source(source),
            writer: PdfWriter::new(),
            jobs: None,
        }
    }

    /// Limit the number of concurrent reads.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// Replace the writer used by [`Merger::run`].
    pub fn writer(mut self, writer: PdfWriter) -> Self {
        self.writer = writer;
        self
    }

    fn workers(&self, specs: &[FileSpec]) -> usize {
        self.jobs.unwrap_or(specs.len()).max(1)
    }

    /// Merge `specs` with the default `lopdf` accumulator.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, if any file cannot be read,
    /// or if any document cannot be appended or the result serialized.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerge::merge::Merger;
    /// # use pdfmerge::config::{FileSpec, PageSelector};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let specs = vec![
    ///     FileSpec::new("file-1.pdf"),
    ///     FileSpec::with_pages("file-3.pdf", PageSelector::Single(1)),
    /// ];
    /// let output = Merger::new().merge_files(&specs).await?;
    /// println!("{} pages", output.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge_files(&self, specs: &[FileSpec]) -> Result<MergeOutput> {
        self.merge_files_into(specs, LopdfAccumulator::new()).await
    }

    /// Merge `specs` into the given accumulator.
    ///
    /// Every file is loaded before the first append, so a read failure
    /// leaves the accumulator untouched.
    pub async fn merge_files_into<A: MergeAccumulator>(
        &self,
        specs: &[FileSpec],
        accumulator: A,
    ) -> Result<MergeOutput> {
        self.merge_with(specs, accumulator, self.workers(specs))
            .await
    }

    async fn merge_with<A: MergeAccumulator>(
        &self,
        specs: &[FileSpec],
        mut accumulator: A,
        workers: usize,
    ) -> Result<MergeOutput> {
        if specs.is_empty() {
            return Err(PdfMergeError::NoFilesToMerge);
        }

        let merge_start = Instant::now();

        let (documents, load_stats) = self.loader.load_all(specs, workers).await?;

        for document in &documents {
            accumulator.add(document)?;
        }

        let total_pages = accumulator.page_count();
        let bytes = accumulator.finalize()?;
        let merge_time = merge_start.elapsed();

        log::info!(
            "merged {} file(s) into {} page(s), {} in {:?}",
            documents.len(),
            total_pages,
            format_bytes(bytes.len() as u64),
            merge_time
        );

        let statistics = MergeStatistics {
            files_merged: documents.len(),
            total_pages,
            input_size: load_stats.total_size,
            output_size: bytes.len() as u64,
            load_time: load_stats.total_time,
            merge_time,
        };

        Ok(MergeOutput {
            bytes,
            statistics,
            merged_files: documents.into_iter().map(|d| d.path).collect(),
        })
    }

    /// Merge the configured files and write the result to `config.output`.
    ///
    /// Nothing is written unless the merge succeeds.
    pub async fn run(&self, config: &MergeConfig) -> Result<(MergeOutput, WriteStatistics)> {
        config.validate()?;

        let workers = self
            .jobs
            .or(config.jobs)
            .unwrap_or_else(|| config.effective_jobs());

        let output = self
            .merge_with(&config.files, LopdfAccumulator::new(), workers)
            .await?;
        let write_stats = self.writer.write(&output.bytes, &config.output).await?;

        Ok((output, write_stats))
    }
}
