//! Loading input files into memory.
//!
//! Reads fan out concurrently with bounded parallelism and are joined
//! before anything is merged. Results are always handed back in the order
//! of the input list, whatever order the reads completed in.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::config::FileSpec;
//! use pdfmerge::io::DocumentLoader;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = DocumentLoader::new();
//! let specs = vec![FileSpec::new("a.pdf"), "b.pdf:2-3".parse()?];
//! let (documents, stats) = loader.load_all(&specs, 4).await?;
//! println!("Loaded {} files, {} bytes", documents.len(), stats.total_size);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};

use crate::config::{FileSpec, PageSelector};
use crate::error::{PdfMergeError, Result};
use crate::utils::format_bytes;

/// Source of raw file bytes.
///
/// The filesystem implementation is [`FsSource`]. Tests plug in sources
/// that delay or fail individual reads.
pub trait FileSource {
    /// Read the whole file at `path`.
    fn read(&self, path: &Path) -> impl Future<Output = io::Result<Vec<u8>>>;
}

/// Reads files from the host filesystem with `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl FileSource for FsSource {
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// A file loaded into memory, ready to be appended.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Path to the source file.
    pub path: PathBuf,

    /// File contents, exactly as stored on disk.
    pub bytes: Vec<u8>,

    /// Pages to take from this document.
    pub pages: PageSelector,

    /// Time taken to read the file.
    pub load_time: Duration,
}

impl LoadedDocument {
    /// Size of the loaded bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Statistics for a batch load.
#[derive(Debug, Clone, Default)]
pub struct LoadStatistics {
    /// Number of files loaded.
    pub files_loaded: usize,

    /// Wall time for the whole batch.
    pub total_time: Duration,

    /// Sum of the loaded file sizes.
    pub total_size: u64,
}

impl LoadStatistics {
    fn from_documents(documents: &[LoadedDocument], total_time: Duration) -> Self {
        Self {
            files_loaded: documents.len(),
            total_time,
            total_size: documents.iter().map(LoadedDocument::size).sum(),
        }
    }
}

/// Loads the files named by a list of [`FileSpec`]s.
#[derive(Debug, Clone, Default)]
pub struct DocumentLoader<S = FsSource> {
    source: S,
}

impl DocumentLoader<FsSource> {
    /// Create a loader reading from the filesystem.
    pub fn new() -> Self {
        Self { source: FsSource }
    }
}

impl<S: FileSource> DocumentLoader<S> {
    /// Create a loader over a custom byte source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Load a single file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::FileNotFound`] if the file does not exist and
    /// [`PdfMergeError::FileNotAccessible`] for any other read failure.
    pub async fn load(&self, spec: &FileSpec) -> Result<LoadedDocument> {
        let start = Instant::now();

        let bytes = self
            .source
            .read(&spec.filename)
            .await
            .map_err(|err| PdfMergeError::read_failed(spec.filename.clone(), err))?;

        let load_time = start.elapsed();
        log::debug!(
            "read {} ({}) in {:?}",
            spec.filename.display(),
            format_bytes(bytes.len() as u64),
            load_time
        );

        Ok(LoadedDocument {
            path: spec.filename.clone(),
            bytes,
            pages: spec.pages,
            load_time,
        })
    }

    /// Load every file concurrently, at most `workers` reads at a time.
    ///
    /// The returned documents follow the order of `specs`. If any read
    /// fails, the error for the earliest failing entry in `specs` is
    /// returned and nothing else is handed back.
    pub async fn load_all(
        &self,
        specs: &[FileSpec],
        workers: usize,
    ) -> Result<(Vec<LoadedDocument>, LoadStatistics)> {
        let start = Instant::now();
        let workers = workers.max(1);

        let tasks = specs.iter().enumerate().map(|(idx, spec)| async move {
            let result = self.load(spec).await;
            (idx, result)
        });

        let mut indexed_results: Vec<(usize, Result<LoadedDocument>)> = stream::iter(tasks)
            .buffer_unordered(workers)
            .collect::<Vec<_>>()
            .await;

        // Completion order is arbitrary; restore list order.
        indexed_results.sort_by_key(|(idx, _)| *idx);

        let documents = indexed_results
            .into_iter()
            .map(|(_, result)| result)
            .collect::<Result<Vec<_>>>()?;

        let stats = LoadStatistics::from_documents(&documents, start.elapsed());
        Ok((documents, stats))
    }
}
