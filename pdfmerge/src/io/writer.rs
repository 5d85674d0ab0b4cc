//! Writing the merged buffer to disk.
//!
//! Writes are atomic by default: the bytes go to a uniquely named temporary
//! file next to the target, which is renamed over the target once fully
//! flushed. An existing output is replaced, never appended to.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmerge::io::PdfWriter;
//! use std::path::Path;
//!
//! # async fn example(bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.write(&bytes, Path::new("merged-buffer.pdf")).await?;
//! println!("Wrote {} in {:?}", stats.format_file_size(), stats.write_time);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;

use crate::error::{PdfMergeError, Result};
use crate::utils::format_bytes;

/// Options for writing output files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Create missing parent directories of the output path.
    pub create_dirs: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            create_dirs: true,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_bytes(self.file_size)
    }
}

/// Writer for merged output buffers.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Write `bytes` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::FailedToCreateOutput`] if the file (or its
    /// parent directory) cannot be created, and
    /// [`PdfMergeError::FailedToWrite`] if writing, flushing or the final
    /// rename fails.
    pub async fn write(&self, bytes: &[u8], path: &Path) -> Result<WriteStatistics> {
        let start = Instant::now();

        if self.options.create_dirs
            && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                PdfMergeError::FailedToCreateOutput {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        }

        if self.options.atomic {
            write_atomic(path, bytes).await?;
        } else {
            write_file(path, bytes).await?;
        }

        let write_time = start.elapsed();
        log::debug!(
            "wrote {} to {} in {:?}",
            format_bytes(bytes.len() as u64),
            path.display(),
            write_time
        );

        Ok(WriteStatistics {
            write_time,
            file_size: bytes.len() as u64,
            output_path: path.to_path_buf(),
        })
    }
}

/// Write through a temporary sibling of `path`, then rename it into place.
///
/// The temporary file is removed if any step fails.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let (file, temp_path) = tempfile::Builder::new()
        .prefix(".pdfmerge-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|source| PdfMergeError::FailedToCreateOutput {
            path: path.to_path_buf(),
            source,
        })?
        .into_parts();

    let mut file = tokio::fs::File::from_std(file);
    write_contents(&mut file, path, bytes).await?;
    drop(file);

    temp_path
        .persist(path)
        .map_err(|err| PdfMergeError::FailedToWrite {
            path: path.to_path_buf(),
            source: err.error,
        })?;

    Ok(())
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file =
        tokio::fs::File::create(path)
            .await
            .map_err(|source| PdfMergeError::FailedToCreateOutput {
                path: path.to_path_buf(),
                source,
            })?;

    write_contents(&mut file, path, bytes).await
}

async fn write_contents(file: &mut tokio::fs::File, path: &Path, bytes: &[u8]) -> Result<()> {
    let to_write_error = |source| PdfMergeError::FailedToWrite {
        path: path.to_path_buf(),
        source,
    };

    file.write_all(bytes).await.map_err(to_write_error)?;
    file.flush().await.map_err(to_write_error)?;
    file.sync_all().await.map_err(to_write_error)?;

    Ok(())
}
