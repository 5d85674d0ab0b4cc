//! Error types for pdfmerge.
//!
//! All failures surface as a [`PdfMergeError`]. Variants fall into the
//! stages where they can happen:
//!
//! - **Read**: an input file is missing or unreadable
//! - **Merge**: the accumulator rejected a document or failed to finalize
//! - **Write**: the output path could not be created or written
//! - **Config**: invalid file lists, page selectors or configuration files
//!
//! Nothing is retried. Every error aborts the current operation and is
//! reported at the process boundary with [`PdfMergeError::exit_code`].

use std::io;
use std::path::PathBuf;

use crate::config::PageSelector;

/// Result type alias for pdfmerge operations.
pub type Result<T> = std::result::Result<T, PdfMergeError>;

/// Main error type for pdfmerge operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfMergeError {
    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file exists but could not be read.
    #[error("Cannot read file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The accumulator rejected a document.
    #[error("Failed to merge {} (pages: {pages})\n  Reason: {reason}", path.display())]
    MergeFailed {
        /// Path of the document being appended.
        path: PathBuf,
        /// Page selector requested for the document.
        pages: PageSelector,
        /// Reason reported by the PDF backend.
        reason: String,
    },

    /// Page selector points outside the document.
    #[error(
        "Invalid page range '{pages}' for PDF: {}\n  \
         PDF has {total_pages} page(s). Page numbers must be between 1 and {total_pages}",
        path.display()
    )]
    InvalidPageRange {
        /// Path to the PDF file.
        path: PathBuf,
        /// Requested selector.
        pages: PageSelector,
        /// Total pages in the PDF.
        total_pages: usize,
    },

    /// Serializing the merged document failed.
    #[error("Failed to finalize merged document\n  Reason: {reason}")]
    FinalizeFailed {
        /// Reason reported by the PDF backend.
        reason: String,
    },

    /// No files were provided for merging.
    #[error("No input files specified for merging")]
    NoFilesToMerge,

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// A `FILE[:PAGES]` argument or page selector could not be parsed.
    #[error("Invalid page selector '{input}': {reason}")]
    InvalidPageSelector {
        /// The text that failed to parse.
        input: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Failed to read a configuration file.
    #[error("Failed to read config file: {}\n  Reason: {source}", path.display())]
    FailedToReadConfig {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },
}

impl PdfMergeError {
    /// Classify an I/O failure on an input file.
    pub fn read_failed(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileNotAccessible { path, source }
        }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(path: PathBuf, pages: PageSelector, reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            path,
            pages,
            reason: reason.into(),
        }
    }

    /// Create a FinalizeFailed error.
    pub fn finalize_failed(reason: impl Into<String>) -> Self {
        Self::FinalizeFailed {
            reason: reason.into(),
        }
    }

    /// Create an InvalidPageSelector error.
    pub fn invalid_selector(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPageSelector {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Name of the stage the error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } | Self::FileNotAccessible { .. } => "read",
            Self::MergeFailed { .. }
            | Self::InvalidPageRange { .. }
            | Self::FinalizeFailed { .. }
            | Self::NoFilesToMerge => "merge",
            Self::FailedToCreateOutput { .. } | Self::FailedToWrite { .. } => "write",
            Self::InvalidPageSelector { .. }
            | Self::FailedToReadConfig { .. }
            | Self::InvalidConfig { .. } => "config",
            Self::Io { .. } => "other",
        }
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::MergeFailed { .. } => 3,
            Self::InvalidPageRange { .. } => 3,
            Self::FinalizeFailed { .. } => 3,
            Self::NoFilesToMerge => 1,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidPageSelector { .. } => 1,
            Self::FailedToReadConfig { .. } => 2,
            Self::InvalidConfig { .. } => 1,
            Self::Io { .. } => 5,
        }
    }
}
