//! pdfmerge - Merge page ranges of PDF files into one document.
//!
//! The library loads a list of files concurrently, appends the selected
//! pages of each in list order, and writes the result atomically. A
//! benchmark runner repeats the merge and reports mean elapsed time, CPU
//! time and memory usage.
//!
//! # Examples
//!
//! ## Basic merge
//!
//! ```no_run
//! use pdfmerge::config::{FileSpec, MergeConfig, PageSelector};
//! use pdfmerge::merge::Merger;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MergeConfig::new(
//!     vec![
//!         FileSpec::new("file-1.pdf"),
//!         FileSpec::new("file-2.pdf"),
//!         FileSpec::with_pages("file-3.pdf", PageSelector::Single(1)),
//!     ],
//!     "merged-buffer.pdf",
//! );
//!
//! let (output, _) = Merger::new().run(&config).await?;
//! println!("Created {} page document", output.statistics.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Benchmark
//!
//! ```no_run
//! use pdfmerge::bench::Benchmark;
//! use pdfmerge::config::{BenchConfig, MergeConfig};
//! use pdfmerge::merge::Merger;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut bench = Benchmark::new(BenchConfig { iterations: 10 });
//! let report = bench.run(&Merger::new(), &MergeConfig::default()).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bench;
pub mod config;
pub mod error;
pub mod io;
pub mod merge;
pub mod output;
pub mod utils;

pub use config::{BenchConfig, FileSpec, MergeConfig, PageSelector};
pub use error::{PdfMergeError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
