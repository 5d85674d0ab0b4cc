//! File input and output.
//!
//! - [`reader`]: concurrent, order-preserving loading of input files
//! - [`writer`]: atomic writing of the merged buffer

pub mod reader;
pub mod writer;

pub use reader::{DocumentLoader, FileSource, FsSource, LoadStatistics, LoadedDocument};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};
