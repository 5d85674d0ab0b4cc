//! PDF merging.
//!
//! - [`pages`]: restricting a document to a page selector
//! - [`accumulator`]: appending documents and serializing the result
//! - [`merger`]: the load, append and finalize pipeline over a file list

pub mod accumulator;
pub mod merger;
pub mod pages;

pub use accumulator::{LopdfAccumulator, MergeAccumulator};
pub use merger::{MergeOutput, MergeStatistics, Merger};
pub use pages::PageExtractor;
