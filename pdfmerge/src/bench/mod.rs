//! Benchmarking the merge.
//!
//! [`Benchmark`] repeats a merge a fixed number of times and reports the
//! mean elapsed time, CPU time and memory usage per iteration. Readings come
//! from a [`ResourceProbe`]; the default [`ProcessProbe`] measures this
//! process. Heap figures need [`TrackingAllocator`] installed as the global
//! allocator.

pub mod alloc;
pub mod probe;
pub mod runner;

pub use alloc::{TrackingAllocator, heap_used};
pub use probe::{ProcessProbe, ProcessSnapshot, ResourceProbe};
pub use runner::{AverageReport, Benchmark, ResourceSample, ResourceTotals};
