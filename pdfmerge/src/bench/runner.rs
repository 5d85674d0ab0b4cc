//! The benchmark loop.
//!
//! Iterations run strictly one after another. Every iteration is bracketed
//! by two probe snapshots: elapsed time and CPU time are taken as the delta
//! between them, RSS and heap used as the level after the iteration. The
//! report is the arithmetic mean of each metric.

use std::fmt;
use std::future::Future;

use crate::bench::probe::{ProcessProbe, ProcessSnapshot, ResourceProbe};
use crate::config::{BenchConfig, MergeConfig};
use crate::error::Result;
use crate::io::FileSource;
use crate::merge::Merger;
use crate::utils::format_bytes;

/// Resource usage of a single iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceSample {
    /// Wall-clock seconds spent in the iteration.
    pub elapsed_seconds: f64,

    /// CPU seconds spent in user mode during the iteration.
    pub cpu_user: f64,

    /// CPU seconds spent in kernel mode during the iteration.
    pub cpu_system: f64,

    /// Resident set size after the iteration, in bytes.
    pub memory_rss: u64,

    /// Live heap bytes after the iteration.
    pub memory_heap_used: u64,
}

impl ResourceSample {
    /// Sample for the interval between two snapshots.
    pub fn between(before: &ProcessSnapshot, after: &ProcessSnapshot) -> Self {
        Self {
            elapsed_seconds: after.at.saturating_duration_since(before.at).as_secs_f64(),
            cpu_user: after.cpu_user.saturating_sub(before.cpu_user).as_secs_f64(),
            cpu_system: after.cpu_system.saturating_sub(before.cpu_system).as_secs_f64(),
            memory_rss: after.rss,
            memory_heap_used: after.heap_used,
        }
    }
}

/// Running sums of samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResourceTotals {
    elapsed_seconds: f64,
    cpu_user: f64,
    cpu_system: f64,
    memory_rss: u128,
    memory_heap_used: u128,
    samples: usize,
}

impl ResourceTotals {
    /// Add one sample to the sums.
    pub fn push(&mut self, sample: &ResourceSample) {
        self.elapsed_seconds += sample.elapsed_seconds;
        self.cpu_user += sample.cpu_user;
        self.cpu_system += sample.cpu_system;
        self.memory_rss += u128::from(sample.memory_rss);
        self.memory_heap_used += u128::from(sample.memory_heap_used);
        self.samples += 1;
    }

    /// Mean of every metric over the samples added.
    ///
    /// Returns a zeroed report when nothing was added.
    pub fn average(&self) -> AverageReport {
        if self.samples == 0 {
            return AverageReport::default();
        }

        let n = self.samples as f64;
        let mean_bytes = |sum: u128| u64::try_from(sum / self.samples as u128).unwrap_or(u64::MAX);

        AverageReport {
            iterations: self.samples,
            elapsed_seconds: self.elapsed_seconds / n,
            cpu_user: self.cpu_user / n,
            cpu_system: self.cpu_system / n,
            memory_rss: mean_bytes(self.memory_rss),
            memory_heap_used: mean_bytes(self.memory_heap_used),
        }
    }
}

/// Mean resource usage over a benchmark run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AverageReport {
    /// Number of iterations averaged.
    pub iterations: usize,

    /// Mean wall-clock seconds per iteration.
    pub elapsed_seconds: f64,

    /// Mean user CPU seconds per iteration.
    pub cpu_user: f64,

    /// Mean system CPU seconds per iteration.
    pub cpu_system: f64,

    /// Mean resident set size in bytes.
    pub memory_rss: u64,

    /// Mean live heap bytes.
    pub memory_heap_used: u64,
}

impl AverageReport {
    /// The three report lines: elapsed time, CPU usage, memory usage.
    pub fn lines(&self) -> [String; 3] {
        [
            format!("Average elapsed time: {:.4} seconds", self.elapsed_seconds),
            format!(
                "Average CPU usage: user {:.2} µs, system {:.2} µs",
                self.cpu_user * 1e6,
                self.cpu_system * 1e6
            ),
            format!(
                "Average memory usage: rss {}, heap used {}",
                format_bytes(self.memory_rss),
                format_bytes(self.memory_heap_used)
            ),
        ]
    }
}

impl fmt::Display for AverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Repeats an operation and averages its resource usage.
#[derive(Debug)]
pub struct Benchmark<P = ProcessProbe> {
    probe: P,
    config: BenchConfig,
}

impl Benchmark<ProcessProbe> {
    /// Create a benchmark measuring the current process.
    pub fn new(config: BenchConfig) -> Self {
        Self::with_probe(ProcessProbe::new(), config)
    }
}

impl<P: ResourceProbe> Benchmark<P> {
    /// Create a benchmark with a custom probe.
    pub fn with_probe(probe: P, config: BenchConfig) -> Self {
        Self { probe, config }
    }

    /// Number of iterations this benchmark runs.
    pub fn iterations(&self) -> usize {
        self.config.iterations
    }

    /// Run `op` once per iteration and average the samples.
    ///
    /// `op` receives the zero-based iteration index. Each returned future
    /// is awaited before the next iteration starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the iteration count is 0, or the first error
    /// returned by `op`. No report is produced in either case.
    pub async fn run_with<F, Fut, T>(&mut self, mut op: F) -> Result<AverageReport>
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.config.validate()?;

        let mut totals = ResourceTotals::default();

        for iteration in 0..self.config.iterations {
            let before = self.probe.snapshot();
            op(iteration).await?;
            let after = self.probe.snapshot();

            let sample = ResourceSample::between(&before, &after);
            log::debug!(
                "iteration {}/{}: {:.4}s",
                iteration + 1,
                self.config.iterations,
                sample.elapsed_seconds
            );
            totals.push(&sample);
        }

        let report = totals.average();
        log::info!(
            "benchmark finished: {} iteration(s), {:.4}s mean",
            report.iterations,
            report.elapsed_seconds
        );

        Ok(report)
    }

    /// Benchmark the full merge-and-write of `config`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmerge::bench::Benchmark;
    /// # use pdfmerge::config::{BenchConfig, MergeConfig};
    /// # use pdfmerge::merge::Merger;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut bench = Benchmark::new(BenchConfig::default());
    /// let report = bench.run(&Merger::new(), &MergeConfig::default()).await?;
    /// println!("{report}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<S: FileSource>(
        &mut self,
        merger: &Merger<S>,
        config: &MergeConfig,
    ) -> Result<AverageReport> {
        config.validate()?;
        self.run_with(move |_| merger.run(config)).await
    }
}
