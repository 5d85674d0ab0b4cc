//! Process resource snapshots.

use std::time::{Duration, Instant};

use sysinfo::{Pid, System};

use crate::bench::alloc::heap_used;

/// Resource readings of the current process at one instant.
#[derive(Debug, Clone, Copy)]
pub struct ProcessSnapshot {
    /// When the snapshot was taken.
    pub at: Instant,

    /// Cumulative CPU time spent in user mode.
    pub cpu_user: Duration,

    /// Cumulative CPU time spent in kernel mode.
    pub cpu_system: Duration,

    /// Resident set size in bytes.
    pub rss: u64,

    /// Live heap bytes, as counted by the tracking allocator.
    pub heap_used: u64,
}

/// Source of process snapshots.
pub trait ResourceProbe {
    /// Take a snapshot of the current process.
    fn snapshot(&mut self) -> ProcessSnapshot;
}

/// Probe reading the real process counters.
pub struct ProcessProbe {
    system: System,
    pid: Option<Pid>,
}

impl ProcessProbe {
    /// Create a probe for the current process.
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(err) => {
                log::warn!("cannot determine current pid, rss will read as 0: {err}");
                None
            }
        };

        Self {
            system: System::new(),
            pid,
        }
    }

    fn rss(&mut self) -> u64 {
        let Some(pid) = self.pid else {
            return 0;
        };

        if !self.system.refresh_process(pid) {
            return 0;
        }

        self.system.process(pid).map(|p| p.memory()).unwrap_or(0)
    }
}

impl Default for ProcessProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcessProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessProbe").field("pid", &self.pid).finish()
    }
}

impl ResourceProbe for ProcessProbe {
    fn snapshot(&mut self) -> ProcessSnapshot {
        let (cpu_user, cpu_system) = cpu_times();
        let rss = self.rss();

        ProcessSnapshot {
            at: Instant::now(),
            cpu_user,
            cpu_system,
            rss,
            heap_used: heap_used(),
        }
    }
}

/// User and system CPU time consumed by this process so far.
#[cfg(unix)]
fn cpu_times() -> (Duration, Duration) {
    // SAFETY: `rusage` is plain data and `getrusage` only writes into it.
    let mut usage: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, &mut usage) };
    if rc != 0 {
        return (Duration::ZERO, Duration::ZERO);
    }

    (timeval(usage.ru_utime), timeval(usage.ru_stime))
}

#[cfg(unix)]
fn timeval(tv: libc::timeval) -> Duration {
    let secs = u64::try_from(tv.tv_sec).unwrap_or(0);
    let micros = u64::try_from(tv.tv_usec).unwrap_or(0);
    Duration::from_secs(secs) + Duration::from_micros(micros)
}

#[cfg(not(unix))]
fn cpu_times() -> (Duration, Duration) {
    (Duration::ZERO, Duration::ZERO)
}
