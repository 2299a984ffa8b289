//! Replaying traces through a policy.

use std::fmt;

use crate::mmu::{Mmu, MmuStats};
use crate::trace::TraceEntry;

/// Drives one policy over a sequence of references.
///
/// # Example
/// ```
/// use pagesim::mmu::PolicyKind;
/// use pagesim::trace::parse_trace;
/// use pagesim::Simulation;
///
/// let trace = parse_trace("00001000 R\n00002000 W\n00001000 R\n").unwrap();
/// let mut sim = Simulation::new(PolicyKind::Lru.build(4).unwrap());
/// sim.run(&trace);
///
/// let report = sim.report();
/// assert_eq!(report.events, 3);
/// assert_eq!(report.page_faults, 2);
/// ```
pub struct Simulation {
    mmu: Box<dyn Mmu>,
}

impl Simulation {
    pub fn new(mmu: Box<dyn Mmu>) -> Self {
        Self { mmu }
    }

    /// Feed every entry to the policy, in order.
    pub fn run<'a, I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = &'a TraceEntry>,
    {
        for entry in entries {
            self.mmu.access(entry.page, entry.access);
        }
    }

    pub fn mmu(&self) -> &dyn Mmu {
        self.mmu.as_ref()
    }

    pub fn mmu_mut(&mut self) -> &mut dyn Mmu {
        self.mmu.as_mut()
    }

    /// Summary of everything replayed so far.
    pub fn report(&self) -> Report {
        Report::new(self.mmu.name(), self.mmu.capacity(), self.mmu.stats())
    }
}

/// Final counters of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub policy: &'static str,
    pub frames: usize,
    pub events: u64,
    pub disk_reads: u64,
    pub disk_writes: u64,
    pub page_faults: u64,
}

impl Report {
    fn new(policy: &'static str, frames: usize, stats: MmuStats) -> Self {
        Self {
            policy,
            frames,
            events: stats.accesses,
            disk_reads: stats.disk_reads,
            disk_writes: stats.disk_writes,
            page_faults: stats.page_faults,
        }
    }

    /// Faults per reference, 0.0 for an empty trace.
    pub fn fault_rate(&self) -> f64 {
        if self.events == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.events as f64
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total memory frames:  {}", self.frames)?;
        writeln!(f, "events in trace:      {}", self.events)?;
        writeln!(f, "total disk reads:     {}", self.disk_reads)?;
        writeln!(f, "total disk writes:    {}", self.disk_writes)?;
        write!(f, "page fault rate:      {:.4}", self.fault_rate())
    }
}
