//! Per-policy counters.

use std::fmt;

/// Counters tracked by every replacement policy.
///
/// Each policy instance owns one `MmuStats`; nothing here is shared
/// between instances. The struct is `Copy`, so [`Mmu::stats`] hands out a
/// point-in-time snapshot that can be printed or compared freely.
///
/// Invariants maintained by the policies:
/// - `disk_reads == page_faults` (one load per fault)
/// - `disk_writes <= evictions` (only dirty victims are written back)
/// - `accesses == hits() + page_faults`
///
/// [`Mmu::stats`]: crate::mmu::Mmu::stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MmuStats {
    /// Every page reference seen, hit or miss.
    pub accesses: u64,

    /// References to pages that were not resident.
    pub page_faults: u64,

    /// Pages loaded from disk.
    pub disk_reads: u64,

    /// Dirty pages written back on eviction.
    pub disk_writes: u64,

    /// Resident pages removed to make room for a load.
    pub evictions: u64,
}

impl MmuStats {
    /// Create a stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// References that found their page resident.
    pub fn hits(&self) -> u64 {
        self.accesses - self.page_faults
    }

    /// Fraction of references that faulted (0.0 to 1.0).
    pub fn fault_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.page_faults as f64 / self.accesses as f64
        }
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.accesses += 1;
    }

    /// A fault always costs exactly one disk read.
    #[inline]
    pub(crate) fn record_fault(&mut self) {
        self.accesses += 1;
        self.page_faults += 1;
        self.disk_reads += 1;
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self, dirty: bool) {
        self.evictions += 1;
        if dirty {
            self.disk_writes += 1;
        }
    }
}

impl fmt::Display for MmuStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ accesses: {}, faults: {}, reads: {}, writes: {}, evictions: {}, fault_rate: {:.2}% }}",
            self.accesses,
            self.page_faults,
            self.disk_reads,
            self.disk_writes,
            self.evictions,
            self.fault_rate() * 100.0
        )
    }
}
