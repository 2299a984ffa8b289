//! Page replacement policies.
//!
//! Every policy implements the [`Mmu`] contract: feed it page references
//! with [`Mmu::read_memory`] / [`Mmu::write_memory`] and query the disk I/O
//! it would have caused.
//!
//! # Policies
//! - [`ClockMmu`] - Second chance: circular frame table swept by a hand
//! - [`LruMmu`] - Exact least-recently-used ordering
//! - [`RandomMmu`] - Uniform random victim among resident pages
//!
//! Pick one at runtime with [`PolicyKind`].
//!
//! # Example
//! ```
//! use pagesim::mmu::{ClockMmu, Mmu};
//! use pagesim::PageId;
//!
//! let mut mmu = ClockMmu::new(2).unwrap();
//! mmu.write_memory(PageId::new(1));
//! mmu.read_memory(PageId::new(2));
//! mmu.read_memory(PageId::new(3)); // evicts page 1, which is dirty
//!
//! assert_eq!(mmu.get_total_page_faults(), 3);
//! assert_eq!(mmu.get_total_disk_reads(), 3);
//! assert_eq!(mmu.get_total_disk_writes(), 1);
//! ```

mod clock;
mod event;
mod lru;
mod policy;
mod random;
mod stats;

use std::fmt;
use std::sync::Arc;

use crate::common::{Error, PageId, Result};

pub use clock::ClockMmu;
pub use event::{DebugSink, EventSink, MemoryEvent, NoopSink, RecordingSink};
pub use lru::LruMmu;
pub use policy::PolicyKind;
pub use random::RandomMmu;
pub use stats::MmuStats;

/// Kind of page reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
}

impl Access {
    #[inline]
    pub fn is_write(self) -> bool {
        matches!(self, Access::Write)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "write"),
        }
    }
}

/// The memory-manager contract shared by all replacement policies.
///
/// A policy owns a fixed number of frames. A reference to a resident page
/// is a hit and costs nothing. A reference to any other page is a fault:
/// one disk read, plus one disk write if the frame it lands in had to be
/// taken from a dirty page.
pub trait Mmu: Send {
    /// Short policy name, as accepted by [`PolicyKind`].
    fn name(&self) -> &'static str;

    /// Service one page reference.
    fn access(&mut self, page: PageId, access: Access);

    /// Snapshot of the counters.
    fn stats(&self) -> MmuStats;

    /// Number of frames.
    fn capacity(&self) -> usize;

    /// Number of pages currently occupying a frame. Never above `capacity()`.
    fn resident_count(&self) -> usize;

    fn is_resident(&self, page: PageId) -> bool;

    /// Route future events to `sink`, replacing the current one.
    fn set_event_sink(&mut self, sink: Arc<dyn EventSink>);

    fn read_memory(&mut self, page: PageId) {
        self.access(page, Access::Read);
    }

    /// Like `read_memory`, but leaves the page dirty.
    fn write_memory(&mut self, page: PageId) {
        self.access(page, Access::Write);
    }

    fn get_total_disk_reads(&self) -> u64 {
        self.stats().disk_reads
    }

    fn get_total_disk_writes(&self) -> u64 {
        self.stats().disk_writes
    }

    fn get_total_page_faults(&self) -> u64 {
        self.stats().page_faults
    }

    /// Print every event to stderr.
    fn set_debug(&mut self) {
        self.set_event_sink(Arc::new(DebugSink));
    }

    /// Stop printing events.
    fn reset_debug(&mut self) {
        self.set_event_sink(Arc::new(NoopSink));
    }
}

/// Reject a zero frame count before any frame table is allocated.
pub(crate) fn check_frames(frames: usize) -> Result<usize> {
    if frames == 0 {
        return Err(Error::InvalidFrameCount(frames));
    }
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_frames() {
        assert_eq!(check_frames(4).unwrap(), 4);
        assert!(matches!(check_frames(0), Err(Error::InvalidFrameCount(0))));
    }

    #[test]
    fn test_access_display() {
        assert_eq!(Access::Read.to_string(), "read");
        assert_eq!(Access::Write.to_string(), "write");
        assert!(Access::Write.is_write());
        assert!(!Access::Read.is_write());
    }

    #[test]
    fn test_debug_toggle_keeps_counters() {
        let mut quiet = LruMmu::new(2).unwrap();
        let mut loud = LruMmu::new(2).unwrap();
        loud.set_debug();

        for p in [1u64, 2, 1, 3, 2, 4] {
            quiet.write_memory(PageId::new(p));
            loud.write_memory(PageId::new(p));
        }
        loud.reset_debug();

        assert_eq!(quiet.stats(), loud.stats());
    }
}
