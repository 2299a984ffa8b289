//! Random replacement policy.
//!
//! On a fault with every frame occupied, one resident page is chosen
//! uniformly at random and evicted. Nothing about access history is kept
//! beyond the dirty bit, which defers the disk write until eviction.

use std::collections::HashMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{FrameId, PageId, Result};
use crate::mmu::{check_frames, Access, EventSink, MemoryEvent, Mmu, MmuStats, NoopSink};

#[derive(Debug, Clone, Copy)]
struct RandomEntry {
    page: PageId,
    dirty: bool,
}

/// Uniform random page replacement.
pub struct RandomMmu {
    /// Occupied frames. Never longer than `capacity`.
    frames: Vec<RandomEntry>,

    /// Maps resident pages to their frame.
    page_table: HashMap<PageId, FrameId>,

    rng: StdRng,

    capacity: usize,

    stats: MmuStats,

    sink: Arc<dyn EventSink>,
}

impl RandomMmu {
    /// Create a random policy seeded from OS entropy.
    ///
    /// # Errors
    /// `Error::InvalidFrameCount` if `frames` is 0.
    pub fn new(frames: usize) -> Result<Self> {
        Self::with_rng(frames, StdRng::from_entropy())
    }

    /// Create a random policy whose victim sequence is reproducible.
    pub fn with_seed(frames: usize, seed: u64) -> Result<Self> {
        Self::with_rng(frames, StdRng::seed_from_u64(seed))
    }

    fn with_rng(frames: usize, rng: StdRng) -> Result<Self> {
        let capacity = check_frames(frames)?;
        Ok(Self {
            frames: Vec::with_capacity(capacity),
            page_table: HashMap::with_capacity(capacity),
            rng,
            capacity,
            stats: MmuStats::new(),
            sink: Arc::new(NoopSink),
        })
    }

    /// Resident pages in frame order.
    pub fn resident_pages(&self) -> Vec<PageId> {
        self.frames.iter().map(|entry| entry.page).collect()
    }

    /// Dirty bit of a resident page, or `None` if it is not resident.
    pub fn is_dirty(&self, page: PageId) -> Option<bool> {
        self.page_table.get(&page).map(|fid| self.frames[fid.0].dirty)
    }

    fn load(&mut self, page: PageId, access: Access) {
        let entry = RandomEntry {
            page,
            dirty: access.is_write(),
        };

        if self.frames.len() < self.capacity {
            self.page_table.insert(page, FrameId::new(self.frames.len()));
            self.frames.push(entry);
            return;
        }

        let fid = FrameId::new(self.rng.gen_range(0..self.frames.len()));
        let victim = std::mem::replace(&mut self.frames[fid.0], entry);
        self.page_table.remove(&victim.page);
        self.page_table.insert(page, fid);

        self.stats.record_eviction(victim.dirty);
        self.sink.record(&MemoryEvent::Evict {
            page: victim.page,
            dirty: victim.dirty,
        });
    }
}

impl Mmu for RandomMmu {
    fn name(&self) -> &'static str {
        "rand"
    }

    fn access(&mut self, page: PageId, access: Access) {
        if let Some(fid) = self.page_table.get(&page) {
            if access.is_write() {
                self.frames[fid.0].dirty = true;
            }
            self.stats.record_hit();
            self.sink.record(&MemoryEvent::Hit { page, access });
            return;
        }

        self.stats.record_fault();
        self.sink.record(&MemoryEvent::Fault { page, access });
        self.load(page, access);
    }

    fn stats(&self) -> MmuStats {
        self.stats
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn resident_count(&self) -> usize {
        self.page_table.len()
    }

    fn is_resident(&self, page: PageId) -> bool {
        self.page_table.contains_key(&page)
    }

    fn set_event_sink(&mut self, sink: Arc<dyn EventSink>) {
        self.sink = sink;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use crate::mmu::RecordingSink;

    #[test]
    fn test_random_rejects_zero_frames() {
        assert!(matches!(RandomMmu::new(0), Err(Error::InvalidFrameCount(0))));
        assert!(matches!(
            RandomMmu::with_seed(0, 7),
            Err(Error::InvalidFrameCount(0))
        ));
    }

    #[test]
    fn test_random_dirty_writes_evict_one() {
        let sink = Arc::new(RecordingSink::new());
        let mut mmu = RandomMmu::with_seed(2, 42).unwrap();
        mmu.set_event_sink(sink.clone());

        for p in [1, 2, 3] {
            mmu.write_memory(PageId::new(p));
        }

        let evicted = sink.evicted_pages();
        assert_eq!(evicted.len(), 1);
        assert!(evicted[0] == PageId::new(1) || evicted[0] == PageId::new(2));
        assert!(!mmu.is_resident(evicted[0]));
        assert!(mmu.is_resident(PageId::new(3)));

        assert_eq!(mmu.get_total_page_faults(), 3);
        assert_eq!(mmu.get_total_disk_reads(), 3);
        assert_eq!(mmu.get_total_disk_writes(), 1);
    }

    #[test]
    fn test_random_never_exceeds_capacity() {
        let mut mmu = RandomMmu::with_seed(4, 1).unwrap();
        for p in 0..1000 {
            mmu.read_memory(PageId::new(p));
            assert!(mmu.resident_count() <= 4);
        }
        assert_eq!(mmu.resident_count(), 4);
        assert_eq!(mmu.stats().evictions, 996);
    }

    #[test]
    fn test_random_write_hit_defers_disk_write() {
        let mut mmu = RandomMmu::with_seed(1, 3).unwrap();
        mmu.read_memory(PageId::new(1));
        for _ in 0..10 {
            mmu.write_memory(PageId::new(1));
        }

        // Write hits only set the dirty bit.
        assert_eq!(mmu.get_total_disk_writes(), 0);
        assert_eq!(mmu.is_dirty(PageId::new(1)), Some(true));

        mmu.read_memory(PageId::new(2));
        assert_eq!(mmu.get_total_disk_writes(), 1);
    }

    #[test]
    fn test_random_same_seed_same_victims() {
        let run = |seed| {
            let sink = Arc::new(RecordingSink::new());
            let mut mmu = RandomMmu::with_seed(3, seed).unwrap();
            mmu.set_event_sink(sink.clone());
            for p in 0..50 {
                mmu.read_memory(PageId::new(p % 11));
            }
            sink.evicted_pages()
        };

        assert_eq!(run(9), run(9));
    }

    #[test]
    fn test_random_victims_cover_all_pages() {
        let sink = Arc::new(RecordingSink::new());
        let mut mmu = RandomMmu::with_seed(4, 2024).unwrap();
        mmu.set_event_sink(sink.clone());

        // Five pages through four frames keeps faulting.
        for i in 0..1000u64 {
            mmu.read_memory(PageId::new(i % 5));
        }

        let seen: std::collections::HashSet<_> = sink.evicted_pages().into_iter().collect();
        assert_eq!(seen.len(), 5);
    }
}
