//! Clock (second-chance) replacement policy.
//!
//! Frames form a circle swept by a hand. Every reference sets the page's
//! reference bit. When a fault finds every frame full, the hand advances
//! until it lands on a page whose bit is clear, clearing the bits it passes
//! over. The new page takes that frame and the hand moves one step past it.
//!
//! # Algorithm
//!
//! - On hit: set reference bit (and dirty bit on write)
//! - On load into a free frame: fill the next empty slot, reference bit set
//! - On eviction: sweep from the hand
//!   - If ref bit set: clear bit and continue
//!   - Otherwise: evict, write back if dirty, install the new page
//!
//! # Complexity
//!
//! - Hit: O(1)
//! - Eviction: O(n) worst case. One full sweep clears every bit, so the
//!   hand stops within `2 * capacity` steps.

use std::collections::HashMap;
use std::sync::Arc;

use crate::common::{FrameId, PageId, Result};
use crate::mmu::{check_frames, Access, EventSink, MemoryEvent, Mmu, MmuStats, NoopSink};

/// One occupied frame.
#[derive(Debug, Clone, Copy)]
struct ClockEntry {
    page: PageId,
    referenced: bool,
    dirty: bool,
}

impl ClockEntry {
    fn load(page: PageId, access: Access) -> Self {
        Self {
            page,
            referenced: true,
            dirty: access.is_write(),
        }
    }
}

/// Second-chance page replacement.
pub struct ClockMmu {
    /// Circular frame table. Fills in order, then stays at `capacity`.
    slots: Vec<ClockEntry>,

    /// Maps resident pages to their slot.
    page_table: HashMap<PageId, FrameId>,

    /// Next slot the sweep examines.
    hand: FrameId,

    capacity: usize,

    stats: MmuStats,

    sink: Arc<dyn EventSink>,
}

impl ClockMmu {
    /// Create a clock policy with `frames` frames.
    ///
    /// # Errors
    /// `Error::InvalidFrameCount` if `frames` is 0.
    pub fn new(frames: usize) -> Result<Self> {
        let capacity = check_frames(frames)?;
        Ok(Self {
            slots: Vec::with_capacity(capacity),
            page_table: HashMap::with_capacity(capacity),
            hand: FrameId::new(0),
            capacity,
            stats: MmuStats::new(),
            sink: Arc::new(NoopSink),
        })
    }

    /// Current hand position.
    pub fn hand(&self) -> FrameId {
        self.hand
    }

    /// Resident pages in slot order.
    pub fn resident_pages(&self) -> Vec<PageId> {
        self.slots.iter().map(|entry| entry.page).collect()
    }

    /// Reference bit of a resident page, or `None` if it is not resident.
    pub fn is_referenced(&self, page: PageId) -> Option<bool> {
        self.page_table
            .get(&page)
            .map(|fid| self.slots[fid.0].referenced)
    }

    /// Dirty bit of a resident page, or `None` if it is not resident.
    pub fn is_dirty(&self, page: PageId) -> Option<bool> {
        self.page_table.get(&page).map(|fid| self.slots[fid.0].dirty)
    }

    /// Advance the hand until it rests on a page with a clear reference bit.
    ///
    /// Returns that slot and leaves the hand one past it.
    fn find_victim(&mut self) -> FrameId {
        debug_assert_eq!(self.slots.len(), self.capacity);

        let mut steps = 0;
        loop {
            let fid = self.hand;
            self.hand = fid.next(self.capacity);

            let entry = &mut self.slots[fid.0];
            if !entry.referenced {
                return fid;
            }

            entry.referenced = false;
            self.sink
                .record(&MemoryEvent::SecondChance { page: entry.page });

            steps += 1;
            debug_assert!(steps <= self.capacity, "clock sweep did not terminate");
        }
    }

    fn load(&mut self, page: PageId, access: Access) {
        if self.slots.len() < self.capacity {
            let fid = FrameId::new(self.slots.len());
            self.slots.push(ClockEntry::load(page, access));
            self.page_table.insert(page, fid);
            return;
        }

        let fid = self.find_victim();
        let victim = std::mem::replace(&mut self.slots[fid.0], ClockEntry::load(page, access));
        self.page_table.remove(&victim.page);
        self.page_table.insert(page, fid);

        self.stats.record_eviction(victim.dirty);
        self.sink.record(&MemoryEvent::Evict {
            page: victim.page,
            dirty: victim.dirty,
        });
    }
}

impl Mmu for ClockMmu {
    fn name(&self) -> &'static str {
        "clock"
    }

    fn access(&mut self, page: PageId, access: Access) {
        if let Some(fid) = self.page_table.get(&page) {
            let entry = &mut self.slots[fid.0];
            entry.referenced = true;
            if access.is_write() {
                entry.dirty = true;
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
