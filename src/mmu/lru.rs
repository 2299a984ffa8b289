//! LRU (Least Recently Used) replacement policy.
//!
//! Resident pages live in a fixed-capacity node table threaded into a
//! doubly-linked list by frame index. The head is the least recently used
//! page (the eviction candidate) and the tail the most recently used.
//!
//! # Algorithm
//!
//! - On hit: move the page to the tail (mark dirty on write)
//! - On load into a free frame: append a node at the tail
//! - On eviction: take the head, write back if dirty, reuse its node for
//!   the new page at the tail
//!
//! # Complexity
//!
//! - Hit: O(1)
//! - Eviction: O(1)

use std::collections::HashMap;
use std::sync::Arc;

use crate::common::{FrameId, PageId, Result};
use crate::mmu::{check_frames, Access, EventSink, MemoryEvent, Mmu, MmuStats, NoopSink};

#[derive(Debug, Clone, Copy)]
struct LruNode {
    page: PageId,
    dirty: bool,
    /// Next less recently used node.
    prev: Option<FrameId>,
    /// Next more recently used node.
    next: Option<FrameId>,
}

/// Least-recently-used page replacement.
pub struct LruMmu {
    /// Node table. Grows to `capacity`, after which evicted nodes are reused.
    nodes: Vec<LruNode>,

    /// Maps resident pages to their node.
    page_table: HashMap<PageId, FrameId>,

    /// Least recently used.
    head: Option<FrameId>,

    /// Most recently used.
    tail: Option<FrameId>,

    capacity: usize,

    stats: MmuStats,

    sink: Arc<dyn EventSink>,
}

impl LruMmu {
    /// Create an LRU policy with `frames` frames.
    ///
    /// # Errors
    /// `Error::InvalidFrameCount` if `frames` is 0.
    pub fn new(frames: usize) -> Result<Self> {
        let capacity = check_frames(frames)?;
        Ok(Self {
            nodes: Vec::with_capacity(capacity),
            page_table: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
            capacity,
            stats: MmuStats::new(),
            sink: Arc::new(NoopSink),
        })
    }

    /// Resident pages from least to most recently used.
    pub fn recency_order(&self) -> Vec<PageId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.head;
        while let Some(fid) = cursor {
            let node = &self.nodes[fid.0];
            order.push(node.page);
            cursor = node.next;
        }
        order
    }

    /// Dirty bit of a resident page, or `None` if it is not resident.
    pub fn is_dirty(&self, page: PageId) -> Option<bool> {
        self.page_table.get(&page).map(|fid| self.nodes[fid.0].dirty)
    }

    fn unlink(&mut self, fid: FrameId) {
        let LruNode { prev, next, .. } = self.nodes[fid.0];

        match prev {
            Some(p) => self.nodes[p.0].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n.0].prev = prev,
            None => self.tail = prev,
        }

        let node = &mut self.nodes[fid.0];
        node.prev = None;
        node.next = None;
    }

    fn push_back(&mut self, fid: FrameId) {
        self.nodes[fid.0].prev = self.tail;
        self.nodes[fid.0].next = None;

        match self.tail {
            Some(t) => self.nodes[t.0].next = Some(fid),
            None => self.head = Some(fid),
        }
        self.tail = Some(fid);
    }

    fn touch(&mut self, fid: FrameId) {
        if self.tail != Some(fid) {
            self.unlink(fid);
            self.push_back(fid);
        }
    }

    fn load(&mut self, page: PageId, access: Access) {
        let node = LruNode {
            page,
            dirty: access.is_write(),
            prev: None,
            next: None,
        };

        let fid = match self.head {
            Some(victim_fid) if self.nodes.len() == self.capacity => {
                self.unlink(victim_fid);
                let victim = std::mem::replace(&mut self.nodes[victim_fid.0], node);
                self.page_table.remove(&victim.page);

                self.stats.record_eviction(victim.dirty);
                self.sink.record(&MemoryEvent::Evict {
                    page: victim.page,
                    dirty: victim.dirty,
                });
                victim_fid
            }
            _ => {
                self.nodes.push(node);
                FrameId::new(self.nodes.len() - 1)
            }
        };

        self.page_table.insert(page, fid);
        self.push_back(fid);
    }
}

impl Mmu for LruMmu {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn access(&mut self, page: PageId, access: Access) {
        if let Some(&fid) = self.page_table.get(&page) {
            self.touch(fid);
            if access.is_write() {
                self.nodes[fid.0].dirty = true;
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

    fn pages(ids: &[u64]) -> Vec<PageId> {
        ids.iter().copied().map(PageId::new).collect()
    }

    #[test]
    fn test_lru_rejects_zero_frames() {
        assert!(matches!(LruMmu::new(0), Err(Error::InvalidFrameCount(0))));
    }

    #[test]
    fn test_lru_evicts_least_recent() {
        let sink = Arc::new(RecordingSink::new());
        let mut mmu = LruMmu::new(3).unwrap();
        mmu.set_event_sink(sink.clone());

        for p in [1, 2, 3, 1, 4] {
            mmu.read_memory(PageId::new(p));
        }

        assert_eq!(sink.evicted_pages(), pages(&[2]));
        assert_eq!(mmu.recency_order(), pages(&[3, 1, 4]));
        assert_eq!(mmu.get_total_page_faults(), 4);
        assert_eq!(mmu.get_total_disk_reads(), 4);
        assert_eq!(mmu.get_total_disk_writes(), 0);
    }

    #[test]
    fn test_lru_hit_moves_to_most_recent() {
        let mut mmu = LruMmu::new(4).unwrap();
        for p in [1, 2, 3, 4] {
            mmu.read_memory(PageId::new(p));
        }

        mmu.read_memory(PageId::new(1)); // head
        assert_eq!(mmu.recency_order(), pages(&[2, 3, 4, 1]));

        mmu.read_memory(PageId::new(3)); // middle
        assert_eq!(mmu.recency_order(), pages(&[2, 4, 1, 3]));

        mmu.read_memory(PageId::new(3)); // already the tail
        assert_eq!(mmu.recency_order(), pages(&[2, 4, 1, 3]));
    }

    #[test]
    fn test_lru_dirty_victim_is_written_back() {
        let mut mmu = LruMmu::new(2).unwrap();
        mmu.read_memory(PageId::new(1));
        mmu.write_memory(PageId::new(1)); // write hit dirties it
        mmu.read_memory(PageId::new(2));
        assert_eq!(mmu.is_dirty(PageId::new(1)), Some(true));

        mmu.read_memory(PageId::new(3)); // evicts 1
        assert_eq!(mmu.get_total_disk_writes(), 1);

        mmu.read_memory(PageId::new(4)); // evicts clean 2
        assert_eq!(mmu.get_total_disk_writes(), 1);
        assert_eq!(mmu.stats().evictions, 2);
    }

    #[test]
    fn test_lru_write_miss_loads_dirty() {
        let mut mmu = LruMmu::new(1).unwrap();
        mmu.write_memory(PageId::new(9));
        assert_eq!(mmu.is_dirty(PageId::new(9)), Some(true));

        mmu.read_memory(PageId::new(10));
        assert_eq!(mmu.get_total_disk_writes(), 1);
        assert_eq!(mmu.is_dirty(PageId::new(10)), Some(false));
    }

    #[test]
    fn test_lru_reused_node_keeps_list_consistent() {
        let mut mmu = LruMmu::new(2).unwrap();
        for p in [1, 2, 3, 2, 4, 5, 4] {
            mmu.read_memory(PageId::new(p));
            assert!(mmu.resident_count() <= 2);
            assert_eq!(mmu.recency_order().len(), mmu.resident_count());
        }
        assert_eq!(mmu.recency_order(), pages(&[5, 4]));
    }

    #[test]
    fn test_lru_repeated_reads_are_free() {
        let mut mmu = LruMmu::new(2).unwrap();
        mmu.read_memory(PageId::new(1));
        mmu.read_memory(PageId::new(1));
        mmu.read_memory(PageId::new(1));

        assert_eq!(mmu.get_total_page_faults(), 1);
        assert_eq!(mmu.get_total_disk_reads(), 1);
        assert_eq!(mmu.stats().hits(), 2);
    }
}
