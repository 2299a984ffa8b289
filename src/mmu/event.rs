//! Observer hooks for replacement decisions.
//!
//! Policies never print. Every hit, fault, second chance and eviction is
//! reported as a [`MemoryEvent`] to the policy's [`EventSink`], and the sink
//! decides what to do with it. Sinks have no influence on counters or
//! victim selection.

use std::fmt;

use parking_lot::Mutex;

use crate::common::PageId;
use crate::mmu::Access;

/// Something a policy did while servicing a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryEvent {
    /// The page was resident.
    Hit { page: PageId, access: Access },

    /// The page was not resident and is being loaded.
    Fault { page: PageId, access: Access },

    /// Clock cleared this page's reference bit and moved on.
    SecondChance { page: PageId },

    /// The page was removed to free its frame. `dirty` pages are written back.
    Evict { page: PageId, dirty: bool },
}

impl fmt::Display for MemoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryEvent::Hit { page, access } => write!(f, "{} hit: {}", access, page),
            MemoryEvent::Fault { page, access } => write!(f, "{} miss: {}", access, page),
            MemoryEvent::SecondChance { page } => write!(f, "second chance: {}", page),
            MemoryEvent::Evict { page, dirty: true } => {
                write!(f, "evicting {} (dirty, writing back)", page)
            }
            MemoryEvent::Evict { page, dirty: false } => write!(f, "evicting {}", page),
        }
    }
}

/// Receives events from a policy.
///
/// Takes `&self` so one sink can be shared by several policies through an
/// `Arc`. Implementations needing state use interior mutability.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &MemoryEvent);
}

/// Discards every event. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl EventSink for NoopSink {
    #[inline]
    fn record(&self, _event: &MemoryEvent) {}
}

/// Writes one line per event to stderr. Installed by `set_debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugSink;

impl EventSink for DebugSink {
    fn record(&self, event: &MemoryEvent) {
        eprintln!("{}", event);
    }
}

/// Collects events in memory.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use pagesim::mmu::{LruMmu, MemoryEvent, Mmu, RecordingSink};
/// use pagesim::PageId;
///
/// let sink = Arc::new(RecordingSink::new());
/// let mut mmu = LruMmu::new(1).unwrap();
/// mmu.set_event_sink(sink.clone());
///
/// mmu.read_memory(PageId::new(7));
/// assert_eq!(sink.len(), 1);
/// assert!(matches!(sink.events()[0], MemoryEvent::Fault { .. }));
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<MemoryEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far, oldest first.
    pub fn events(&self) -> Vec<MemoryEvent> {
        self.events.lock().clone()
    }

    /// Pages evicted so far, in eviction order.
    pub fn evicted_pages(&self) -> Vec<PageId> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                MemoryEvent::Evict { page, .. } => Some(*page),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: &MemoryEvent) {
        self.events.lock().push(*event);
    }
}
