//! pagesim - a virtual-memory page replacement simulator with swappable
//! eviction policies.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            pagesim                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          Driver (simulator/ + bin/pagesim)               │   │
//! │  │        trace file → Simulation → Report                  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Replacement Policies (mmu/)                   │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │      Mmu trait:  CLOCK  |  LRU  |  RANDOM        │   │   │
//! │  │   │           (selected at runtime)                  │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  │      MmuStats counters + EventSink observers             │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Common primitives (common/)                   │   │
//! │  │         PageId + FrameId + config + Error                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Error, config)
//! - [`mmu`] - The memory-manager contract and the replacement policies
//! - [`trace`] - Reference trace parsing
//! - [`simulator`] - Trace replay and reporting
//!
//! # Quick Start
//! ```
//! use pagesim::mmu::{LruMmu, Mmu};
//! use pagesim::PageId;
//!
//! let mut mmu = LruMmu::new(3).unwrap();
//! for page in [1, 2, 3, 1, 4] {
//!     mmu.read_memory(PageId::new(page));
//! }
//!
//! assert_eq!(mmu.get_total_page_faults(), 4);
//! assert!(!mmu.is_resident(PageId::new(2)));
//! ```

pub mod common;
pub mod mmu;
pub mod simulator;
pub mod trace;

// Re-export commonly used items at crate root for convenience
pub use common::config::{PAGE_SHIFT, PAGE_SIZE};
pub use common::{Error, FrameId, PageId, Result};

pub use mmu::{Access, Mmu, MmuStats, PolicyKind};
pub use simulator::{Report, Simulation};
pub use trace::TraceEntry;
