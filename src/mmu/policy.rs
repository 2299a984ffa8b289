//! Runtime policy selection.

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, Result};
use crate::mmu::{ClockMmu, LruMmu, Mmu, RandomMmu};

/// The available replacement policies.
///
/// # Example
/// ```
/// use pagesim::mmu::PolicyKind;
///
/// let kind: PolicyKind = "lru".parse().unwrap();
/// let mmu = kind.build(8).unwrap();
/// assert_eq!(mmu.name(), "lru");
/// assert_eq!(mmu.capacity(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Clock,
    Lru,
    Random,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Clock, PolicyKind::Lru, PolicyKind::Random];

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Clock => "clock",
            PolicyKind::Lru => "lru",
            PolicyKind::Random => "rand",
        }
    }

    /// Build a policy with `frames` frames. Random is seeded from OS entropy.
    pub fn build(self, frames: usize) -> Result<Box<dyn Mmu>> {
        Ok(match self {
            PolicyKind::Clock => Box::new(ClockMmu::new(frames)?),
            PolicyKind::Lru => Box::new(LruMmu::new(frames)?),
            PolicyKind::Random => Box::new(RandomMmu::new(frames)?),
        })
    }

    /// Like [`build`](Self::build), with a fixed seed for the random policy.
    /// Clock and LRU are deterministic and ignore it.
    pub fn build_seeded(self, frames: usize, seed: u64) -> Result<Box<dyn Mmu>> {
        match self {
            PolicyKind::Random => Ok(Box::new(RandomMmu::with_seed(frames, seed)?)),
            other => other.build(frames),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clock" => Ok(PolicyKind::Clock),
            "lru" => Ok(PolicyKind::Lru),
            "rand" | "random" => Ok(PolicyKind::Random),
            _ => Err(Error::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
