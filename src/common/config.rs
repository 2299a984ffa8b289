//! Configuration constants for pagesim.

/// Number of low address bits that select a byte within a page.
///
/// Trace addresses are mapped to page numbers with `address >> PAGE_SHIFT`.
pub const PAGE_SHIFT: u32 = 12;

/// Size of a virtual page in bytes (4KB).
///
/// This matches the OS page size on most systems, so traces captured
/// from real programs map one-to-one onto simulated pages.
pub const PAGE_SIZE: usize = 1 << PAGE_SHIFT;

/// Largest frame count the CLI accepts.
///
/// Every policy reserves its frame table and page table up front, a few
/// dozen bytes per frame. At this cap that stays within tens of megabytes.
pub const MAX_FRAMES: usize = 1 << 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_power_of_two() {
        assert!(PAGE_SIZE.is_power_of_two());
        assert_eq!(PAGE_SIZE, 4096);
    }

    #[test]
    fn test_max_frames_bounds_reservation() {
        // Generous per-frame cost: slot entry plus a hash table bucket.
        const BYTES_PER_FRAME: usize = 64;
        let reserved = MAX_FRAMES * BYTES_PER_FRAME;
        assert!(reserved <= 64 << 20, "{} bytes reserved at the cap", reserved);
    }

    #[test]
    fn test_page_shift_matches_size() {
        assert_eq!(1usize << PAGE_SHIFT, PAGE_SIZE);
    }
}
