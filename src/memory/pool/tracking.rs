/*!
 * Pool Tracking
 * Live-byte total, peak usage and operation counters for one pool
 */

use crate::core::types::Size;
use crate::memory::types::PoolStats;

/// Per-pool byte and operation tracking
#[derive(Debug, Clone, Default)]
pub(super) struct PoolTracking {
    pub current_bytes: Size,
    pub peak_bytes: Size,
    pub allocations: u64,
    pub frees: u64,
    pub reallocations: u64,
    pub duplications: u64,
}

impl PoolTracking {
    pub fn new() -> Self {
        Self::default()
    }

    fn grow(&mut self, size: Size) {
        self.current_bytes += size;
        if self.current_bytes > self.peak_bytes {
            self.peak_bytes = self.current_bytes;
        }
    }

    pub fn add_allocation(&mut self, size: Size) {
        self.grow(size);
        self.allocations += 1;
    }

    pub fn add_duplicate(&mut self, size: Size) {
        self.grow(size);
        self.duplications += 1;
    }

    pub fn remove_allocation(&mut self, size: Size) {
        self.current_bytes = self.current_bytes.saturating_sub(size);
        self.frees += 1;
    }

    pub fn resize_allocation(&mut self, old: Size, new: Size) {
        self.current_bytes = self.current_bytes.saturating_sub(old);
        self.grow(new);
        self.reallocations += 1;
    }

    /// An allocation moved out to another pool
    pub fn detach(&mut self, size: Size) {
        self.current_bytes = self.current_bytes.saturating_sub(size);
    }

    /// An allocation moved in from another pool
    pub fn adopt(&mut self, size: Size) {
        self.grow(size);
        self.reallocations += 1;
    }

    /// Every allocation released at once
    pub fn remove_all(&mut self, count: usize) {
        self.current_bytes = 0;
        self.frees += count as u64;
    }

    pub fn snapshot(&self, count: usize) -> PoolStats {
        PoolStats {
            count,
            bytes: self.current_bytes,
            peak_bytes: self.peak_bytes,
            allocations: self.allocations,
            frees: self.frees,
            reallocations: self.reallocations,
            duplications: self.duplications,
        }
    }
}
