/*!
 * Pool Allocator Implementation
 * Allocation and release logic
 */

use super::{LocalPool, Placement};
use crate::core::types::Size;
use crate::core::CallSite;
use crate::memory::types::{Handle, PoolError, PoolResult};
use tracing::{debug, info};

impl LocalPool {
    /// Allocate a zero-filled block of `size` bytes at the tail of the pool
    pub fn allocate(&mut self, size: Size, site: CallSite) -> PoolResult<Handle> {
        self.check_size(size, "allocate")?;
        self.allocate_unchecked(size, site)
    }

    /// Allocate `count * size` zero-filled bytes
    pub fn zero_allocate(&mut self, count: Size, size: Size, site: CallSite) -> PoolResult<Handle> {
        let Some(total) = count.checked_mul(size) else {
            return self.fail(PoolError::SizeOverflow { count, size });
        };
        self.check_size(total, "zero_allocate")?;
        self.allocate_unchecked(total, site)
    }

    fn allocate_unchecked(&mut self, size: Size, site: CallSite) -> PoolResult<Handle> {
        let header = self.new_header(size, site)?;
        let handle = self.link_header(header, Placement::Back)?;
        self.tracking.add_allocation(size);

        debug!(
            pool = %self.id,
            handle = %handle,
            size,
            bytes = self.bytes(),
            "allocated"
        );
        Ok(handle)
    }

    /// Release one allocation, returning its size
    pub fn free(&mut self, handle: Handle) -> PoolResult<Size> {
        self.resolve(handle, "free")?;
        let (header, _) = self.unlink_header(handle)?;
        let size = header.size();
        self.tracking.remove_allocation(size);

        debug!(
            pool = %self.id,
            handle = %handle,
            size,
            bytes = self.bytes(),
            "freed"
        );
        Ok(size)
    }

    /// Release every allocation front to back in one pass
    ///
    /// Returns the number of bytes released. Every outstanding handle goes
    /// stale.
    pub fn free_all(&mut self) -> PoolResult<Size> {
        let released = self.bytes();
        let count = self.allocations.clear_release(&mut self.headers)?;
        self.tracking.remove_all(count);

        info!(pool = %self.id, count, bytes = released, "freed all allocations");
        Ok(released)
    }
}
