/*!
 * Pool Traits
 * Allocation and introspection interfaces shared by local and shared pools
 */

use super::pool::LocalPool;
use super::shared::SharedPool;
use super::types::{Handle, PoolReport, PoolResult, PoolStats};
use crate::core::types::Size;
use crate::core::{CallSite, PoolId};

/// Allocation interface
pub trait Allocator {
    /// Allocate a zero-filled block
    fn allocate(&mut self, size: Size, site: CallSite) -> PoolResult<Handle>;

    /// Allocate `count * size` zero-filled bytes
    fn zero_allocate(&mut self, count: Size, size: Size, site: CallSite) -> PoolResult<Handle>;

    /// Resize in place of the old allocation
    fn reallocate(&mut self, handle: Handle, size: Size, site: CallSite) -> PoolResult<Handle>;

    /// Independent copy of an allocation
    fn duplicate(&mut self, handle: Handle, size: Size, site: CallSite) -> PoolResult<Handle>;

    /// Release one allocation
    fn free(&mut self, handle: Handle) -> PoolResult<Size>;

    /// Release every allocation
    fn free_all(&mut self) -> PoolResult<Size>;
}

/// Pool statistics provider
pub trait PoolInfo {
    fn id(&self) -> PoolId;

    /// Live allocations
    fn count(&self) -> usize;

    /// Live bytes
    fn bytes(&self) -> Size;

    fn stats(&self) -> PoolStats;

    fn report(&self) -> PoolReport;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Tracked pool combining both interfaces
pub trait TrackedPool: Allocator + PoolInfo {}

impl<T> TrackedPool for T where T: Allocator + PoolInfo {}

impl Allocator for LocalPool {
    fn allocate(&mut self, size: Size, site: CallSite) -> PoolResult<Handle> {
        LocalPool::allocate(self, size, site)
    }

    fn zero_allocate(&mut self, count: Size, size: Size, site: CallSite) -> PoolResult<Handle> {
        LocalPool::zero_allocate(self, count, size, site)
    }

    fn reallocate(&mut self, handle: Handle, size: Size, site: CallSite) -> PoolResult<Handle> {
        LocalPool::reallocate(self, handle, size, site)
    }

    fn duplicate(&mut self, handle: Handle, size: Size, site: CallSite) -> PoolResult<Handle> {
        LocalPool::duplicate(self, handle, size, site)
    }

    fn free(&mut self, handle: Handle) -> PoolResult<Size> {
        LocalPool::free(self, handle)
    }

    fn free_all(&mut self) -> PoolResult<Size> {
        LocalPool::free_all(self)
    }
}

impl PoolInfo for LocalPool {
    fn id(&self) -> PoolId {
        LocalPool::id(self)
    }

    fn count(&self) -> usize {
        LocalPool::count(self)
    }

    fn bytes(&self) -> Size {
        LocalPool::bytes(self)
    }

    fn stats(&self) -> PoolStats {
        LocalPool::stats(self)
    }

    fn report(&self) -> PoolReport {
        LocalPool::report(self)
    }
}

impl Allocator for SharedPool {
    fn allocate(&mut self, size: Size, site: CallSite) -> PoolResult<Handle> {
        SharedPool::allocate(self, size, site)
    }

    fn zero_allocate(&mut self, count: Size, size: Size, site: CallSite) -> PoolResult<Handle> {
        SharedPool::zero_allocate(self, count, size, site)
    }

    fn reallocate(&mut self, handle: Handle, size: Size, site: CallSite) -> PoolResult<Handle> {
        SharedPool::reallocate(self, handle, size, site)
    }

    fn duplicate(&mut self, handle: Handle, size: Size, site: CallSite) -> PoolResult<Handle> {
        SharedPool::duplicate(self, handle, size, site)
    }

    fn free(&mut self, handle: Handle) -> PoolResult<Size> {
        SharedPool::free(self, handle)
    }

    fn free_all(&mut self) -> PoolResult<Size> {
        SharedPool::free_all(self)
    }
}

impl PoolInfo for SharedPool {
    fn id(&self) -> PoolId {
        SharedPool::id(self)
    }

    fn count(&self) -> usize {
        SharedPool::count(self)
    }

    fn bytes(&self) -> Size {
        SharedPool::bytes(self)
    }

    fn stats(&self) -> PoolStats {
        SharedPool::stats(self)
    }

    fn report(&self) -> PoolReport {
        SharedPool::report(self)
    }
}
