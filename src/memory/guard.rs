/*!
 * Allocation Guard
 *
 * RAII wrapper that frees a [`SharedPool`] allocation on drop
 */

use super::shared::SharedPool;
use super::types::{Handle, PoolResult};
use crate::core::types::Size;
use crate::core::CallSite;
use tracing::warn;

/// Frees its allocation when dropped unless released first
#[derive(Debug)]
pub struct AllocationGuard {
    pool: SharedPool,
    handle: Handle,
    size: Size,
    active: bool,
}

impl AllocationGuard {
    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pool(&self) -> &SharedPool {
        &self.pool
    }

    /// Disarm the guard and keep the allocation alive
    pub fn release(mut self) -> Handle {
        self.active = false;
        self.handle
    }

    /// Free now, surfacing any error instead of logging it
    pub fn free(mut self) -> PoolResult<Size> {
        self.active = false;
        self.pool.free(self.handle)
    }
}

impl Drop for AllocationGuard {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        if let Err(e) = self.pool.free(self.handle) {
            warn!(handle = %self.handle, error = %e, "guarded allocation could not be freed");
        }
    }
}

impl SharedPool {
    /// Allocate with an RAII guard for automatic cleanup
    ///
    /// # Example
    ///
    /// ```rust
    /// use tracked_pool::{call_site, SharedPool};
    ///
    /// let pool = SharedPool::new(call_site!("scratch"));
    /// {
    ///     let guard = pool.allocate_guard(1024, call_site!())?;
    ///     assert_eq!(pool.bytes(), guard.size());
    /// }
    /// assert_eq!(pool.bytes(), 0);
    /// # Ok::<(), tracked_pool::PoolError>(())
    /// ```
    pub fn allocate_guard(&self, size: Size, site: CallSite) -> PoolResult<AllocationGuard> {
        let handle = self.allocate(size, site)?;
        Ok(AllocationGuard {
            pool: self.clone(),
            handle,
            size,
            active: true,
        })
    }
}
