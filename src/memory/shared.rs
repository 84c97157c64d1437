/*!
 * Shared Pool
 *
 * A [`LocalPool`] behind a `parking_lot::RwLock`, cheap to clone and safe to
 * use from many threads.
 *
 * ## Locking
 *
 * - Queries (`count`, `bytes`, `stats`, `report`, `print`, `view`) take the
 *   read lock
 * - Every mutation takes the write lock for its whole duration
 * - Cross-pool moves lock both pools in ascending [`PoolId`] order, so two
 *   threads moving allocations in opposite directions cannot deadlock
 *
 * The lock is not reentrant: callbacks passed to
 * [`for_each_allocation`](SharedPool::for_each_allocation) must not call back
 * into the same pool.
 */

use super::config::PoolConfig;
use super::pool::LocalPool;
use super::types::{AllocationInfo, Handle, PoolError, PoolReport, PoolResult, PoolStats};
use crate::core::types::Size;
use crate::core::{CallSite, DestroyError, DestroyResult, PoolId};
use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
use std::io;
use std::sync::Arc;

/// Thread-safe tracked pool
#[derive(Debug, Clone)]
pub struct SharedPool {
    inner: Arc<RwLock<LocalPool>>,
    id: PoolId,
}

impl SharedPool {
    pub fn new(site: CallSite) -> Self {
        Self::from_local(LocalPool::new(site))
    }

    pub fn with_config(site: CallSite, config: PoolConfig) -> Self {
        Self::from_local(LocalPool::with_config(site, config))
    }

    pub fn from_local(pool: LocalPool) -> Self {
        let id = pool.id();
        Self {
            inner: Arc::new(RwLock::new(pool)),
            id,
        }
    }

    #[inline]
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Whether both values share the same underlying pool
    pub fn same_pool(&self, other: &SharedPool) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn count(&self) -> usize {
        self.inner.read().count()
    }

    pub fn bytes(&self) -> Size {
        self.inner.read().bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> PoolStats {
        self.inner.read().stats()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.inner.read().contains(handle)
    }

    pub fn allocate(&self, size: Size, site: CallSite) -> PoolResult<Handle> {
        self.inner.write().allocate(size, site)
    }

    pub fn zero_allocate(&self, count: Size, size: Size, site: CallSite) -> PoolResult<Handle> {
        self.inner.write().zero_allocate(count, size, site)
    }

    pub fn reallocate(&self, handle: Handle, size: Size, site: CallSite) -> PoolResult<Handle> {
        self.inner.write().reallocate(handle, size, site)
    }

    pub fn duplicate(&self, handle: Handle, size: Size, site: CallSite) -> PoolResult<Handle> {
        self.inner.write().duplicate(handle, size, site)
    }

    pub fn free(&self, handle: Handle) -> PoolResult<Size> {
        self.inner.write().free(handle)
    }

    pub fn free_all(&self) -> PoolResult<Size> {
        self.inner.write().free_all()
    }

    /// Move an allocation of `source` into this pool
    ///
    /// Falls back to a same-pool [`reallocate`](Self::reallocate) when both
    /// values share one pool.
    pub fn reallocate_from(
        &self,
        source: &SharedPool,
        handle: Handle,
        size: Size,
        site: CallSite,
    ) -> PoolResult<Handle> {
        if self.same_pool(source) {
            return self.reallocate(handle, size, site);
        }
        let (mut dest, mut src) = write_pair(self, source);
        dest.reallocate_from(&mut src, handle, size, site)
    }

    /// Copy an allocation of `source` into this pool
    pub fn duplicate_from(
        &self,
        source: &SharedPool,
        handle: Handle,
        size: Size,
        site: CallSite,
    ) -> PoolResult<Handle> {
        if self.same_pool(source) {
            return self.duplicate(handle, size, site);
        }
        let (mut dest, src) = if self.id < source.id {
            let dest = self.inner.write();
            (dest, source.inner.read())
        } else {
            let src = source.inner.read();
            (self.inner.write(), src)
        };
        dest.duplicate_from(&src, handle, size, site)
    }

    /// Read-locked view of an allocation's bytes
    pub fn view(&self, handle: Handle) -> PoolResult<MappedRwLockReadGuard<'_, [u8]>> {
        let guard = self.inner.read();
        guard.view(handle)?;
        RwLockReadGuard::try_map(guard, |pool| pool.view(handle).ok())
            .map_err(|_| PoolError::StaleHandle(handle))
    }

    /// Write-locked view of an allocation's bytes
    pub fn view_mut(&self, handle: Handle) -> PoolResult<MappedRwLockWriteGuard<'_, [u8]>> {
        let guard = self.inner.write();
        guard.view(handle)?;
        RwLockWriteGuard::try_map(guard, |pool| pool.view_mut(handle).ok())
            .map_err(|_| PoolError::StaleHandle(handle))
    }

    pub fn size_of(&self, handle: Handle) -> PoolResult<Size> {
        self.inner.read().size_of(handle)
    }

    pub fn read_to_vec(&self, handle: Handle) -> PoolResult<Vec<u8>> {
        self.inner.read().read_to_vec(handle)
    }

    pub fn write_at(&self, handle: Handle, offset: Size, bytes: &[u8]) -> PoolResult<()> {
        self.inner.write().write_at(handle, offset, bytes)
    }

    pub fn for_each_allocation<F>(&self, f: F)
    where
        F: FnMut(&AllocationInfo),
    {
        self.inner.read().for_each_allocation(f)
    }

    pub fn report(&self) -> PoolReport {
        self.inner.read().report()
    }

    pub fn print(&self) {
        self.inner.read().print()
    }

    pub fn print_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        self.inner.read().print_to(out)
    }

    /// Release this handle on the pool; refused while allocations remain
    ///
    /// Other clones keep the pool alive after a successful call.
    pub fn destroy(self) -> DestroyResult<Self, PoolError> {
        let rejected = {
            let pool = self.inner.read();
            if pool.is_empty() {
                None
            } else {
                Some(pool.policy().fail(PoolError::NonEmptyOnDestroy {
                    pool: self.id,
                    count: pool.count(),
                    bytes: pool.bytes(),
                }))
            }
        };
        match rejected {
            Some(err) => Err(DestroyError::new(err, self)),
            None => match Arc::try_unwrap(self.inner) {
                Ok(lock) => lock.into_inner().destroy().map_err(|rejected| {
                    let (err, pool) = rejected.into_parts();
                    DestroyError::new(err, SharedPool::from_local(pool))
                }),
                Err(_) => Ok(()),
            },
        }
    }
}

/// Write-lock two distinct pools in ascending id order
fn write_pair<'a>(
    dest: &'a SharedPool,
    source: &'a SharedPool,
) -> (
    RwLockWriteGuard<'a, LocalPool>,
    RwLockWriteGuard<'a, LocalPool>,
) {
    if dest.id < source.id {
        let d = dest.inner.write();
        let s = source.inner.write();
        (d, s)
    } else {
        let s = source.inner.write();
        let d = dest.inner.write();
        (d, s)
    }
}
