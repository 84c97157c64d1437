/*!
 * Tracked Pool
 *
 * Groups related heap allocations under one owner. Each allocation is a
 * zero-filled byte block plus an [`AllocationHeader`] stored in the pool's
 * generational arena and linked into the pool's intrusive allocation list.
 *
 * ## Invariants
 *
 * - `count()` equals the number of linked headers
 * - `bytes()` equals the sum of their sizes
 * - Every handle is checked against the pool that issued it before use
 * - A pool is destroyed only once it is empty
 *
 * ## Operations
 *
 * - **allocate / zero_allocate**: link a fresh block at the tail
 * - **reallocate**: resize in the same list position; old handle goes stale
 * - **duplicate**: independent copy linked right after the source
 * - **free / free_all**: release one block, or every block in one pass
 *
 * `LocalPool` is unsynchronized: every mutation takes `&mut self`. Wrap it
 * in a [`SharedPool`](super::SharedPool) to share it between threads.
 */

mod allocator;
mod dump;
mod realloc;
mod tracking;

use super::config::PoolConfig;
use super::header::AllocationHeader;
use super::types::{Handle, PoolError, PoolResult, PoolStats};
use crate::core::id::next_pool_id;
use crate::core::types::Size;
use crate::core::{CallSite, DestroyError, DestroyResult, PoolId, Policy};
use crate::list::{IntrusiveList, NodeArena, NodeKey};
use tracing::{info, warn};
use tracking::PoolTracking;

/// Where a new header goes in the allocation list
#[derive(Debug, Clone, Copy)]
enum Placement {
    Back,
    Front,
    After(NodeKey),
}

/// Unsynchronized tracked pool
#[derive(Debug)]
pub struct LocalPool {
    id: PoolId,
    site: CallSite,
    headers: NodeArena<AllocationHeader>,
    allocations: IntrusiveList,
    tracking: PoolTracking,
    policy: Policy,
}

impl LocalPool {
    /// Empty pool created at `site`
    pub fn new(site: CallSite) -> Self {
        Self::with_config(site, PoolConfig::default())
    }

    pub fn with_config(site: CallSite, config: PoolConfig) -> Self {
        let site = match config.alias {
            Some(alias) => site.with_alias(&alias),
            None => site,
        };
        let id = next_pool_id();
        info!(pool = %id, site = %site, policy = %config.policy.on_failure, "pool created");

        Self {
            id,
            site,
            headers: NodeArena::with_capacity(config.initial_capacity),
            allocations: IntrusiveList::with_policy(config.policy),
            tracking: PoolTracking::new(),
            policy: config.policy,
        }
    }

    #[inline]
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Creation call site
    pub fn site(&self) -> &CallSite {
        &self.site
    }

    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Live allocations
    #[inline]
    pub fn count(&self) -> usize {
        self.allocations.len()
    }

    /// Live bytes
    #[inline]
    pub fn bytes(&self) -> Size {
        self.tracking.current_bytes
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    pub fn stats(&self) -> PoolStats {
        self.tracking.snapshot(self.count())
    }

    /// Whether `handle` names a live allocation of this pool
    pub fn contains(&self, handle: Handle) -> bool {
        handle.pool() == self.id && self.headers.contains(handle.key())
    }

    #[cold]
    fn fail<T>(&self, err: PoolError) -> PoolResult<T> {
        Err(self.policy.fail(err))
    }

    /// Null, ownership and staleness checks shared by every handle operation
    fn resolve(&self, handle: Handle, op: &str) -> PoolResult<&AllocationHeader> {
        if handle.is_null() {
            return self.fail(PoolError::NullArgument(op.into()));
        }
        if handle.pool() != self.id {
            return self.fail(PoolError::ForeignPointer {
                handle,
                pool: self.id,
            });
        }
        match self.headers.get(handle.key()) {
            Some(header) if header.owning_pool() == self.id => Ok(header),
            Some(_) => self.fail(PoolError::ForeignPointer {
                handle,
                pool: self.id,
            }),
            None => self.fail(PoolError::StaleHandle(handle)),
        }
    }

    fn resolve_mut(&mut self, handle: Handle, op: &str) -> PoolResult<&mut AllocationHeader> {
        self.resolve(handle, op)?;
        self.headers
            .get_mut(handle.key())
            .ok_or(PoolError::StaleHandle(handle))
    }

    fn check_size(&self, size: Size, op: &str) -> PoolResult<()> {
        if size == 0 {
            return self.fail(PoolError::ZeroSizeRequest(op.into()));
        }
        Ok(())
    }

    /// Fresh zero-filled header owned by this pool
    fn new_header(&self, size: Size, site: CallSite) -> PoolResult<AllocationHeader> {
        match AllocationHeader::zeroed(self.id, size, site) {
            Some(header) => Ok(header),
            None => self.fail(PoolError::AllocationFailed { size }),
        }
    }

    /// Copy of `source` resized to `size` and owned by this pool
    ///
    /// Built before the source is unlinked, so a refused allocation leaves
    /// both pools unchanged.
    fn copy_header(
        &self,
        source: &AllocationHeader,
        size: Size,
        site: CallSite,
    ) -> PoolResult<AllocationHeader> {
        match source.copy_of(self.id, size, site) {
            Some(header) => Ok(header),
            None => self.fail(PoolError::AllocationFailed { size }),
        }
    }

    /// Store `header` and link it at `placement`
    fn link_header(&mut self, header: AllocationHeader, placement: Placement) -> PoolResult<Handle> {
        let key = self.headers.insert(header);
        let linked = match placement {
            Placement::Back => self.allocations.push_back(&mut self.headers, key),
            Placement::Front => self.allocations.push_front(&mut self.headers, key),
            Placement::After(pivot) => self.allocations.insert_next(&mut self.headers, pivot, key),
        };
        if let Err(err) = linked {
            self.headers.remove(key);
            return Err(err.into());
        }
        Ok(Handle::new(self.id, key))
    }

    /// Unlink and remove a resolved header, returning it with its predecessor
    fn unlink_header(&mut self, handle: Handle) -> PoolResult<(AllocationHeader, Option<NodeKey>)> {
        let key = handle.key();
        let prev = self.allocations.prev_of(&self.headers, key)?;
        self.allocations.erase(&mut self.headers, key)?;
        let header = self
            .headers
            .remove(key)
            .ok_or(PoolError::StaleHandle(handle))?;
        Ok((header, prev))
    }

    /// Bytes of a live allocation
    pub fn view(&self, handle: Handle) -> PoolResult<&[u8]> {
        self.resolve(handle, "view").map(AllocationHeader::data)
    }

    pub fn view_mut(&mut self, handle: Handle) -> PoolResult<&mut [u8]> {
        self.resolve_mut(handle, "view_mut")
            .map(AllocationHeader::data_mut)
    }

    /// Size in bytes of a live allocation
    pub fn size_of(&self, handle: Handle) -> PoolResult<Size> {
        self.resolve(handle, "size_of").map(AllocationHeader::size)
    }

    pub fn read_to_vec(&self, handle: Handle) -> PoolResult<Vec<u8>> {
        self.view(handle).map(<[u8]>::to_vec)
    }

    /// Copy `bytes` into the allocation starting at `offset`
    pub fn write_at(&mut self, handle: Handle, offset: Size, bytes: &[u8]) -> PoolResult<()> {
        let size = self.size_of(handle)?;
        let end = offset.checked_add(bytes.len()).unwrap_or(Size::MAX);
        if end > size {
            return self.fail(PoolError::OutOfBounds {
                handle,
                offset,
                end,
                size,
            });
        }
        self.view_mut(handle)?[offset..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Tear the pool down; refused while it tracks any allocation
    ///
    /// A refused pool is handed back untouched inside the error.
    pub fn destroy(self) -> DestroyResult<Self, PoolError> {
        if !self.is_empty() {
            let err = self.policy.fail(PoolError::NonEmptyOnDestroy {
                pool: self.id,
                count: self.count(),
                bytes: self.bytes(),
            });
            return Err(DestroyError::new(err, self));
        }
        info!(pool = %self.id, site = %self.site, "pool destroyed");
        Ok(())
    }
}

impl Drop for LocalPool {
    fn drop(&mut self) {
        if self.is_empty() {
            return;
        }
        warn!(
            pool = %self.id,
            site = %self.site,
            count = self.count(),
            bytes = self.bytes(),
            "pool dropped with live allocations"
        );
        for info in self.live_allocations() {
            warn!(pool = %self.id, "leaked {}", info);
        }
        if let Err(e) = self.allocations.clear_release(&mut self.headers) {
            warn!(pool = %self.id, error = %e, "failed to unlink leaked allocations");
        }
    }
}
