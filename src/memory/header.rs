/*!
 * Allocation Header
 *
 * Bookkeeping record for one pool allocation: the issuing pool, the list
 * link, the call site and the zero-filled byte block itself. Headers live in
 * the pool's arena and are reached through a [`Handle`](super::Handle).
 */

use super::types::{AllocationInfo, Handle};
use crate::core::types::Size;
use crate::core::{CallSite, PoolId};
use crate::list::{Link, Linked};

#[derive(Debug, Clone)]
pub(crate) struct AllocationHeader {
    owning_pool: PoolId,
    link: Link,
    site: CallSite,
    data: Box<[u8]>,
}

/// Zero-filled buffer of `size` bytes, or `None` when the allocator refuses
fn zero_block(size: Size) -> Option<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(size).ok()?;
    data.resize(size, 0);
    Some(data)
}

impl AllocationHeader {
    /// Fresh zero-filled block of `size` bytes
    pub(crate) fn zeroed(owning_pool: PoolId, size: Size, site: CallSite) -> Option<Self> {
        Some(Self {
            owning_pool,
            link: Link::unlinked(),
            site,
            data: zero_block(size)?.into_boxed_slice(),
        })
    }

    /// Independent block of `size` bytes holding the first `min(len, size)`
    /// bytes of `self`; anything past them is zero
    ///
    /// Serves both resize and copy; `self` is never modified.
    pub(crate) fn copy_of(&self, owning_pool: PoolId, size: Size, site: CallSite) -> Option<Self> {
        let mut data = zero_block(size)?;
        let shared = self.data.len().min(size);
        data[..shared].copy_from_slice(&self.data[..shared]);
        Some(Self {
            owning_pool,
            link: Link::unlinked(),
            site,
            data: data.into_boxed_slice(),
        })
    }

    #[inline]
    pub(crate) fn owning_pool(&self) -> PoolId {
        self.owning_pool
    }

    #[inline]
    pub(crate) fn size(&self) -> Size {
        self.data.len()
    }

    pub(crate) fn site(&self) -> &CallSite {
        &self.site
    }

    pub(crate) fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub(crate) fn info(&self, handle: Handle) -> AllocationInfo {
        AllocationInfo {
            handle,
            size: self.size(),
            site: self.site.clone(),
        }
    }
}

impl Linked for AllocationHeader {
    #[inline]
    fn link(&self) -> &Link {
        &self.link
    }

    #[inline]
    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }
}
