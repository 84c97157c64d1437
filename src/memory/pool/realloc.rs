/*!
 * Reallocation and Duplication
 *
 * Resize or copy a live allocation, within one pool or across two.
 *
 * - Same-pool `reallocate` keeps the list position; the old handle goes stale
 * - Cross-pool `reallocate_from` moves ownership and appends to the tail
 * - Same-pool `duplicate` links the copy right after its source
 * - Cross-pool `duplicate_from` appends the copy to the tail
 *
 * The common prefix `min(old, new)` is preserved; anything past it reads as
 * zero.
 */

use super::{LocalPool, Placement};
use crate::core::types::Size;
use crate::core::CallSite;
use crate::memory::types::{Handle, PoolResult};
use tracing::{debug, info};

impl LocalPool {
    /// Resize an allocation of this pool, returning its new handle
    pub fn reallocate(&mut self, handle: Handle, size: Size, site: CallSite) -> PoolResult<Handle> {
        let header = self.resolve(handle, "reallocate")?;
        self.check_size(size, "reallocate")?;
        let resized = self.copy_header(header, size, site)?;

        let (old, prev) = self.unlink_header(handle)?;
        let old_size = old.size();
        let placement = prev.map_or(Placement::Front, Placement::After);
        let new_handle = self.link_header(resized, placement)?;
        self.tracking.resize_allocation(old_size, size);

        debug!(
            pool = %self.id,
            old = %handle,
            new = %new_handle,
            old_size,
            size,
            "reallocated"
        );
        Ok(new_handle)
    }

    /// Move an allocation out of `source` into this pool, resizing it
    ///
    /// `handle` is checked against `source`. Afterwards `source` no longer
    /// counts the old bytes and this pool owns the returned handle.
    pub fn reallocate_from(
        &mut self,
        source: &mut LocalPool,
        handle: Handle,
        size: Size,
        site: CallSite,
    ) -> PoolResult<Handle> {
        let header = source.resolve(handle, "reallocate_from")?;
        self.check_size(size, "reallocate_from")?;
        let moved = self.copy_header(header, size, site)?;

        let (old, _) = source.unlink_header(handle)?;
        let old_size = old.size();
        source.tracking.detach(old_size);

        let new_handle = self.link_header(moved, Placement::Back)?;
        self.tracking.adopt(size);

        info!(
            from = %source.id,
            to = %self.id,
            old = %handle,
            new = %new_handle,
            old_size,
            size,
            "allocation moved between pools"
        );
        Ok(new_handle)
    }

    /// Copy an allocation of this pool into a new, independent allocation
    pub fn duplicate(&mut self, handle: Handle, size: Size, site: CallSite) -> PoolResult<Handle> {
        let source = self.resolve(handle, "duplicate")?;
        self.check_size(size, "duplicate")?;

        let copy = self.copy_header(source, size, site)?;
        let new_handle = self.link_header(copy, Placement::After(handle.key()))?;
        self.tracking.add_duplicate(size);

        debug!(pool = %self.id, source = %handle, copy = %new_handle, size, "duplicated");
        Ok(new_handle)
    }

    /// Copy an allocation of `source` into this pool
    ///
    /// `source` is left completely untouched.
    pub fn duplicate_from(
        &mut self,
        source: &LocalPool,
        handle: Handle,
        size: Size,
        site: CallSite,
    ) -> PoolResult<Handle> {
        let original = source.resolve(handle, "duplicate_from")?;
        self.check_size(size, "duplicate_from")?;

        let copy = self.copy_header(original, size, site)?;
        let new_handle = self.link_header(copy, Placement::Back)?;
        self.tracking.add_duplicate(size);

        info!(
            from = %source.id,
            to = %self.id,
            source = %handle,
            copy = %new_handle,
            size,
            "allocation copied between pools"
        );
        Ok(new_handle)
    }
}
