/*!
 * Pool Types
 * Handles, errors, statistics and report snapshots for tracked pools
 */

use crate::core::types::Size;
use crate::core::{CallSite, InlineString, ListError, PoolId};
use crate::list::NodeKey;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque reference to one live allocation
///
/// Handles stand where a raw pointer would: they name the issuing pool and
/// the header slot. A freed or reallocated handle goes stale and every
/// operation on it is rejected.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Handle {
    pool: PoolId,
    key: NodeKey,
}

impl Handle {
    /// The null argument: names no pool and no slot
    pub const NULL: Self = Self {
        pool: PoolId::NULL,
        key: NodeKey::NULL,
    };

    pub(crate) const fn new(pool: PoolId, key: NodeKey) -> Self {
        Self { pool, key }
    }

    /// Pool that issued this handle
    #[inline]
    pub const fn pool(self) -> PoolId {
        self.pool
    }

    #[inline]
    pub const fn key(self) -> NodeKey {
        self.key
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.pool.is_null()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "null")
        } else {
            write!(f, "{}#{}", self.pool, self.key)
        }
    }
}

/// Pool operation result
pub type PoolResult<T> = Result<T, PoolError>;

/// Pool usage errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum PoolError {
    #[error("Null handle passed to {0}")]
    #[diagnostic(
        code(pool::null_argument),
        help("Handle::NULL (or a default handle) never names an allocation.")
    )]
    NullArgument(InlineString),

    #[error("Zero-size request in {0}")]
    #[diagnostic(
        code(pool::zero_size_request),
        help("Allocation sizes must be at least one byte.")
    )]
    ZeroSizeRequest(InlineString),

    #[error("Requested {count} x {size} bytes overflows usize")]
    #[diagnostic(
        code(pool::size_overflow),
        help("Split the request into several smaller allocations.")
    )]
    SizeOverflow { count: Size, size: Size },

    #[error("Allocator refused a block of {size} bytes")]
    #[diagnostic(
        code(pool::allocation_failed),
        help("The pool is unchanged; request a smaller block.")
    )]
    AllocationFailed { size: Size },

    #[error("Handle {handle} does not belong to {pool}")]
    #[diagnostic(
        code(pool::foreign_pointer),
        help("Free, view and resize a handle only through the pool that issued it. Use reallocate_from or duplicate_from to move data between pools.")
    )]
    ForeignPointer { handle: Handle, pool: PoolId },

    #[error("Handle {0} is stale (already freed or reallocated)")]
    #[diagnostic(
        code(pool::stale_handle),
        help("reallocate returns a new handle; the old one is invalid after the call.")
    )]
    StaleHandle(Handle),

    #[error("{pool} still tracks {count} allocations ({bytes} bytes)")]
    #[diagnostic(
        code(pool::non_empty_on_destroy),
        help("Call free_all() before destroy(), or free each allocation.")
    )]
    NonEmptyOnDestroy { pool: PoolId, count: usize, bytes: Size },

    #[error("Range {offset}..{end} is outside allocation {handle} of {size} bytes")]
    #[diagnostic(
        code(pool::out_of_bounds),
        help("Reads and writes must stay within size_of(handle).")
    )]
    OutOfBounds {
        handle: Handle,
        offset: Size,
        end: Size,
        size: Size,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    List(#[from] ListError),
}

/// Running pool counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Live allocations
    pub count: usize,
    /// Live bytes
    pub bytes: Size,
    /// High-water mark of `bytes`
    pub peak_bytes: Size,
    pub allocations: u64,
    pub frees: u64,
    pub reallocations: u64,
    pub duplications: u64,
}

/// One live allocation as seen by diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationInfo {
    pub handle: Handle,
    pub size: Size,
    pub site: CallSite,
}

impl fmt::Display for AllocationInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Size: {} bytes - {}", self.handle, self.size, self.site)
    }
}

/// Serializable snapshot of a pool and every allocation it tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolReport {
    pub pool: PoolId,
    pub site: CallSite,
    pub stats: PoolStats,
    /// In list order
    pub allocations: Vec<AllocationInfo>,
}

impl fmt::Display for PoolReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pool {}", self.site)?;
        writeln!(f, "  Total bytes allocated: {}", self.stats.bytes)?;
        writeln!(f, "  Allocated pointers ({}):", self.allocations.len())?;
        for (i, info) in self.allocations.iter().enumerate() {
            writeln!(f, "    [{}] {}", i, info)?;
        }
        Ok(())
    }
}
