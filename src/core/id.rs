/*!
 * ID Generation System
 * Type-safe identifiers for pools and lists
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

// ============================================================================
// Type-Safe ID Wrappers
// ============================================================================

/// Pool identity. `PoolId(0)` is never minted and marks a null handle.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PoolId(pub(crate) u64);

/// List identity, recorded in every linked node as its owner.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ListId(pub(crate) u64);

impl PoolId {
    pub const NULL: Self = Self(0);

    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl ListId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool:{}", self.0)
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list:{}", self.0)
    }
}

impl From<u64> for PoolId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<u64> for ListId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

// ============================================================================
// ID Generator Trait
// ============================================================================

/// Generic ID generator interface
pub trait IdGenerator<T> {
    /// Generate next ID
    fn next(&self) -> T;

    /// Get current counter value (for debugging)
    fn current(&self) -> T;
}

// ============================================================================
// Atomic Counter Generator
// ============================================================================

/// Lock-free monotonic counter
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - Usable from a `static`, so ids are unique per process without any
///   caller-visible global state
#[repr(C, align(64))]
pub struct AtomicGenerator<T> {
    counter: AtomicU64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AtomicGenerator<T> {
    /// Create new generator starting at given value
    #[inline]
    pub const fn new(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
            _marker: PhantomData,
        }
    }

    /// Create new generator starting at 1
    #[inline]
    pub const fn default_start() -> Self {
        Self::new(1)
    }
}

impl<T: From<u64>> IdGenerator<T> for AtomicGenerator<T> {
    #[inline]
    fn next(&self) -> T {
        T::from(self.counter.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    fn current(&self) -> T {
        T::from(self.counter.load(Ordering::Relaxed))
    }
}

static POOL_IDS: AtomicGenerator<PoolId> = AtomicGenerator::default_start();
static LIST_IDS: AtomicGenerator<ListId> = AtomicGenerator::default_start();

/// Mint a fresh pool id (never [`PoolId::NULL`])
#[inline]
pub(crate) fn next_pool_id() -> PoolId {
    POOL_IDS.next()
}

/// Mint a fresh list id
#[inline]
pub(crate) fn next_list_id() -> ListId {
    LIST_IDS.next()
}
