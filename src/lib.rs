/*!
 * Tracked Pool Library
 *
 * Arena-style allocation tracking built on an intrusive doubly linked list.
 * A pool groups related allocations under one owner, releases them one by
 * one or all at once, and keeps live-count and live-byte totals for
 * diagnostics. Every misuse (null, foreign or stale handle, zero-size
 * request, non-empty teardown, bad index, empty pop) is caught at the call
 * and handled by a configurable failure policy.
 */

pub mod core;
pub mod list;
pub mod memory;
pub mod monitoring;

// Re-exports
pub use crate::core::{
    CallSite, DestroyError, FailurePolicy, ListError, ListId, ListResult, Policy, PoolId,
};
pub use list::{
    IntrusiveList, Link, Linked, ListKey, Node, NodeArena, NodeKey, NodeStore, SharedList,
};
pub use memory::{
    AllocationGuard, AllocationInfo, Allocator, Handle, LocalPool, PoolConfig, PoolError,
    PoolInfo, PoolReport, PoolResult, PoolStats, SharedPool, TrackedPool,
};
pub use monitoring::init_tracing;
