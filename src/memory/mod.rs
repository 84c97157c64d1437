/*!
 * Memory Module
 *
 * Tracked pools: groups of heap allocations released individually or all at
 * once, with live-count and live-byte bookkeeping for diagnostics.
 *
 * ## Features
 *
 * - **Handles**: every allocation is named by an opaque [`Handle`]; foreign,
 *   stale and null handles are rejected, never dereferenced
 * - **Bulk release**: `free_all` walks the allocation list once
 * - **Resize / copy**: within one pool or explicitly across two
 * - **Diagnostics**: text dump, `tracing` dump and a serializable report
 * - **Threading**: [`LocalPool`] for single owners, [`SharedPool`] behind a
 *   reader/writer lock
 */

mod config;
mod guard;
mod header;
mod pool;
mod shared;
mod traits;
mod types;

// Re-export for convenience
pub use config::PoolConfig;
pub use guard::AllocationGuard;
pub use pool::LocalPool;
pub use shared::SharedPool;
pub use traits::*;
pub use types::*;
