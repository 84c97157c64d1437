/*!
 * List Module
 *
 * Intrusive doubly linked list over a generational arena.
 *
 * ## Layout
 *
 * - [`NodeArena`]: slab of records addressed by stable [`NodeKey`]s
 * - [`Link`] / [`Linked`]: link fields embedded in each record
 * - [`IntrusiveList`]: membership and order only, never allocates
 * - [`SharedList`]: owning list behind a reader/writer lock, addressed by
 *   list-tagged [`ListKey`]s
 *
 * Lookup by index walks from whichever end is closer, so `get` costs at most
 * `len / 2` hops.
 */

mod arena;
mod intrusive;
mod iter;
mod link;
mod shared;

// Re-export for convenience
pub use arena::{NodeArena, NodeKey, NodeStore};
pub use intrusive::IntrusiveList;
pub use iter::{Iter, IterRev};
pub use link::{Link, Linked, Node};
pub use shared::{ListKey, SharedList};
