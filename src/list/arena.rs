/*!
 * Node Arena
 *
 * Generational slab backing intrusive lists. Records are addressed by
 * [`NodeKey`]s that stay valid until the record is removed; removal bumps the
 * slot generation so every key minted before it is detected as stale in O(1).
 *
 * ## Slot recycling
 *
 * - Vacant slots form a LIFO free list threaded through the slot vector
 * - A recycled slot keeps its bumped generation, so old keys never alias
 * - Generation 0 is never issued: a zeroed key resolves to nothing
 */

use super::link::{Link, Linked};
use crate::core::limits::FIRST_GENERATION;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable address of a record inside a [`NodeArena`]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeKey {
    index: u32,
    generation: u32,
}

impl NodeKey {
    /// Key that never resolves
    pub const NULL: Self = Self {
        index: 0,
        generation: 0,
    };

    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.generation == 0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied { generation: u32, value: T },
    Vacant { generation: u32, next_free: Option<u32> },
}

/// Generational slab of list records
#[derive(Debug, Clone)]
pub struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Number of live records
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store a record and return its key
    pub fn insert(&mut self, value: T) -> NodeKey {
        self.len += 1;

        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            let (generation, next_free) = match slot {
                Slot::Vacant {
                    generation,
                    next_free,
                } => (*generation, *next_free),
                // Free list only ever threads vacant slots
                Slot::Occupied { generation, .. } => (*generation, None),
            };
            *slot = Slot::Occupied { generation, value };
            self.free_head = next_free;
            return NodeKey { index, generation };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied {
            generation: FIRST_GENERATION,
            value,
        });
        NodeKey {
            index,
            generation: FIRST_GENERATION,
        }
    }

    pub fn get(&self, key: NodeKey) -> Option<&T> {
        match self.slots.get(key.index as usize)? {
            Slot::Occupied { generation, value } if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        match self.slots.get_mut(key.index as usize)? {
            Slot::Occupied { generation, value } if *generation == key.generation => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn contains(&self, key: NodeKey) -> bool {
        self.get(key).is_some()
    }

    /// Remove a record, invalidating every copy of `key`
    pub fn remove(&mut self, key: NodeKey) -> Option<T> {
        let slot = self.slots.get_mut(key.index as usize)?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == key.generation => {}
            _ => return None,
        }

        let next_generation = match key.generation.wrapping_add(1) {
            0 => FIRST_GENERATION,
            g => g,
        };
        let vacated = std::mem::replace(
            slot,
            Slot::Vacant {
                generation: next_generation,
                next_free: self.free_head,
            },
        );
        self.free_head = Some(key.index);
        self.len -= 1;

        match vacated {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Live records in slot order (not list order)
    pub fn iter(&self) -> impl Iterator<Item = (NodeKey, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied { generation, value } => Some((
                    NodeKey {
                        index: index as u32,
                        generation: *generation,
                    },
                    value,
                )),
                Slot::Vacant { .. } => None,
            })
    }
}

impl<T: Linked + Clone> NodeArena<T> {
    /// Copy a record into a fresh, unlinked slot
    ///
    /// The copy can be pushed into any list, including the one holding the
    /// original.
    pub fn duplicate(&mut self, key: NodeKey) -> Option<NodeKey> {
        let mut copy = self.get(key)?.clone();
        *copy.link_mut() = Link::unlinked();
        Some(self.insert(copy))
    }
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage an [`IntrusiveList`](super::IntrusiveList) threads its links through
///
/// The list never owns records; it only reads and rewrites the [`Link`]
/// embedded in each one, and asks the store to release them on
/// `clear_release`.
pub trait NodeStore {
    type Node: Linked;

    fn node(&self, key: NodeKey) -> Option<&Self::Node>;

    fn node_mut(&mut self, key: NodeKey) -> Option<&mut Self::Node>;

    /// Drop the record from the store, returning it
    fn release(&mut self, key: NodeKey) -> Option<Self::Node>;
}

impl<T: Linked> NodeStore for NodeArena<T> {
    type Node = T;

    #[inline]
    fn node(&self, key: NodeKey) -> Option<&T> {
        self.get(key)
    }

    #[inline]
    fn node_mut(&mut self, key: NodeKey) -> Option<&mut T> {
        self.get_mut(key)
    }

    #[inline]
    fn release(&mut self, key: NodeKey) -> Option<T> {
        self.remove(key)
    }
}
