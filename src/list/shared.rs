/*!
 * Shared List
 *
 * Thread-safe owning list: an [`IntrusiveList`] and the [`NodeArena`] holding
 * its records behind one `parking_lot::RwLock`. Queries take the read lock,
 * every structural change takes the write lock for its whole duration.
 *
 * Values are addressed by [`ListKey`]s, which name the issuing list as well
 * as the arena slot. A key presented to any other list is rejected before
 * the arena is consulted.
 */

use super::arena::{NodeArena, NodeKey};
use super::intrusive::IntrusiveList;
use super::link::Node;
use crate::core::{DestroyError, DestroyResult, ListError, ListId, ListResult, Policy};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Key of one value in a [`SharedList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListKey {
    list: ListId,
    key: NodeKey,
}

impl ListKey {
    pub(crate) const fn new(list: ListId, key: NodeKey) -> Self {
        Self { list, key }
    }

    /// List that issued this key
    #[inline]
    pub const fn list(self) -> ListId {
        self.list
    }

    #[inline]
    pub const fn key(self) -> NodeKey {
        self.key
    }
}

impl fmt::Display for ListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.list, self.key)
    }
}

#[derive(Debug)]
struct ListState<T> {
    list: IntrusiveList,
    nodes: NodeArena<Node<T>>,
}

impl<T> ListState<T> {
    /// Arena key behind `key`, or `ForeignNode` when another list issued it
    fn resolve(&self, key: ListKey) -> ListResult<NodeKey> {
        let id = self.list.id();
        if key.list != id {
            return Err(self.list.policy().fail(ListError::ForeignNode {
                node: key.key,
                list: id,
            }));
        }
        Ok(key.key)
    }

    /// Store `value` and link it with `attach`; the record is released again
    /// if linking fails
    fn link_new<F>(&mut self, value: T, attach: F) -> ListResult<ListKey>
    where
        F: FnOnce(&mut IntrusiveList, &mut NodeArena<Node<T>>, NodeKey) -> ListResult<()>,
    {
        let key = self.nodes.insert(Node::new(value));
        if let Err(err) = attach(&mut self.list, &mut self.nodes, key) {
            self.nodes.remove(key);
            return Err(err);
        }
        Ok(ListKey::new(self.list.id(), key))
    }

    fn take(&mut self, key: NodeKey) -> ListResult<T> {
        self.nodes
            .remove(key)
            .map(Node::into_value)
            .ok_or(ListError::MissingNode(key))
    }
}

/// Owning, lock-protected list of `T`
///
/// Cloning shares the same list.
#[derive(Debug)]
pub struct SharedList<T> {
    inner: Arc<RwLock<ListState<T>>>,
    id: ListId,
}

impl<T> Clone for SharedList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            id: self.id,
        }
    }
}

impl<T> SharedList<T> {
    pub fn new() -> Self {
        Self::with_policy(Policy::default())
    }

    pub fn with_policy(policy: Policy) -> Self {
        let list = IntrusiveList::with_policy(policy);
        let id = list.id();
        Self {
            inner: Arc::new(RwLock::new(ListState {
                list,
                nodes: NodeArena::new(),
            })),
            id,
        }
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.inner.read().list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().list.is_empty()
    }

    pub fn push_back(&self, value: T) -> ListResult<ListKey> {
        self.inner
            .write()
            .link_new(value, |list, nodes, key| list.push_back(nodes, key))
    }

    pub fn push_front(&self, value: T) -> ListResult<ListKey> {
        self.inner
            .write()
            .link_new(value, |list, nodes, key| list.push_front(nodes, key))
    }

    pub fn insert_next(&self, pivot: ListKey, value: T) -> ListResult<ListKey> {
        let mut state = self.inner.write();
        let pivot = state.resolve(pivot)?;
        state.link_new(value, |list, nodes, key| list.insert_next(nodes, pivot, key))
    }

    pub fn insert_prev(&self, pivot: ListKey, value: T) -> ListResult<ListKey> {
        let mut state = self.inner.write();
        let pivot = state.resolve(pivot)?;
        state.link_new(value, |list, nodes, key| list.insert_prev(nodes, pivot, key))
    }

    /// Key at `index`
    pub fn key_at(&self, index: usize) -> ListResult<ListKey> {
        let state = self.inner.read();
        state
            .list
            .get(&state.nodes, index)
            .map(|key| ListKey::new(self.id, key))
    }

    /// Run `f` on the value at `index` under the read lock
    ///
    /// `f` must not call back into this list.
    pub fn with_value<R>(&self, index: usize, f: impl FnOnce(&T) -> R) -> ListResult<R> {
        let state = self.inner.read();
        let key = state.list.get(&state.nodes, index)?;
        state
            .nodes
            .get(key)
            .map(|node| f(node.value()))
            .ok_or(ListError::MissingNode(key))
    }

    /// Unlink and return the value stored under `key`
    pub fn erase(&self, key: ListKey) -> ListResult<T> {
        let mut state = self.inner.write();
        let key = state.resolve(key)?;
        let ListState { list, nodes } = &mut *state;
        list.erase(nodes, key)?;
        state.take(key)
    }

    pub fn pop_back(&self) -> ListResult<Option<T>> {
        let mut state = self.inner.write();
        let ListState { list, nodes } = &mut *state;
        match list.pop_back(nodes)? {
            Some(key) => state.take(key).map(Some),
            None => Ok(None),
        }
    }

    pub fn pop_front(&self) -> ListResult<Option<T>> {
        let mut state = self.inner.write();
        let ListState { list, nodes } = &mut *state;
        match list.pop_front(nodes)? {
            Some(key) => state.take(key).map(Some),
            None => Ok(None),
        }
    }

    /// Drop every value; returns how many were dropped
    pub fn clear(&self) -> ListResult<usize> {
        let mut state = self.inner.write();
        let ListState { list, nodes } = &mut *state;
        list.clear_release(nodes)
    }

    /// Release this handle on the list; refused while values remain
    ///
    /// Other clones keep the list alive after a successful call.
    pub fn destroy(self) -> DestroyResult<Self, ListError> {
        let rejected = {
            let state = self.inner.read();
            let size = state.list.len();
            if size == 0 {
                None
            } else {
                Some(state.list.policy().fail(ListError::NonEmptyOnDestroy {
                    list: self.id,
                    size,
                }))
            }
        };
        match rejected {
            Some(err) => Err(DestroyError::new(err, self)),
            None => match Arc::try_unwrap(self.inner) {
                Ok(lock) => {
                    let ListState { list, nodes } = lock.into_inner();
                    list.destroy().map_err(|rejected| {
                        let (err, list) = rejected.into_parts();
                        let id = list.id();
                        DestroyError::new(
                            err,
                            SharedList {
                                inner: Arc::new(RwLock::new(ListState { list, nodes })),
                                id,
                            },
                        )
                    })
                }
                Err(_) => Ok(()),
            },
        }
    }
}

impl<T: Clone> SharedList<T> {
    pub fn get(&self, index: usize) -> ListResult<T> {
        self.with_value(index, T::clone)
    }

    /// Snapshot of every value, front to back
    pub fn to_vec(&self) -> Vec<T> {
        let state = self.inner.read();
        state
            .list
            .iter(&state.nodes)
            .map(|(_, node)| node.value().clone())
            .collect()
    }
}

impl<T> Default for SharedList<T> {
    fn default() -> Self {
        Self::new()
    }
}
