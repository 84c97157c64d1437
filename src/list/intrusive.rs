/*!
 * Intrusive List
 *
 * Doubly linked list whose links live inside externally stored records. The
 * list holds only `{ id, size, front, back }` and never allocates; every
 * operation receives the [`NodeStore`] that owns the records.
 *
 * ## Membership
 *
 * A record belongs to at most one list at a time. Its link's `owner` field
 * names that list; linking a record that already has an owner, or erasing /
 * pivoting on a record owned by another list, is a usage error routed
 * through the list's [`Policy`].
 */

use super::arena::{NodeKey, NodeStore};
use super::iter::{Iter, IterRev};
use super::link::{Link, Linked};
use crate::core::id::next_list_id;
use crate::core::{DestroyError, DestroyResult, ListError, ListId, ListResult, Policy};
use tracing::trace;

/// Membership and order of records held in a [`NodeStore`]
#[derive(Debug)]
pub struct IntrusiveList {
    id: ListId,
    size: usize,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
    policy: Policy,
}

fn link_of<S: NodeStore>(store: &mut S, key: NodeKey) -> ListResult<&mut Link> {
    store
        .node_mut(key)
        .map(Linked::link_mut)
        .ok_or(ListError::MissingNode(key))
}

impl IntrusiveList {
    pub fn new() -> Self {
        Self::with_policy(Policy::default())
    }

    pub fn with_policy(policy: Policy) -> Self {
        Self {
            id: next_list_id(),
            size: 0,
            front: None,
            back: None,
            policy,
        }
    }

    #[inline]
    pub fn id(&self) -> ListId {
        self.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn front(&self) -> Option<NodeKey> {
        self.front
    }

    #[inline]
    pub fn back(&self) -> Option<NodeKey> {
        self.back
    }

    #[inline]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: Policy) {
        self.policy = policy;
    }

    /// Consume the list; refused while any record is still linked
    pub fn destroy(self) -> DestroyResult<Self, ListError> {
        if self.size != 0 {
            let err = self.policy.fail(ListError::NonEmptyOnDestroy {
                list: self.id,
                size: self.size,
            });
            return Err(DestroyError::new(err, self));
        }
        trace!(list = %self.id, "list destroyed");
        Ok(())
    }

    #[cold]
    fn fail<T>(&self, err: ListError) -> ListResult<T> {
        Err(self.policy.fail(err))
    }

    /// Verify `key` is linked into this list
    fn check_member<S: NodeStore>(&self, store: &S, key: NodeKey) -> ListResult<()> {
        let Some(node) = store.node(key) else {
            return self.fail(ListError::MissingNode(key));
        };
        if node.link().owner != Some(self.id) {
            return self.fail(ListError::ForeignNode {
                node: key,
                list: self.id,
            });
        }
        Ok(())
    }

    /// Verify `key` is free to be linked
    fn check_unlinked<S: NodeStore>(&self, store: &S, key: NodeKey) -> ListResult<()> {
        let Some(node) = store.node(key) else {
            return self.fail(ListError::MissingNode(key));
        };
        if let Some(owner) = node.link().owner {
            return self.fail(ListError::AlreadyLinked { node: key, owner });
        }
        Ok(())
    }

    pub fn contains<S: NodeStore>(&self, store: &S, key: NodeKey) -> bool {
        store
            .node(key)
            .is_some_and(|node| node.link().owner == Some(self.id))
    }

    /// Key at position `index`, walking from whichever end is closer
    pub fn get<S: NodeStore>(&self, store: &S, index: usize) -> ListResult<NodeKey> {
        if index >= self.size {
            return self.fail(ListError::OutOfBounds {
                index,
                size: self.size,
            });
        }

        let (mut cursor, hops, forward) = if index < self.size / 2 {
            (self.front, index, true)
        } else {
            (self.back, self.size - 1 - index, false)
        };

        for _ in 0..hops {
            let key = cursor.ok_or(ListError::OutOfBounds {
                index,
                size: self.size,
            })?;
            let link = store
                .node(key)
                .map(Linked::link)
                .ok_or(ListError::MissingNode(key))?;
            cursor = if forward { link.next } else { link.prev };
        }

        cursor.ok_or(ListError::OutOfBounds {
            index,
            size: self.size,
        })
    }

    pub fn push_back<S: NodeStore>(&mut self, store: &mut S, key: NodeKey) -> ListResult<()> {
        self.check_unlinked(store, key)?;

        let old_back = self.back;
        *link_of(store, key)? = Link {
            next: None,
            prev: old_back,
            owner: Some(self.id),
        };
        match old_back {
            Some(back) => link_of(store, back)?.next = Some(key),
            None => self.front = Some(key),
        }
        self.back = Some(key);
        self.size += 1;
        Ok(())
    }

    pub fn push_front<S: NodeStore>(&mut self, store: &mut S, key: NodeKey) -> ListResult<()> {
        self.check_unlinked(store, key)?;

        let old_front = self.front;
        *link_of(store, key)? = Link {
            next: old_front,
            prev: None,
            owner: Some(self.id),
        };
        match old_front {
            Some(front) => link_of(store, front)?.prev = Some(key),
            None => self.back = Some(key),
        }
        self.front = Some(key);
        self.size += 1;
        Ok(())
    }

    /// Link `key` immediately after `pivot`
    pub fn insert_next<S: NodeStore>(
        &mut self,
        store: &mut S,
        pivot: NodeKey,
        key: NodeKey,
    ) -> ListResult<()> {
        self.check_member(store, pivot)?;
        if self.back == Some(pivot) {
            return self.push_back(store, key);
        }
        self.check_unlinked(store, key)?;

        let after = link_of(store, pivot)?
            .next
            .ok_or(ListError::MissingNode(pivot))?;
        *link_of(store, key)? = Link {
            next: Some(after),
            prev: Some(pivot),
            owner: Some(self.id),
        };
        link_of(store, pivot)?.next = Some(key);
        link_of(store, after)?.prev = Some(key);
        self.size += 1;
        Ok(())
    }

    /// Link `key` immediately before `pivot`
    pub fn insert_prev<S: NodeStore>(
        &mut self,
        store: &mut S,
        pivot: NodeKey,
        key: NodeKey,
    ) -> ListResult<()> {
        self.check_member(store, pivot)?;
        if self.front == Some(pivot) {
            return self.push_front(store, key);
        }
        self.check_unlinked(store, key)?;

        let before = link_of(store, pivot)?
            .prev
            .ok_or(ListError::MissingNode(pivot))?;
        *link_of(store, key)? = Link {
            next: Some(pivot),
            prev: Some(before),
            owner: Some(self.id),
        };
        link_of(store, pivot)?.prev = Some(key);
        link_of(store, before)?.next = Some(key);
        self.size += 1;
        Ok(())
    }

    /// Unlink a member record; the record itself stays in the store
    pub fn erase<S: NodeStore>(&mut self, store: &mut S, key: NodeKey) -> ListResult<()> {
        self.check_member(store, key)?;

        let Link { next, prev, .. } = std::mem::take(link_of(store, key)?);
        match prev {
            Some(p) => link_of(store, p)?.next = next,
            None => self.front = next,
        }
        match next {
            Some(n) => link_of(store, n)?.prev = prev,
            None => self.back = prev,
        }
        self.size -= 1;
        Ok(())
    }

    /// Unlink the tail; `Ok(None)` only when empty pops are tolerated
    pub fn pop_back<S: NodeStore>(&mut self, store: &mut S) -> ListResult<Option<NodeKey>> {
        match self.back {
            Some(key) => self.erase(store, key).map(|()| Some(key)),
            None => self.empty_pop(),
        }
    }

    /// Unlink the head; `Ok(None)` only when empty pops are tolerated
    pub fn pop_front<S: NodeStore>(&mut self, store: &mut S) -> ListResult<Option<NodeKey>> {
        match self.front {
            Some(key) => self.erase(store, key).map(|()| Some(key)),
            None => self.empty_pop(),
        }
    }

    fn empty_pop(&self) -> ListResult<Option<NodeKey>> {
        if self.policy.tolerate_empty_pop {
            trace!(list = %self.id, "tolerated pop on empty list");
            return Ok(None);
        }
        self.fail(ListError::EmptyPop(self.id))
    }

    /// Unlink every record, front to back; returns how many were unlinked
    pub fn clear<S: NodeStore>(&mut self, store: &mut S) -> ListResult<usize> {
        self.drain_with(store, |_, _| {})
    }

    /// Unlink every record and release it from the store
    pub fn clear_release<S: NodeStore>(&mut self, store: &mut S) -> ListResult<usize> {
        self.drain_with(store, |store, key| {
            store.release(key);
        })
    }

    fn drain_with<S, F>(&mut self, store: &mut S, mut on_unlinked: F) -> ListResult<usize>
    where
        S: NodeStore,
        F: FnMut(&mut S, NodeKey),
    {
        let mut cursor = self.front;
        let mut unlinked = 0;
        while let Some(key) = cursor {
            let link = std::mem::take(link_of(store, key)?);
            cursor = link.next;
            self.front = cursor;
            self.size -= 1;
            unlinked += 1;
            on_unlinked(store, key);
        }
        self.back = None;
        Ok(unlinked)
    }

    /// Successor of a member record
    pub fn next_of<S: NodeStore>(&self, store: &S, key: NodeKey) -> ListResult<Option<NodeKey>> {
        self.check_member(store, key)?;
        Ok(store.node(key).and_then(|node| node.link().next))
    }

    /// Predecessor of a member record
    pub fn prev_of<S: NodeStore>(&self, store: &S, key: NodeKey) -> ListResult<Option<NodeKey>> {
        self.check_member(store, key)?;
        Ok(store.node(key).and_then(|node| node.link().prev))
    }

    /// Records front to back
    pub fn iter<'a, S: NodeStore>(&self, store: &'a S) -> Iter<'a, S> {
        Iter::new(store, self.front, self.size)
    }

    /// Records back to front
    pub fn iter_rev<'a, S: NodeStore>(&self, store: &'a S) -> IterRev<'a, S> {
        IterRev::new(store, self.back, self.size)
    }

    pub fn keys<S: NodeStore>(&self, store: &S) -> Vec<NodeKey> {
        self.iter(store).map(|(key, _)| key).collect()
    }
}

impl Default for IntrusiveList {
    fn default() -> Self {
        Self::new()
    }
}
