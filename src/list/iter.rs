/*!
 * List Iterators
 * Walk an intrusive list through its store, in either direction
 */

use super::arena::{NodeKey, NodeStore};
use super::link::Linked;
use std::iter::FusedIterator;

/// Front-to-back walk yielding `(key, record)`
pub struct Iter<'a, S: NodeStore> {
    store: &'a S,
    cursor: Option<NodeKey>,
    remaining: usize,
}

/// Back-to-front walk yielding `(key, record)`
pub struct IterRev<'a, S: NodeStore> {
    store: &'a S,
    cursor: Option<NodeKey>,
    remaining: usize,
}

impl<'a, S: NodeStore> Iter<'a, S> {
    pub(super) fn new(store: &'a S, start: Option<NodeKey>, len: usize) -> Self {
        Self {
            store,
            cursor: start,
            remaining: len,
        }
    }
}

impl<'a, S: NodeStore> IterRev<'a, S> {
    pub(super) fn new(store: &'a S, start: Option<NodeKey>, len: usize) -> Self {
        Self {
            store,
            cursor: start,
            remaining: len,
        }
    }
}

impl<'a, S: NodeStore> Iterator for Iter<'a, S> {
    type Item = (NodeKey, &'a S::Node);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = self.store.node(key)?;
        self.cursor = node.link().next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((key, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, S: NodeStore> Iterator for IterRev<'a, S> {
    type Item = (NodeKey, &'a S::Node);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = self.store.node(key)?;
        self.cursor = node.link().prev;
        self.remaining = self.remaining.saturating_sub(1);
        Some((key, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: NodeStore> ExactSizeIterator for Iter<'_, S> {}
impl<S: NodeStore> ExactSizeIterator for IterRev<'_, S> {}
impl<S: NodeStore> FusedIterator for Iter<'_, S> {}
impl<S: NodeStore> FusedIterator for IterRev<'_, S> {}
