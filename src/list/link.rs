/*!
 * Embedded Links
 * Per-record linkage fields and the generic payload node
 */

use super::arena::NodeKey;
use crate::core::ListId;

/// Link fields embedded in every list record
///
/// `owner` is `None` exactly when the record is in no list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Link {
    pub(crate) next: Option<NodeKey>,
    pub(crate) prev: Option<NodeKey>,
    pub(crate) owner: Option<ListId>,
}

impl Link {
    pub const fn unlinked() -> Self {
        Self {
            next: None,
            prev: None,
            owner: None,
        }
    }

    #[inline]
    pub fn next(&self) -> Option<NodeKey> {
        self.next
    }

    #[inline]
    pub fn prev(&self) -> Option<NodeKey> {
        self.prev
    }

    #[inline]
    pub fn owner(&self) -> Option<ListId> {
        self.owner
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.owner.is_some()
    }
}

/// A record carrying an embedded [`Link`]
pub trait Linked {
    fn link(&self) -> &Link;
    fn link_mut(&mut self) -> &mut Link;
}

/// Generic list record: a payload plus its link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    link: Link,
    value: T,
}

impl<T> Node<T> {
    pub const fn new(value: T) -> Self {
        Self {
            link: Link::unlinked(),
            value,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> Linked for Node<T> {
    #[inline]
    fn link(&self) -> &Link {
        &self.link
    }

    #[inline]
    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }
}
