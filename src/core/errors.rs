/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::id::ListId;
use crate::list::NodeKey;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// Re-export PoolError from memory module
pub use crate::memory::PoolError;

/// Intrusive list usage errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ListError {
    #[error("Index {index} out of bounds for list of size {size}")]
    #[diagnostic(
        code(list::out_of_bounds),
        help("Valid indices are 0..len(). Check the list size before indexing.")
    )]
    OutOfBounds { index: usize, size: usize },

    #[error("Node {node} already belongs to {owner}")]
    #[diagnostic(
        code(list::already_linked),
        help("A node lives in at most one list. Duplicate the node to use it elsewhere.")
    )]
    AlreadyLinked { node: NodeKey, owner: ListId },

    #[error("Node {node} does not belong to {list}")]
    #[diagnostic(
        code(list::foreign_node),
        help("Erase and pivot operations only accept nodes linked into this list.")
    )]
    ForeignNode { node: NodeKey, list: ListId },

    #[error("Node {0} is not present in the backing store")]
    #[diagnostic(
        code(list::missing_node),
        help("The record was released or the key belongs to a different store.")
    )]
    MissingNode(NodeKey),

    #[error("Cannot pop from empty {0}")]
    #[diagnostic(
        code(list::empty_pop),
        help("Check is_empty() first, or enable tolerate_empty_pop in the policy.")
    )]
    EmptyPop(ListId),

    #[error("{list} still links {size} nodes")]
    #[diagnostic(
        code(list::non_empty_on_destroy),
        help("Erase or clear every node before destroying the list.")
    )]
    NonEmptyOnDestroy { list: ListId, size: usize },
}

/// A rejected teardown: the error plus the untouched value handed back
///
/// Follows the `IntoInnerError` pattern so a refused `destroy` has no side
/// effect other than the diagnostic.
pub struct DestroyError<T, E> {
    error: E,
    value: T,
}

impl<T, E> DestroyError<T, E> {
    pub(crate) fn new(error: E, value: T) -> Self {
        Self { error, value }
    }

    pub fn error(&self) -> &E {
        &self.error
    }

    /// Recover the value whose destruction was refused
    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (E, T) {
        (self.error, self.value)
    }
}

impl<T, E: fmt::Debug> fmt::Debug for DestroyError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestroyError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T, E: fmt::Display> fmt::Display for DestroyError<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "destroy rejected: {}", self.error)
    }
}

impl<T, E> std::error::Error for DestroyError<T, E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
