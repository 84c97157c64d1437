/*!
 * Core Types
 * Common types used across the pool and list subsystems
 */

/// Size type for allocation requests
pub type Size = usize;

/// Result type for intrusive list operations
pub type ListResult<T> = Result<T, super::errors::ListError>;

/// Result type for consuming teardown (`destroy`) operations
pub type DestroyResult<T, E> = Result<(), super::errors::DestroyError<T, E>>;
