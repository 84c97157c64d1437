/*!
 * Core Module
 * Shared identifiers, errors, policy and diagnostic context
 */

pub mod context;
pub mod errors;
pub mod id;
pub mod inline_string;
pub mod limits;
pub mod policy;
pub mod types;

// Re-export for convenience
pub use context::CallSite;
pub use errors::*;
pub use id::{IdGenerator, ListId, PoolId};
pub use inline_string::InlineString;
pub use policy::{FailurePolicy, ParsePolicyError, Policy};
pub use types::*;
