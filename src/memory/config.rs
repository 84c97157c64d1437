/*!
 * Pool Configuration
 *
 * Construction-time settings for a pool. Nothing here is process-wide: each
 * pool carries its own copy.
 */

use crate::core::limits::{ENV_FAILURE_POLICY, ENV_TOLERATE_EMPTY_POP, INITIAL_HEADER_CAPACITY};
use crate::core::{FailurePolicy, InlineString, Policy};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Misuse handling for the pool and its allocation list
    pub policy: Policy,
    /// Overrides the alias of the creation call site
    pub alias: Option<InlineString>,
    /// Header slots reserved up front
    pub initial_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            alias: None,
            initial_capacity: INITIAL_HEADER_CAPACITY,
        }
    }
}

impl PoolConfig {
    /// Abort on the first usage error
    pub fn strict() -> Self {
        Self {
            policy: Policy::strict(),
            ..Self::default()
        }
    }

    /// Recoverable errors, empty pops tolerated
    pub fn permissive() -> Self {
        Self {
            policy: Policy::permissive(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `POOL_FAILURE_POLICY` and `POOL_TOLERATE_EMPTY_POP`
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ENV_FAILURE_POLICY) {
            match raw.parse::<FailurePolicy>() {
                Ok(on_failure) => config.policy.on_failure = on_failure,
                Err(e) => warn!(var = ENV_FAILURE_POLICY, "{}", e),
            }
        }

        if let Ok(raw) = std::env::var(ENV_TOLERATE_EMPTY_POP) {
            config.policy.tolerate_empty_pop = parse_flag(&raw);
        }

        config
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_failure(mut self, on_failure: FailurePolicy) -> Self {
        self.policy.on_failure = on_failure;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<InlineString>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
