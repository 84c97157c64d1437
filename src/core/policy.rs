/*!
 * Failure Policy
 *
 * Every usage error (null handle, zero-size request, foreign pointer,
 * non-empty teardown, out-of-bounds index, empty pop) is detected at the
 * point of violation and reported through [`Policy::fail`]. The policy
 * decides whether the caller gets the error back or the process stops next
 * to the bug.
 */

use super::limits::FAILURE_EXIT_CODE;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::error;

/// What happens after a usage error has been logged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Return the error to the caller
    #[default]
    Propagate,
    /// Terminate with [`FAILURE_EXIT_CODE`]
    Exit,
    /// Terminate with `abort()` (core dump friendly)
    Abort,
}

impl FailurePolicy {
    pub const fn is_fatal(self) -> bool {
        !matches!(self, FailurePolicy::Propagate)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Propagate => write!(f, "propagate"),
            FailurePolicy::Exit => write!(f, "exit"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// Error returned when parsing an unknown failure policy name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown failure policy '{0}' (expected propagate, exit or abort)")]
pub struct ParsePolicyError(pub String);

impl FromStr for FailurePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "propagate" | "return" => Ok(FailurePolicy::Propagate),
            "exit" => Ok(FailurePolicy::Exit),
            "abort" => Ok(FailurePolicy::Abort),
            other => Err(ParsePolicyError(other.to_string())),
        }
    }
}

/// Misuse handling shared by lists and pools
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub on_failure: FailurePolicy,
    /// Popping an empty list is a silent no-op instead of an error
    pub tolerate_empty_pop: bool,
}

impl Policy {
    /// Fail fast: log and abort on the first violation
    pub const fn strict() -> Self {
        Self {
            on_failure: FailurePolicy::Abort,
            tolerate_empty_pop: false,
        }
    }

    /// Recoverable errors and empty pops allowed
    pub const fn permissive() -> Self {
        Self {
            on_failure: FailurePolicy::Propagate,
            tolerate_empty_pop: true,
        }
    }

    pub const fn with_failure(mut self, on_failure: FailurePolicy) -> Self {
        self.on_failure = on_failure;
        self
    }

    pub const fn with_empty_pop(mut self, tolerate: bool) -> Self {
        self.tolerate_empty_pop = tolerate;
        self
    }

    /// Emit the diagnostic for `err`, then apply the policy
    ///
    /// Returns the error only under [`FailurePolicy::Propagate`]; the other
    /// policies never return.
    #[cold]
    pub fn fail<E>(&self, err: E) -> E
    where
        E: Diagnostic + fmt::Display,
    {
        let code = err.code().map(|c| c.to_string()).unwrap_or_default();
        let help = err.help().map(|h| h.to_string()).unwrap_or_default();
        error!(
            code = %code,
            help = %help,
            policy = %self.on_failure,
            "{}",
            err
        );

        match self.on_failure {
            FailurePolicy::Propagate => err,
            FailurePolicy::Exit => std::process::exit(FAILURE_EXIT_CODE),
            FailurePolicy::Abort => std::process::abort(),
        }
    }
}
