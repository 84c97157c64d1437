/*!
 * Limits and Defaults
 *
 * Centralized location for pool-wide constants, diagnostic placeholders and
 * environment variable names.
 */

// =============================================================================
// ARENA SIZING
// =============================================================================

/// Header slots reserved up front by a new pool
/// [PERF] Small enough that empty pools stay cheap
pub const INITIAL_HEADER_CAPACITY: usize = 16;

/// First generation handed out for a fresh arena slot
/// Generation 0 is reserved so a zeroed key never resolves
pub const FIRST_GENERATION: u32 = 1;

// =============================================================================
// DIAGNOSTIC PLACEHOLDERS
// =============================================================================

/// Rendered in dumps when an allocation or pool has no alias
pub const UNNAMED_ALIAS: &str = "<unnamed>";

/// Rendered when the call site file is unknown
pub const UNKNOWN_FILE: &str = "<unknown file>";

/// Rendered when the call site function is unknown
pub const UNKNOWN_FUNCTION: &str = "<unknown function>";

/// `tracing` target used by the human-readable pool dump
pub const DUMP_TARGET: &str = "tracked_pool::dump";

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// `propagate`, `exit` or `abort`
pub const ENV_FAILURE_POLICY: &str = "POOL_FAILURE_POLICY";

/// `1` or `true` turns popping an empty list into a no-op
pub const ENV_TOLERATE_EMPTY_POP: &str = "POOL_TOLERATE_EMPTY_POP";

/// `1` or `true` switches the demo subscriber to JSON output
pub const ENV_TRACE_JSON: &str = "POOL_TRACE_JSON";

/// Exit status used by [`FailurePolicy::Exit`](crate::core::FailurePolicy::Exit)
pub const FAILURE_EXIT_CODE: i32 = 1;
