/*!
 * Call-Site Context
 *
 * Diagnostic metadata attached to every pool and allocation. The pool never
 * interprets it; it only flows into dumps, reports and error logs.
 */

use super::inline_string::InlineString;
use super::limits::{UNKNOWN_FILE, UNKNOWN_FUNCTION, UNNAMED_ALIAS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::Location;

/// Where (and under which alias) a pool or allocation was created
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallSite {
    alias: Option<InlineString>,
    file: InlineString,
    line: u32,
    function: InlineString,
}

impl CallSite {
    /// Build a call site; `file` is reduced to its last path component
    pub fn new<A: AsRef<str>>(alias: Option<A>, file: &str, line: u32, function: &str) -> Self {
        Self {
            alias: alias.map(|a| InlineString::from(a.as_ref())),
            file: InlineString::from(last_component(file)),
            line,
            function: InlineString::from(function),
        }
    }

    /// Capture the caller's file and line
    ///
    /// Rust has no stable "current function" intrinsic, so the function is
    /// left unknown; use [`call_site!`](crate::call_site) to record the module path.
    #[track_caller]
    pub fn here(alias: &str) -> Self {
        let location = Location::caller();
        Self::new(Some(alias), location.file(), location.line(), "")
    }

    /// A call site with no metadata at all
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Replace the alias, keeping the location
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(InlineString::from(alias));
        self
    }

    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(UNNAMED_ALIAS)
    }

    pub fn has_alias(&self) -> bool {
        self.alias.is_some()
    }

    pub fn file(&self) -> &str {
        if self.file.is_empty() {
            UNKNOWN_FILE
        } else {
            self.file.as_str()
        }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn function(&self) -> &str {
        if self.function.is_empty() {
            UNKNOWN_FUNCTION
        } else {
            self.function.as_str()
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' ({}:{} in {})",
            self.alias(),
            self.file(),
            self.line,
            self.function()
        )
    }
}

fn last_component(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Capture a [`CallSite`] for the current file, line and module
///
/// ```
/// use tracked_pool::call_site;
///
/// let site = call_site!("request buffer");
/// assert_eq!(site.alias(), "request buffer");
/// ```
#[macro_export]
macro_rules! call_site {
    () => {
        $crate::core::CallSite::new(None::<&str>, file!(), line!(), module_path!())
    };
    ($alias:expr) => {
        $crate::core::CallSite::new(Some($alias), file!(), line!(), module_path!())
    };
}
