/*!
 * Inline Strings
 * Call-site labels and operation names kept off the heap when short
 */

use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;
use std::ops::Deref;

/// Label stored inline up to 23 bytes
///
/// Aliases, file names and operation names recorded with every allocation
/// are usually short, so recording a call site rarely allocates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InlineString(SmartString);

impl InlineString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the label fits without a heap buffer
    pub fn is_inline(&self) -> bool {
        self.0.is_inline()
    }
}

impl From<&str> for InlineString {
    fn from(label: &str) -> Self {
        Self(SmartString::from(label))
    }
}

impl From<String> for InlineString {
    fn from(label: String) -> Self {
        Self(SmartString::from(label))
    }
}

impl Deref for InlineString {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for InlineString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}
