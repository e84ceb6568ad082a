/*!
 * Core Types
 * Common types used across the allocator
 */

use crate::memory::{MemoryError, MemoryResult};
use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// Address type for memory operations
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Process identifier owning an allocated range
///
/// Short ids (≤23 bytes) are stored inline without heap allocation, which
/// covers every id the command surface realistically produces (`P1`, `p9`, ...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProcessId {
    inner: SmartString,
}

impl ProcessId {
    /// Create a process id, rejecting empty ids and ids containing whitespace
    ///
    /// Whitespace would make the id impossible to address from the
    /// line-oriented command protocol.
    pub fn new(id: &str) -> MemoryResult<Self> {
        if id.is_empty() || id.chars().any(char::is_whitespace) {
            return Err(MemoryError::InvalidProcessId(id.to_string()));
        }
        Ok(Self {
            inner: SmartString::from(id),
        })
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }

    /// Check if the id is stored inline (no heap allocation)
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.inner.is_inline()
    }
}

impl TryFrom<&str> for ProcessId {
    type Error = MemoryError;

    fn try_from(id: &str) -> MemoryResult<Self> {
        Self::new(id)
    }
}

impl TryFrom<String> for ProcessId {
    type Error = MemoryError;

    fn try_from(id: String) -> MemoryResult<Self> {
        Self::new(&id)
    }
}

impl From<ProcessId> for String {
    #[inline]
    fn from(id: ProcessId) -> Self {
        id.inner.into()
    }
}

impl AsRef<str> for ProcessId {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::borrow::Borrow<str> for ProcessId {
    #[inline(always)]
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
