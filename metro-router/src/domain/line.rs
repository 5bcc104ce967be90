//! Metro line identifier.

use std::fmt;

/// The line a connection runs on (e.g. "Purple", "Green").
///
/// Lines are opaque tags: two connections are on the same line exactly when
/// their identifiers are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Line(String);

impl Line {
    /// Create a line identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Line {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Line {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
