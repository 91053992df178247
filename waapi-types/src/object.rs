//! Object identity: bracketed guids and guid-or-path references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length of a bracketed guid string: `{8-4-4-4-12}` hex plus braces.
pub const GUID_LEN: usize = 38;

/// Unique identifier of an object in the authoring application's project
/// tree, e.g. `{6F6DB9AE-4B81-4CA0-B2C7-9B6410BE3F26}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Guid(String);

impl Guid {
    /// Wrap a string that is already known to be a guid (e.g. one returned
    /// by the authoring application). No validation is performed.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse and validate a bracketed guid string.
    pub fn parse(s: &str) -> Option<Self> {
        if !Self::is_valid(s) {
            return None;
        }
        Some(Self(s.to_string()))
    }

    /// Check whether a string has the bracketed guid shape.
    pub fn is_valid(s: &str) -> bool {
        if s.len() != GUID_LEN || !s.starts_with('{') || !s.ends_with('}') {
            return false;
        }
        let inner = &s[1..s.len() - 1];
        inner.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference to an object, either by guid or by hierarchical path.
///
/// Paths are backslash-delimited and begin with a backslash
/// (`\Actor-Mixer Hierarchy\Default Work Unit`); anything else is taken
/// to be a guid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectRef {
    Guid(Guid),
    Path(String),
}

impl ObjectRef {
    pub fn parse(s: &str) -> Self {
        if s.starts_with('\\') {
            Self::Path(s.to_string())
        } else {
            Self::Guid(Guid::new(s))
        }
    }

    /// Key under which this reference goes in a query's `from` clause.
    pub fn from_key(&self) -> &'static str {
        match self {
            Self::Guid(_) => "id",
            Self::Path(_) => "path",
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Guid(g) => g.as_str(),
            Self::Path(p) => p,
        }
    }
}

impl From<&str> for ObjectRef {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<&Guid> for ObjectRef {
    fn from(g: &Guid) -> Self {
        Self::Guid(g.clone())
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
