//! Enumerated request options, serialized to the exact wire strings.

use serde::{Deserialize, Serialize};

/// What the authoring application should do when a create/copy/move
/// target name is already taken.
///
/// `Merge` is only meaningful for object creation; copy and move reject
/// it remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NameConflict {
    Rename,
    Replace,
    #[default]
    Fail,
    Merge,
}

impl NameConflict {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::Replace => "replace",
            Self::Fail => "fail",
            Self::Merge => "merge",
        }
    }
}

/// How a set-inclusions request combines with a sound bank's existing
/// inclusion list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InclusionOperation {
    Add,
    Remove,
    #[default]
    Replace,
}

/// Which parts of an included object a sound bank pulls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InclusionFilter {
    Events,
    Structures,
    Media,
}

impl InclusionFilter {
    /// The default filter: everything.
    pub fn all() -> [Self; 3] {
        [Self::Events, Self::Structures, Self::Media]
    }
}

/// How audio import treats a target object that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ImportOperation {
    CreateNew,
    #[default]
    UseExisting,
    ReplaceExisting,
}
