//! # waapi-types
//!
//! Shared type definitions for the waapi-helpers ecosystem: object
//! identifiers, path/guid references, and the enumerated options that
//! appear verbatim on the wire.

pub mod object;
pub mod options;

pub use object::{Guid, ObjectRef};
pub use options::{ImportOperation, InclusionFilter, InclusionOperation, NameConflict};

/// A value inside a request or response body.
///
/// Requests and responses are nested key/value structures mirroring a
/// JSON wire format; helpers treat them as opaque except for a small set
/// of expected keys.
pub type WaapiValue = serde_json::Value;
