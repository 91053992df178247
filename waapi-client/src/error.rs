//! Error type for client calls and helper preconditions.

use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, WaapiError>;

#[derive(Debug)]
pub enum WaapiError {
    /// Transport failure; the client is marked disconnected afterwards.
    Io(io::Error),
    /// A frame that did not decode as the expected envelope.
    Json(serde_json::Error),
    /// The authoring application rejected the call.
    Rpc { uri: String, message: String },
    /// The client is not connected (or was never connected).
    Disconnected,
    /// A precondition on helper arguments was violated.
    InvalidArgument(String),
}

impl From<io::Error> for WaapiError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for WaapiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl fmt::Display for WaapiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
            Self::Rpc { uri, message } => write!(f, "remote error from {}: {}", uri, message),
            Self::Disconnected => write!(f, "client is not connected"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for WaapiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}
