//! Request/response envelope for remote procedure calls.
//!
//! Every call carries a client-assigned id, the endpoint URI, an `args`
//! body and an `options` body; the response echoes the id and carries
//! either a `result` or an `error`.

use serde::{Deserialize, Serialize};

use waapi_types::WaapiValue;

/// A single remote procedure call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub id: u64,
    pub uri: String,
    #[serde(default)]
    pub args: WaapiValue,
    #[serde(default, skip_serializing_if = "WaapiValue::is_null")]
    pub options: WaapiValue,
}

/// The response to an [`RpcRequest`], matched by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<WaapiValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// A remote failure reported by the authoring application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub message: String,
}

impl RpcResponse {
    pub fn success(id: u64, result: WaapiValue) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(RpcError {
                message: message.into(),
            }),
        }
    }
}
