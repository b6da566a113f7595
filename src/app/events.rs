//! Defines the request and reply structures exchanged with the transport.

use serde::{Deserialize, Serialize};

/// A request received from the transport.
///
/// Parameters are untyped; each handler coerces the positions it reads.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct BrowserRequest {
    /// The address of the handler to invoke, e.g. `/live/browser/search`.
    pub address: String,
    /// Positional parameters, in the order the handler documents them.
    #[serde(default)]
    pub params: Vec<serde_json::Value>,
}

impl BrowserRequest {
    pub fn new(address: impl Into<String>, params: Vec<serde_json::Value>) -> Self {
        Self {
            address: address.into(),
            params,
        }
    }
}

/// A single primitive value in a reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Reply {
    Int(i64),
    Str(String),
}

impl From<String> for Reply {
    fn from(value: String) -> Self {
        Reply::Str(value)
    }
}

impl From<&str> for Reply {
    fn from(value: &str) -> Self {
        Reply::Str(value.to_string())
    }
}

impl From<i64> for Reply {
    fn from(value: i64) -> Self {
        Reply::Int(value)
    }
}

/// Reply for a successful `load_item`.
pub const LOAD_OK: i64 = 1;
/// Reply for any failed `load_item`.
pub const LOAD_FAILED: i64 = -1;
