//! The request-handling side of the browser: addressable handlers, the
//! registry that routes to them, and the message codec used by the binary.

pub mod commands;
pub mod events;
pub mod helpers;
pub mod registry;

use crate::core::Browser;
use events::BrowserRequest;
use registry::HandlerRegistry;
use serde_json::{json, Value};

/// Decodes one JSON request, dispatches it and encodes the reply.
///
/// A registered handler always yields a JSON array of primitives. Unparseable
/// messages and unknown addresses yield an `{"error": ...}` object instead.
pub fn handle_message<B: Browser>(registry: &HandlerRegistry<B>, message: &str) -> Value {
    let request: BrowserRequest = match serde_json::from_str(message) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Failed to deserialize request: {}", e);
            return json!({ "error": format!("invalid request: {e}") });
        }
    };

    match registry.dispatch(&request) {
        Some(replies) => json!(replies),
        None => json!({ "error": format!("unknown address: {}", request.address) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrowserConfig;
    use crate::core::{MemoryCatalog, MemoryNode};

    fn registry() -> HandlerRegistry<MemoryCatalog> {
        HandlerRegistry::new(
            MemoryCatalog::with_packs(vec![MemoryNode::folder(
                "Keys Pack",
                vec![MemoryNode::item("Grand Piano")],
            )]),
            BrowserConfig::default(),
        )
    }

    #[test]
    fn test_handle_message_returns_reply_array() {
        let reply = handle_message(
            &registry(),
            r#"{"address": "/live/browser/search_and_load", "params": ["piano"]}"#,
        );
        assert_eq!(reply, json!(["Grand Piano"]));
    }

    #[test]
    fn test_handle_message_reports_bad_json() {
        let reply = handle_message(&registry(), "list_packs");
        assert!(reply["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid request"));
    }

    #[test]
    fn test_handle_message_reports_unknown_address() {
        let reply = handle_message(&registry(), r#"{"address": "/live/song/play"}"#);
        assert_eq!(
            reply,
            json!({ "error": "unknown address: /live/song/play" })
        );
    }
}
