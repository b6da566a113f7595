//! Maps transport addresses to command handlers.

use super::commands;
use super::events::{BrowserRequest, Reply};
use crate::config::BrowserConfig;
use crate::core::Browser;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Everything a handler may touch while answering one request.
pub struct HandlerContext<B> {
    /// The host catalog. Every query holds this lock for its whole duration.
    pub browser: Mutex<B>,
    pub config: BrowserConfig,
}

/// A command handler. Handlers always produce a reply.
pub type Handler<B> = fn(&HandlerContext<B>, &[Value]) -> Vec<Reply>;

/// Every handler with the name its address ends in, in registration order.
pub fn handler_table<B: Browser>() -> [(&'static str, Handler<B>); 10] {
    [
        ("list_packs", commands::list_packs::<B>),
        ("list_pack_contents", commands::list_pack_contents::<B>),
        ("search", commands::search::<B>),
        ("load_item", commands::load_item::<B>),
        ("search_and_load", commands::search_and_load::<B>),
        ("list_instruments", commands::list_instruments::<B>),
        ("list_audio_effects", commands::list_audio_effects::<B>),
        ("list_midi_effects", commands::list_midi_effects::<B>),
        ("list_drums", commands::list_drums::<B>),
        ("list_sounds", commands::list_sounds::<B>),
    ]
}

/// Routes requests to handlers by address.
///
/// Built once per process around the browser it serves; there is no global
/// catalog reference.
pub struct HandlerRegistry<B: Browser> {
    context: HandlerContext<B>,
    handlers: HashMap<String, Handler<B>>,
}

impl<B: Browser> HandlerRegistry<B> {
    pub fn new(browser: B, config: BrowserConfig) -> Self {
        let handlers = handler_table::<B>()
            .into_iter()
            .map(|(name, handler)| (config.address(name), handler))
            .collect();

        Self {
            context: HandlerContext {
                browser: Mutex::new(browser),
                config,
            },
            handlers,
        }
    }

    /// Answers `request`, or returns `None` if its address is not registered.
    pub fn dispatch(&self, request: &BrowserRequest) -> Option<Vec<Reply>> {
        let Some(handler) = self.handlers.get(&request.address) else {
            tracing::warn!("No handler registered for address: {}", request.address);
            return None;
        };
        tracing::debug!(
            "Dispatching {} with {} params",
            request.address,
            request.params.len()
        );
        Some(handler(&self.context, &request.params))
    }

    /// Registered addresses, sorted.
    pub fn addresses(&self) -> Vec<&str> {
        let mut addresses: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        addresses.sort_unstable();
        addresses
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.context.config
    }

    /// Runs `f` with exclusive access to the underlying browser.
    pub fn with_browser<T>(&self, f: impl FnOnce(&mut B) -> T) -> T {
        super::helpers::with_browser(&self.context.browser, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MemoryCatalog, MemoryNode};
    use serde_json::json;

    fn registry() -> HandlerRegistry<MemoryCatalog> {
        let catalog = MemoryCatalog::with_packs(vec![MemoryNode::folder(
            "Drums Pack",
            vec![MemoryNode::item("808 Kick")],
        )]);
        HandlerRegistry::new(catalog, BrowserConfig::default())
    }

    #[test]
    fn test_registers_every_handler_under_prefix() {
        let registry = registry();
        let addresses = registry.addresses();
        let table = handler_table::<MemoryCatalog>();
        assert_eq!(addresses.len(), table.len());
        for (name, _) in table {
            assert!(addresses.contains(&format!("/live/browser/{name}").as_str()));
        }
    }

    #[test]
    fn test_dispatch_routes_by_address() {
        let registry = registry();
        let reply = registry
            .dispatch(&BrowserRequest::new(
                "/live/browser/load_item",
                vec![json!("Drums Pack/808 Kick")],
            ))
            .unwrap();
        assert_eq!(reply, vec![Reply::Int(1)]);
        registry.with_browser(|catalog| assert_eq!(catalog.loaded(), ["808 Kick"]));
    }

    #[test]
    fn test_dispatch_unknown_address_returns_none() {
        let registry = registry();
        assert!(registry
            .dispatch(&BrowserRequest::new("/live/browser/delete_everything", vec![]))
            .is_none());
    }

    #[test]
    fn test_custom_prefix_changes_addresses() {
        let config = BrowserConfig {
            address_prefix: "/catalog".to_string(),
            ..Default::default()
        };
        let registry = HandlerRegistry::new(MemoryCatalog::default(), config);
        assert!(registry
            .dispatch(&BrowserRequest::new("/catalog/list_packs", vec![]))
            .is_some());
        assert!(registry
            .dispatch(&BrowserRequest::new("/live/browser/list_packs", vec![]))
            .is_none());
    }
}
