//! Contains the handlers that are addressable through the transport.
//!
//! Each function corresponds to one registered address. Handlers never fail:
//! every error is logged and collapsed into the documented sentinel reply.

use super::events::{Reply, LOAD_FAILED, LOAD_OK};
use super::helpers::{int_param, required_string, with_browser};
use super::registry::HandlerContext;
use crate::core::resolver::find_pack;
use crate::core::{loader, Browser, BrowserError, BrowserNode, RootKind, SearchEngine, SearchHit};
use serde_json::Value;

fn strings(values: impl IntoIterator<Item = String>) -> Vec<Reply> {
    values.into_iter().map(Reply::Str).collect()
}

/// Lists the names of the entries directly under `kind`.
fn list_root<B: Browser>(ctx: &HandlerContext<B>, kind: RootKind) -> Vec<Reply> {
    with_browser(&ctx.browser, |browser| {
        match browser.children(&browser.root(kind)) {
            Ok(entries) => {
                tracing::info!("Found {} entries under {}", entries.len(), kind.label());
                strings(entries.iter().map(|entry| entry.name().to_string()))
            }
            Err(fault) => {
                tracing::error!("Error listing {}: {}", kind.label(), fault);
                Vec::new()
            }
        }
    })
}

/// `list_packs`: names of all installed packs.
pub fn list_packs<B: Browser>(ctx: &HandlerContext<B>, _params: &[Value]) -> Vec<Reply> {
    list_root(ctx, RootKind::Packs)
}

fn collect_pack_contents<B: Browser>(
    ctx: &HandlerContext<B>,
    params: &[Value],
) -> Result<Vec<String>, BrowserError> {
    let pack_name = required_string(params, 0, "pack name")?;
    let max_depth = int_param(params, 1, ctx.config.default_max_depth)?;

    with_browser(&ctx.browser, |browser| {
        let pack = find_pack(&*browser, &pack_name)?;
        let items = SearchEngine::collect_loadable(&*browser, &pack, max_depth);
        tracing::info!(
            "Found {} loadable items in pack '{}'",
            items.len(),
            pack_name
        );
        Ok::<_, BrowserError>(items)
    })
}

/// `list_pack_contents`: canonical paths of the loadable items in a pack.
///
/// Params: pack name, optional max depth.
pub fn list_pack_contents<B: Browser>(ctx: &HandlerContext<B>, params: &[Value]) -> Vec<Reply> {
    match collect_pack_contents(ctx, params) {
        Ok(items) => strings(items),
        Err(e) => {
            tracing::warn!("list_pack_contents failed: {}", e);
            Vec::new()
        }
    }
}

fn run_search<B: Browser>(
    ctx: &HandlerContext<B>,
    params: &[Value],
) -> Result<Vec<SearchHit>, BrowserError> {
    let query = required_string(params, 0, "query string")?;
    let max_results = int_param(params, 1, ctx.config.default_max_results)?;
    let max_depth = int_param(params, 2, ctx.config.default_max_depth)?;

    let hits = with_browser(&ctx.browser, |browser| {
        SearchEngine::search(&*browser, &query, max_results, max_depth)
    });
    tracing::info!("Found {} items matching '{}'", hits.len(), query);
    Ok(hits)
}

/// `search`: `name|pack|path` for every loadable item matching the query.
///
/// Params: query, optional max results, optional max depth.
pub fn search<B: Browser>(ctx: &HandlerContext<B>, params: &[Value]) -> Vec<Reply> {
    match run_search(ctx, params) {
        Ok(hits) => strings(hits.iter().map(SearchHit::to_wire)),
        Err(e) => {
            tracing::warn!("search failed: {}", e);
            Vec::new()
        }
    }
}

/// `load_item`: activates the item at a full `Pack/.../Item` path.
///
/// Replies `1` on success and `-1` on any failure.
pub fn load_item<B: Browser>(ctx: &HandlerContext<B>, params: &[Value]) -> Vec<Reply> {
    let result = required_string(params, 0, "item path").and_then(|path| {
        with_browser(&ctx.browser, |browser| loader::load_item(browser, &path))
    });

    match result {
        Ok(()) => vec![Reply::Int(LOAD_OK)],
        Err(BrowserError::Activation(e)) => {
            tracing::warn!("load_item: host refused activation: {}", e);
            vec![Reply::Int(LOAD_FAILED)]
        }
        Err(e) => {
            tracing::warn!("load_item failed: {}", e);
            vec![Reply::Int(LOAD_FAILED)]
        }
    }
}

/// `search_and_load`: activates the first item matching the query.
///
/// Replies with the item's name, or an empty string when nothing was loaded.
pub fn search_and_load<B: Browser>(ctx: &HandlerContext<B>, params: &[Value]) -> Vec<Reply> {
    let depth = ctx.config.search_and_load_depth;
    let result = required_string(params, 0, "query string").and_then(|query| {
        with_browser(&ctx.browser, |browser| {
            loader::search_and_load(browser, &query, depth)
        })
    });

    match result {
        Ok(name) => vec![Reply::Str(name)],
        Err(e) => {
            tracing::warn!("search_and_load failed: {}", e);
            vec![Reply::from("")]
        }
    }
}

pub fn list_instruments<B: Browser>(ctx: &HandlerContext<B>, _params: &[Value]) -> Vec<Reply> {
    list_root(ctx, RootKind::Instruments)
}

pub fn list_audio_effects<B: Browser>(ctx: &HandlerContext<B>, _params: &[Value]) -> Vec<Reply> {
    list_root(ctx, RootKind::AudioEffects)
}

pub fn list_midi_effects<B: Browser>(ctx: &HandlerContext<B>, _params: &[Value]) -> Vec<Reply> {
    list_root(ctx, RootKind::MidiEffects)
}

pub fn list_drums<B: Browser>(ctx: &HandlerContext<B>, _params: &[Value]) -> Vec<Reply> {
    list_root(ctx, RootKind::Drums)
}

pub fn list_sounds<B: Browser>(ctx: &HandlerContext<B>, _params: &[Value]) -> Vec<Reply> {
    list_root(ctx, RootKind::Sounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrowserConfig;
    use crate::core::{MemoryCatalog, MemoryNode};
    use serde_json::json;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    fn context() -> HandlerContext<MemoryCatalog> {
        let mut catalog = MemoryCatalog::with_packs(vec![MemoryNode::folder(
            "Drums Pack",
            vec![MemoryNode::folder(
                "Kicks",
                vec![MemoryNode::item("808 Kick"), MemoryNode::item("909 Kick")],
            )],
        )]);
        catalog.set_root(
            RootKind::AudioEffects,
            vec![MemoryNode::item("Reverb"), MemoryNode::item("Delay")],
        );
        HandlerContext {
            browser: Mutex::new(catalog),
            config: BrowserConfig::default(),
        }
    }

    fn loaded(ctx: &HandlerContext<MemoryCatalog>) -> Vec<String> {
        ctx.browser.lock().unwrap().loaded().to_vec()
    }

    #[test]
    fn test_list_packs_and_fixed_roots() {
        let ctx = context();
        assert_eq!(list_packs(&ctx, &[]), vec![Reply::from("Drums Pack")]);
        assert_eq!(
            list_audio_effects(&ctx, &[]),
            vec![Reply::from("Reverb"), Reply::from("Delay")]
        );
        assert!(list_sounds(&ctx, &[]).is_empty());
    }

    #[test]
    fn test_list_pack_contents_uses_default_depth() {
        let ctx = context();
        assert_eq!(
            list_pack_contents(&ctx, &[json!("drums")]),
            vec![
                Reply::from("Drums Pack/Kicks/808 Kick"),
                Reply::from("Drums Pack/Kicks/909 Kick"),
            ]
        );
        assert!(list_pack_contents(&ctx, &[json!("Drums Pack"), json!(1)]).is_empty());
    }

    #[test]
    fn test_list_pack_contents_returns_empty_on_bad_input() {
        let ctx = context();
        assert!(list_pack_contents(&ctx, &[]).is_empty());
        assert!(list_pack_contents(&ctx, &[json!("Strings Pack")]).is_empty());
        assert!(list_pack_contents(&ctx, &[json!("Drums Pack"), json!("deep")]).is_empty());
    }

    #[test]
    fn test_search_flattens_hits() {
        let ctx = context();
        assert_eq!(
            search(&ctx, &[json!("kick"), json!(1)]),
            vec![Reply::from("808 Kick|Drums Pack|Drums Pack/Kicks/808 Kick")]
        );
        assert!(search(&ctx, &[]).is_empty());
    }

    #[traced_test]
    #[test]
    fn test_faulty_packs_root_yields_empty_replies() {
        let ctx = context();
        with_browser(&ctx.browser, |catalog| {
            catalog.fault_root(RootKind::Packs, "library index unavailable")
        });

        assert!(list_packs(&ctx, &[]).is_empty());
        assert!(logs_contain("Error listing Packs"));
        assert!(list_pack_contents(&ctx, &[json!("Drums Pack")]).is_empty());
        assert!(search(&ctx, &[json!("kick")]).is_empty());
        assert_eq!(
            search_and_load(&ctx, &[json!("reverb")]),
            vec![Reply::from("Reverb")]
        );
        assert_eq!(loaded(&ctx), vec!["Reverb"]);
    }

    #[test]
    fn test_load_item_replies_with_status_codes() {
        let ctx = context();
        assert_eq!(
            load_item(&ctx, &[json!("Drums Pack/Kicks/808 Kick")]),
            vec![Reply::Int(1)]
        );
        assert_eq!(
            load_item(&ctx, &[json!("Drums Pack/Kicks/Snare")]),
            vec![Reply::Int(-1)]
        );
        assert_eq!(load_item(&ctx, &[json!("Drums Pack/Kicks")]), vec![Reply::Int(-1)]);
        assert_eq!(load_item(&ctx, &[json!("Drums Pack")]), vec![Reply::Int(-1)]);
        assert_eq!(load_item(&ctx, &[]), vec![Reply::Int(-1)]);
        assert_eq!(loaded(&ctx), vec!["808 Kick"]);
    }

    #[test]
    fn test_search_and_load_replies_with_name_or_empty_string() {
        let ctx = context();
        assert_eq!(
            search_and_load(&ctx, &[json!("delay")]),
            vec![Reply::from("Delay")]
        );
        assert_eq!(search_and_load(&ctx, &[json!("cowbell")]), vec![Reply::from("")]);
        assert_eq!(search_and_load(&ctx, &[]), vec![Reply::from("")]);
        assert_eq!(loaded(&ctx), vec!["Delay"]);
    }
}
