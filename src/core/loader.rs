//! Activates catalog items in the host.

use super::resolver::resolve_path;
use super::search::SearchEngine;
use super::{Browser, BrowserError, BrowserNode, RootKind};

/// Resolves `path` and activates the node it names.
///
/// Activation is not deduplicated: loading the same path twice activates the
/// item twice.
pub fn load_item<B: Browser + ?Sized>(browser: &mut B, path: &str) -> Result<(), BrowserError> {
    let node = resolve_path(&*browser, path)?;
    if !node.is_loadable() {
        return Err(BrowserError::NotLoadable(path.to_string()));
    }

    browser.load_item(&node)?;
    tracing::info!("Loaded item: {}", path);
    Ok(())
}

/// Activates the first loadable item whose name contains `query`.
///
/// Packs are searched first, each one exhausted before the next; only if none
/// of them matches are the fixed roots searched, in [`RootKind::FIXED`] order.
/// Returns the name of the activated item.
pub fn search_and_load<B: Browser + ?Sized>(
    browser: &mut B,
    query: &str,
    max_depth: i64,
) -> Result<String, BrowserError> {
    if query.is_empty() {
        return Err(BrowserError::InvalidInput(
            "search_and_load requires a non-empty query".to_string(),
        ));
    }

    let found = {
        let browser = &*browser;
        let packs = browser
            .children(&browser.root(RootKind::Packs))
            .unwrap_or_else(|fault| {
                tracing::debug!("Error listing packs: {}", fault);
                Vec::new()
            });

        SearchEngine::find_first(browser, &packs, query, max_depth).or_else(|| {
            let fixed_roots: Vec<B::Node> =
                RootKind::FIXED.iter().map(|kind| browser.root(*kind)).collect();
            SearchEngine::find_first(browser, &fixed_roots, query, max_depth)
        })
    };

    let node = found.ok_or_else(|| BrowserError::NotFound(format!("no item matching '{query}'")))?;
    browser.load_item(&node)?;
    tracing::info!("Found and loaded: {}", node.name());
    Ok(node.name().to_string())
}
