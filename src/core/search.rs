//! Collects and searches loadable items across the browser tree.

use super::walker::walk;
use super::{Browser, BrowserNode, RootKind};
use std::ops::ControlFlow;

/// A single match produced by [`SearchEngine::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// The matched item's bare name.
    pub name: String,
    /// Name of the top-level pack the match was found under.
    pub root_label: String,
    /// Canonical path from the pack to the item.
    pub path: String,
}

impl SearchHit {
    /// Flattens the hit into the `name|root_label|path` wire form.
    pub fn to_wire(&self) -> String {
        format!("{}|{}|{}", self.name, self.root_label, self.path)
    }
}

/// Stateless search operations over a [`Browser`].
///
/// All methods are associated functions; nothing is cached between calls.
pub struct SearchEngine;

impl SearchEngine {
    /// Checks if `name` contains the already-lowercased `query_lower`.
    pub fn matches_query(name: &str, query_lower: &str) -> bool {
        name.to_lowercase().contains(query_lower)
    }

    /// Returns the canonical path of every loadable item under `root`, down to
    /// `max_depth` levels. Paths start with the root's own name.
    pub fn collect_loadable<B: Browser + ?Sized>(
        browser: &B,
        root: &B::Node,
        max_depth: i64,
    ) -> Vec<String> {
        let mut results = Vec::new();
        let _ = walk(browser, root, max_depth, |child, path| {
            if child.is_loadable() {
                results.push(path.to_string());
            }
            ControlFlow::Continue(())
        });
        results
    }

    /// Searches every pack for loadable items whose name contains `query`,
    /// case-insensitively.
    ///
    /// Packs are visited in source order and each is walked depth-first. The
    /// walk stops everywhere as soon as `max_results` hits have been collected.
    pub fn search<B: Browser + ?Sized>(
        browser: &B,
        query: &str,
        max_results: i64,
        max_depth: i64,
    ) -> Vec<SearchHit> {
        let mut results = Vec::new();
        if max_results <= 0 {
            return results;
        }
        let cap = usize::try_from(max_results).unwrap_or(usize::MAX);
        let query_lower = query.to_lowercase();

        let packs = match browser.children(&browser.root(RootKind::Packs)) {
            Ok(packs) => packs,
            Err(fault) => {
                tracing::debug!("Error listing packs for search: {}", fault);
                return results;
            }
        };

        for pack in &packs {
            let flow = walk(browser, pack, max_depth, |child, path| {
                if child.is_loadable() && Self::matches_query(child.name(), &query_lower) {
                    results.push(SearchHit {
                        name: child.name().to_string(),
                        root_label: pack.name().to_string(),
                        path: path.to_string(),
                    });
                    if results.len() >= cap {
                        return ControlFlow::Break(());
                    }
                }
                ControlFlow::Continue(())
            });
            if flow.is_break() {
                break;
            }
        }

        results
    }

    /// Finds the first loadable item whose name contains `query`, walking the
    /// given roots in order. Each root is exhausted before the next one starts.
    pub fn find_first<B: Browser + ?Sized>(
        browser: &B,
        roots: &[B::Node],
        query: &str,
        max_depth: i64,
    ) -> Option<B::Node> {
        let query_lower = query.to_lowercase();
        let mut found = None;

        for root in roots {
            let flow = walk(browser, root, max_depth, |child, _| {
                if child.is_loadable() && Self::matches_query(child.name(), &query_lower) {
                    found = Some(child.clone());
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            });
            if flow.is_break() {
                break;
            }
        }

        found
    }
}
