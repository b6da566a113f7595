//! Resolves names and slash-delimited paths to browser nodes.
//!
//! Every lookup uses the same rule: an exact name match wins; only if no
//! sibling matches exactly is the first sibling whose name contains the
//! segment (case-insensitively) accepted. The fallback is order-dependent when
//! several siblings contain the segment.

use super::path::split_path;
use super::{Browser, BrowserError, BrowserNode, RootKind};

/// Picks the entry named `segment` from `entries` using exact-then-contains.
pub fn find_entry<'a, N: BrowserNode>(entries: &'a [N], segment: &str) -> Option<&'a N> {
    if let Some(exact) = entries.iter().find(|entry| entry.name() == segment) {
        return Some(exact);
    }

    let segment_lower = segment.to_lowercase();
    let fallback = entries
        .iter()
        .find(|entry| entry.name().to_lowercase().contains(&segment_lower));
    if let Some(entry) = fallback {
        tracing::debug!(
            "No exact match for '{}', using '{}' by containment",
            segment,
            entry.name()
        );
    }
    fallback
}

/// Finds a pack by name among the top-level pack entries.
pub fn find_pack<B: Browser + ?Sized>(browser: &B, pack_name: &str) -> Result<B::Node, BrowserError> {
    let packs = browser
        .children(&browser.root(RootKind::Packs))
        .map_err(|fault| BrowserError::NotFound(format!("pack '{pack_name}' ({fault})")))?;

    find_entry(&packs, pack_name)
        .cloned()
        .ok_or_else(|| BrowserError::NotFound(format!("pack '{pack_name}'")))
}

/// Resolves a `Pack/Folder/.../Item` path to the node it names.
///
/// Fails with `InvalidInput` when the path does not name a pack and at least
/// one segment beneath it, and with `NotFound` when any segment cannot be
/// resolved or a traversal fault interrupts the lookup.
pub fn resolve_path<B: Browser + ?Sized>(browser: &B, path: &str) -> Result<B::Node, BrowserError> {
    let (pack_name, segments) = split_path(path)
        .ok_or_else(|| BrowserError::InvalidInput(format!("invalid path format: '{path}'")))?;

    let mut current = find_pack(browser, pack_name)?;

    for segment in segments {
        let children = browser.children(&current).map_err(|fault| {
            BrowserError::NotFound(format!("error navigating path '{path}': {fault}"))
        })?;

        current = find_entry(&children, segment).cloned().ok_or_else(|| {
            BrowserError::NotFound(format!("path component '{segment}' (in '{path}')"))
        })?;
    }

    Ok(current)
}
