//! Depth-limited pre-order traversal of a browser subtree.
//!
//! The walk uses an explicit worklist rather than recursion, so pathological
//! catalogs cannot exhaust the call stack.

use super::path::join_path;
use super::{Browser, BrowserNode};
use std::ops::ControlFlow;

enum Step<N> {
    /// Enumerate the children of `node`, which sits at `path` and may still
    /// descend `depth` levels.
    Expand { node: N, path: String, depth: i64 },
    /// Hand `child` to the visitor, then descend into it if it is a folder.
    Visit {
        child: N,
        parent_path: String,
        depth: i64,
    },
}

/// Visits every descendant of `root` down to `max_depth` levels, in pre-order.
///
/// `visit` receives each node together with its canonical path, which starts
/// with the root's own name. Folders are descended into after they have been
/// visited, before their next sibling. A traversal fault truncates only the
/// subtree it was raised in. Returning `ControlFlow::Break` from `visit` stops
/// the whole walk, and the break is passed back to the caller.
///
/// With `max_depth <= 0` the catalog is not touched at all.
pub fn walk<B, F>(browser: &B, root: &B::Node, max_depth: i64, mut visit: F) -> ControlFlow<()>
where
    B: Browser + ?Sized,
    F: FnMut(&B::Node, &str) -> ControlFlow<()>,
{
    if max_depth <= 0 {
        return ControlFlow::Continue(());
    }

    let mut stack = vec![Step::Expand {
        node: root.clone(),
        path: root.name().to_string(),
        depth: max_depth,
    }];

    while let Some(step) = stack.pop() {
        match step {
            Step::Expand { node, path, depth } => match browser.children(&node) {
                Ok(children) => {
                    // Reversed so the first child is popped first.
                    stack.extend(children.into_iter().rev().map(|child| Step::Visit {
                        child,
                        parent_path: path.clone(),
                        depth,
                    }));
                }
                Err(fault) => {
                    tracing::debug!("Error iterating children of {}: {}", path, fault);
                }
            },
            Step::Visit {
                child,
                parent_path,
                depth,
            } => {
                let path = join_path(&parent_path, child.name());
                visit(&child, &path)?;
                if child.is_folder() && depth > 1 {
                    stack.push(Step::Expand {
                        node: child,
                        path,
                        depth: depth - 1,
                    });
                }
            }
        }
    }

    ControlFlow::Continue(())
}
