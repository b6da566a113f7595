//! Search and navigation over the host's browser catalog.
//!
//! The catalog itself belongs to the host. Everything in this module reaches it
//! through the [`Browser`] capability, walks it on demand and keeps no state
//! between calls.

pub mod catalog;
pub mod error;
pub mod loader;
pub mod path;
pub mod resolver;
pub mod search;
pub mod walker;

/// A node of the browser tree as seen through the [`Browser`] adapter.
///
/// `is_loadable` and `is_folder` are independent flags; a node may be both.
pub trait BrowserNode: Clone {
    fn name(&self) -> &str;
    fn is_loadable(&self) -> bool;
    fn is_folder(&self) -> bool;
}

/// The top-level entry points of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootKind {
    Packs,
    Instruments,
    AudioEffects,
    MidiEffects,
    Drums,
    Sounds,
}

impl RootKind {
    /// The fixed roots, in the order `search_and_load` visits them after the packs.
    pub const FIXED: [RootKind; 5] = [
        RootKind::Instruments,
        RootKind::AudioEffects,
        RootKind::MidiEffects,
        RootKind::Drums,
        RootKind::Sounds,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RootKind::Packs => "Packs",
            RootKind::Instruments => "Instruments",
            RootKind::AudioEffects => "Audio Effects",
            RootKind::MidiEffects => "MIDI Effects",
            RootKind::Drums => "Drums",
            RootKind::Sounds => "Sounds",
        }
    }
}

/// Capability interface over the host catalog.
///
/// Implementations supply child nodes in source order and perform activation.
/// Enumeration failures are reported as [`TraversalFault`] so that callers can
/// truncate the affected subtree and keep going.
pub trait Browser {
    type Node: BrowserNode;

    /// Returns the root node for one of the top-level entry points.
    fn root(&self, kind: RootKind) -> Self::Node;

    /// Enumerates the children of `node`, in the order the host supplies them.
    fn children(&self, node: &Self::Node) -> Result<Vec<Self::Node>, TraversalFault>;

    /// Activates `node` in the host (e.g. inserts a device). Not retried.
    fn load_item(&mut self, node: &Self::Node) -> Result<(), ActivationError>;
}

pub use catalog::{CatalogDocument, CatalogEntry, MemoryCatalog, MemoryNode};
pub use error::{ActivationError, BrowserError, TraversalFault};
pub use search::{SearchEngine, SearchHit};
