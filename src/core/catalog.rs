//! An in-process catalog that implements [`Browser`] over an owned tree.
//!
//! Used by the binary to serve a catalog loaded from a JSON file, and by the
//! tests as a host with controllable faults.

use super::{ActivationError, Browser, BrowserNode, RootKind, TraversalFault};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// One entry of a JSON catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub loadable: bool,
    /// Defaults to `true` when the entry has children.
    #[serde(default)]
    pub folder: Option<bool>,
    #[serde(default)]
    pub children: Vec<CatalogEntry>,
    /// When set, enumerating this entry's children fails with this reason.
    #[serde(default)]
    pub fault: Option<String>,
}

/// The serialized form of a whole catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogDocument {
    #[serde(default)]
    pub packs: Vec<CatalogEntry>,
    #[serde(default)]
    pub instruments: Vec<CatalogEntry>,
    #[serde(default)]
    pub audio_effects: Vec<CatalogEntry>,
    #[serde(default)]
    pub midi_effects: Vec<CatalogEntry>,
    #[serde(default)]
    pub drums: Vec<CatalogEntry>,
    #[serde(default)]
    pub sounds: Vec<CatalogEntry>,
}

#[derive(Debug)]
struct NodeData {
    name: String,
    loadable: bool,
    folder: bool,
    children: Vec<MemoryNode>,
    fault: Option<String>,
}

/// A cheaply clonable handle to a node of a [`MemoryCatalog`].
#[derive(Debug, Clone)]
pub struct MemoryNode {
    data: Arc<NodeData>,
}

impl MemoryNode {
    fn new(name: &str, loadable: bool, folder: bool, children: Vec<MemoryNode>) -> Self {
        Self {
            data: Arc::new(NodeData {
                name: name.to_string(),
                loadable,
                folder,
                children,
                fault: None,
            }),
        }
    }

    /// A loadable leaf.
    pub fn item(name: &str) -> Self {
        Self::new(name, true, false, Vec::new())
    }

    /// A non-loadable folder.
    pub fn folder(name: &str, children: Vec<MemoryNode>) -> Self {
        Self::new(name, false, true, children)
    }

    /// A node that is both loadable and browsable (e.g. a device with presets).
    pub fn loadable_folder(name: &str, children: Vec<MemoryNode>) -> Self {
        Self::new(name, true, true, children)
    }

    /// Makes enumerating this node's children fail with `reason`.
    pub fn with_fault(self, reason: &str) -> Self {
        let data = &self.data;
        Self {
            data: Arc::new(NodeData {
                name: data.name.clone(),
                loadable: data.loadable,
                folder: data.folder,
                children: data.children.clone(),
                fault: Some(reason.to_string()),
            }),
        }
    }

    fn from_entry(entry: CatalogEntry) -> Self {
        let folder = entry.folder.unwrap_or(!entry.children.is_empty());
        let children = entry.children.into_iter().map(Self::from_entry).collect();
        Self {
            data: Arc::new(NodeData {
                name: entry.name,
                loadable: entry.loadable,
                folder,
                children,
                fault: entry.fault,
            }),
        }
    }
}

impl BrowserNode for MemoryNode {
    fn name(&self) -> &str {
        &self.data.name
    }

    fn is_loadable(&self) -> bool {
        self.data.loadable
    }

    fn is_folder(&self) -> bool {
        self.data.folder
    }
}

/// A catalog held entirely in memory.
///
/// Activations are recorded in order so that callers can observe the side
/// effect of `load_item`.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    packs: MemoryNode,
    instruments: MemoryNode,
    audio_effects: MemoryNode,
    midi_effects: MemoryNode,
    drums: MemoryNode,
    sounds: MemoryNode,
    loaded: Vec<String>,
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::from_document(CatalogDocument::default())
    }
}

impl MemoryCatalog {
    /// Creates a catalog with the given packs and empty fixed roots.
    pub fn with_packs(packs: Vec<MemoryNode>) -> Self {
        let mut catalog = Self::default();
        catalog.packs = MemoryNode::folder(RootKind::Packs.label(), packs);
        catalog
    }

    fn root_mut(&mut self, kind: RootKind) -> &mut MemoryNode {
        match kind {
            RootKind::Packs => &mut self.packs,
            RootKind::Instruments => &mut self.instruments,
            RootKind::AudioEffects => &mut self.audio_effects,
            RootKind::MidiEffects => &mut self.midi_effects,
            RootKind::Drums => &mut self.drums,
            RootKind::Sounds => &mut self.sounds,
        }
    }

    /// Replaces the entries under one of the top-level roots.
    pub fn set_root(&mut self, kind: RootKind, entries: Vec<MemoryNode>) {
        *self.root_mut(kind) = MemoryNode::folder(kind.label(), entries);
    }

    /// Makes enumerating the top-level root `kind` itself fail with `reason`.
    pub fn fault_root(&mut self, kind: RootKind, reason: &str) {
        let root = self.root_mut(kind);
        *root = root.clone().with_fault(reason);
    }

    pub fn from_document(document: CatalogDocument) -> Self {
        let root = |kind: RootKind, entries: Vec<CatalogEntry>| {
            MemoryNode::folder(
                kind.label(),
                entries.into_iter().map(MemoryNode::from_entry).collect(),
            )
        };

        Self {
            packs: root(RootKind::Packs, document.packs),
            instruments: root(RootKind::Instruments, document.instruments),
            audio_effects: root(RootKind::AudioEffects, document.audio_effects),
            midi_effects: root(RootKind::MidiEffects, document.midi_effects),
            drums: root(RootKind::Drums, document.drums),
            sounds: root(RootKind::Sounds, document.sounds),
            loaded: Vec::new(),
        }
    }

    /// Reads a catalog from a JSON file shaped like [`CatalogDocument`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {path:?}"))?;
        let document: CatalogDocument = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file {path:?}"))?;
        tracing::info!(
            "Loaded catalog from {:?} ({} packs)",
            path,
            document.packs.len()
        );
        Ok(Self::from_document(document))
    }

    /// Names of activated items, oldest first.
    pub fn loaded(&self) -> &[String] {
        &self.loaded
    }
}

impl Browser for MemoryCatalog {
    type Node = MemoryNode;

    fn root(&self, kind: RootKind) -> MemoryNode {
        match kind {
            RootKind::Packs => self.packs.clone(),
            RootKind::Instruments => self.instruments.clone(),
            RootKind::AudioEffects => self.audio_effects.clone(),
            RootKind::MidiEffects => self.midi_effects.clone(),
            RootKind::Drums => self.drums.clone(),
            RootKind::Sounds => self.sounds.clone(),
        }
    }

    fn children(&self, node: &MemoryNode) -> Result<Vec<MemoryNode>, TraversalFault> {
        match &node.data.fault {
            Some(reason) => Err(TraversalFault {
                node: node.data.name.clone(),
                reason: reason.clone(),
            }),
            None => Ok(node.data.children.clone()),
        }
    }

    fn load_item(&mut self, node: &MemoryNode) -> Result<(), ActivationError> {
        if !node.is_loadable() {
            return Err(ActivationError::Rejected {
                item: node.name().to_string(),
                reason: "item is not loadable".to_string(),
            });
        }
        self.loaded.push(node.name().to_string());
        Ok(())
    }
}
