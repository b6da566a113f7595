use std::sync::Once;

use crate::core::{MemoryCatalog, MemoryNode, RootKind};

static LOGGING_INIT: Once = Once::new();

/// Initializes the tracing subscriber for tests.
///
/// This function is wrapped in a `Once` block to ensure that the global
/// subscriber is set exactly one time, even when tests are run in parallel.
/// Unit tests that assert on log output use `tracing_test` instead and must
/// not call this.
pub fn setup_test_logging() {
    LOGGING_INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok(); // Ignore the error if another subscriber is already set.
    });
}

/// A small catalog with two packs and a few entries under the fixed roots.
///
/// ```text
/// Drums Pack/Kicks/{808 Kick, 909 Kick}
/// Drums Pack/Snares/Tight Snare
/// Drums Pack/Broken/...            (enumeration fails)
/// Keys Pack/Grand Piano
/// Keys Pack/Electric/Rhodes Kick   (deep enough to need depth 2)
/// Instruments: Operator (+ Operator Bass), Wavetable
/// Audio Effects: Reverb, Delay
/// MIDI Effects: Arpeggiator
/// Drums: Drum Rack
/// Sounds: Warm Pad
/// ```
pub fn sample_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::with_packs(vec![
        MemoryNode::folder(
            "Drums Pack",
            vec![
                MemoryNode::folder(
                    "Kicks",
                    vec![MemoryNode::item("808 Kick"), MemoryNode::item("909 Kick")],
                ),
                MemoryNode::folder("Snares", vec![MemoryNode::item("Tight Snare")]),
                MemoryNode::folder("Broken", vec![MemoryNode::item("Lost Kick")])
                    .with_fault("content library offline"),
            ],
        ),
        MemoryNode::folder(
            "Keys Pack",
            vec![
                MemoryNode::item("Grand Piano"),
                MemoryNode::folder("Electric", vec![MemoryNode::item("Rhodes Kick")]),
            ],
        ),
    ]);
    catalog.set_root(
        RootKind::Instruments,
        vec![
            MemoryNode::loadable_folder("Operator", vec![MemoryNode::item("Operator Bass")]),
            MemoryNode::item("Wavetable"),
        ],
    );
    catalog.set_root(
        RootKind::AudioEffects,
        vec![MemoryNode::item("Reverb"), MemoryNode::item("Delay")],
    );
    catalog.set_root(RootKind::MidiEffects, vec![MemoryNode::item("Arpeggiator")]);
    catalog.set_root(RootKind::Drums, vec![MemoryNode::item("Drum Rack")]);
    catalog.set_root(RootKind::Sounds, vec![MemoryNode::item("Warm Pad")]);
    catalog
}
