//! Test utilities and fixtures for Ember development.
//!
//! Provides ready-made effect definitions for common test shapes and
//! mock [`RenderSink`] implementations for asserting on the render
//! stream.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use ember_core::{BindType, NodeKind, RenderRecord, RenderSink};
use ember_effect::{Effect, EffectBuilder, EffectNode, EmissionSchedule};

/// A root-only effect bursting `count` instances at time zero.
///
/// The root kind is never rendered, so this shape exercises lifecycle
/// and counting without producing render records.
pub fn burst_effect(count: u32, lifetime: f32, removal_duration: f32) -> Arc<Effect> {
    let mut builder = EffectBuilder::new("burst");
    let mut root = EffectNode::new("root", NodeKind::Root);
    root.emission = EmissionSchedule::burst(count);
    root.lifetime = lifetime;
    root.removal_duration = removal_duration;
    builder.node(root);
    Arc::new(builder.build().unwrap())
}

/// A two-level effect: a long-lived root spawning `count` sprites at
/// time zero.
pub fn sprite_burst_effect(count: u32, lifetime: f32, removal_duration: f32) -> Arc<Effect> {
    let mut builder = EffectBuilder::new("sprite-burst");
    let mut root = EffectNode::new("root", NodeKind::Root);
    root.lifetime = lifetime + removal_duration + 10.0;
    let root_id = builder.node(root);

    let mut spark = EffectNode::new("spark", NodeKind::Sprite);
    spark.emission = EmissionSchedule::burst(count);
    spark.lifetime = lifetime;
    spark.removal_duration = removal_duration;
    let spark_id = builder.node(spark);

    builder.attach(root_id, spark_id).unwrap();
    Arc::new(builder.build().unwrap())
}

/// A three-level chain (root → parent sprite → bound child sprite) for
/// binding tests. `configure` receives the parent and child nodes
/// before the tree is sealed.
pub fn chain_effect(
    bind: BindType,
    configure: impl FnOnce(&mut EffectNode, &mut EffectNode),
) -> Arc<Effect> {
    let mut root = EffectNode::new("root", NodeKind::Root);
    root.lifetime = 100.0;

    let mut parent = EffectNode::new("parent", NodeKind::Sprite);
    parent.emission = EmissionSchedule::burst(1);
    parent.lifetime = 100.0;

    let mut child = EffectNode::new("child", NodeKind::Sprite);
    child.emission = EmissionSchedule::burst(1);
    child.lifetime = 100.0;
    child.bind = bind;

    configure(&mut parent, &mut child);

    let mut builder = EffectBuilder::new("chain");
    let root_id = builder.node(root);
    let parent_id = builder.node(parent);
    let child_id = builder.node(child);
    builder.attach(root_id, parent_id).unwrap();
    builder.attach(parent_id, child_id).unwrap();
    Arc::new(builder.build().unwrap())
}

/// A sink that only counts submissions.
#[derive(Debug, Default)]
pub struct CountingSink {
    pub submitted: usize,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for CountingSink {
    fn submit(&mut self, _record: RenderRecord) {
        self.submitted += 1;
    }
}

/// A sink that keeps every record for detailed assertions.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub records: Vec<RenderRecord>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for one node, in submission order.
    pub fn for_node(&self, node: ember_core::NodeId) -> Vec<&RenderRecord> {
        self.records.iter().filter(|r| r.node == node).collect()
    }
}

impl RenderSink for RecordingSink {
    fn submit(&mut self, record: RenderRecord) {
        self.records.push(record);
    }
}
