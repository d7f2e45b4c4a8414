//! Effect nodes and the sealed effect tree.

use ember_core::{BindType, NodeId, NodeKind};

use crate::params::GenerationParams;
use crate::schedule::EmissionSchedule;

/// One node of an effect definition tree.
///
/// A node describes a whole class of instances: when they spawn
/// ([`EmissionSchedule`]), how long they live, how they follow their
/// parent ([`BindType`]), and what they look like over their lifetime
/// ([`GenerationParams`]).
#[derive(Clone, Debug, PartialEq)]
pub struct EffectNode {
    /// Human-readable name, for diagnostics only.
    pub name: String,
    /// Geometry kind.
    pub kind: NodeKind,
    /// How instances of this node follow the parent that spawned them.
    pub bind: BindType,
    /// Seconds from spawn until the fade-out begins.
    pub lifetime: f32,
    /// Seconds the fade-out lasts once it begins.
    pub removal_duration: f32,
    /// When instances of this node are spawned, on the parent's age axis.
    pub emission: EmissionSchedule,
    /// Spawn-time ranges and age-driven curves.
    pub params: GenerationParams,
    /// Child nodes, by id. Fixed once the effect is built.
    pub children: Vec<NodeId>,
}

impl EffectNode {
    /// A node with neutral parameters: one-second lifetime, instant
    /// removal, a single-instance burst at age 0, no children.
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            bind: BindType::default(),
            lifetime: 1.0,
            removal_duration: 0.0,
            emission: EmissionSchedule::default(),
            params: GenerationParams::default(),
            children: Vec::new(),
        }
    }
}

/// A sealed, validated effect definition tree.
///
/// Nodes live in a flat list; `NodeId(n)` is the index of the n-th
/// node and `NodeId(0)` is always the root. Effects are immutable once
/// built — playbacks share them by `Arc` and only ever read.
#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub(crate) name: String,
    pub(crate) nodes: Vec<EffectNode>,
}

impl Effect {
    /// The effect's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root node.
    pub fn root(&self) -> &EffectNode {
        &self.nodes[0]
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&EffectNode> {
        self.nodes.get(id.0 as usize)
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
