//! Error types shared across the Ember workspace.
//!
//! Two severities exist. [`SpawnError`] is non-fatal: the engine absorbs
//! it, counts it in metrics, and the frame continues with fewer
//! particles. [`StructureError`] is fatal and construction-time only: a
//! malformed effect tree is rejected before any playback exists, never
//! patched up at runtime.

use std::error::Error;
use std::fmt;

use crate::id::NodeId;
use crate::state::InstanceState;

/// Why a spawn request was dropped.
///
/// Spawn failures never surface to the host as errors — the engine logs
/// them, bumps a metrics counter, and moves on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnError {
    /// The global live-instance ceiling was reached.
    CeilingReached {
        /// Live instances at the time of the request.
        live: u32,
        /// The configured ceiling.
        ceiling: u32,
    },
    /// The instance pool could not be extended with another chunk.
    PoolExhausted,
    /// The would-be parent is no longer `Active`. A dying instance
    /// cannot originate new children.
    DeadParent {
        /// The parent's state at the time of the request.
        state: InstanceState,
    },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CeilingReached { live, ceiling } => {
                write!(f, "instance ceiling reached: {live} live of {ceiling} allowed")
            }
            Self::PoolExhausted => write!(f, "instance pool exhausted"),
            Self::DeadParent { state } => {
                write!(f, "spawn rejected: parent is {state}")
            }
        }
    }
}

impl Error for SpawnError {}

/// Structural defects in an effect definition tree.
///
/// Detected by the effect builder's validation pass. Construction fails
/// fast: no partially-built effect is ever returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructureError {
    /// The effect has no nodes at all.
    EmptyEffect,
    /// A node references a child id that is not in the node list.
    UnknownChild {
        /// The referencing node.
        node: NodeId,
        /// The missing child id.
        child: NodeId,
    },
    /// Two nodes claim the same child, or a node claims a child twice.
    /// The definition must be a tree, not a DAG.
    DuplicateChild {
        /// The child claimed more than once.
        child: NodeId,
    },
    /// A node is unreachable from the root.
    OrphanNode {
        /// The unreferenced node.
        node: NodeId,
    },
    /// Node 0 is not of root kind, or a root-kind node appears elsewhere.
    RootMisplaced {
        /// The offending node.
        node: NodeId,
    },
    /// The node count exceeds what `NodeId` can index.
    TooManyNodes {
        /// Number of nodes supplied.
        count: usize,
    },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEffect => write!(f, "effect has no nodes"),
            Self::UnknownChild { node, child } => {
                write!(f, "node {node} references unknown child {child}")
            }
            Self::DuplicateChild { child } => {
                write!(f, "child {child} is referenced more than once")
            }
            Self::OrphanNode { node } => {
                write!(f, "node {node} is unreachable from the root")
            }
            Self::RootMisplaced { node } => {
                write!(f, "node {node} violates the root placement rule")
            }
            Self::TooManyNodes { count } => {
                write!(f, "effect has {count} nodes, exceeding the addressable maximum")
            }
        }
    }
}

impl Error for StructureError {}
