//! Fail-fast effect tree construction.

use ember_core::{NodeId, NodeKind, StructureError};

use crate::node::{Effect, EffectNode};

/// Builder for [`Effect`] trees.
///
/// Register nodes with [`node()`](EffectBuilder::node), wire the tree
/// with [`attach()`](EffectBuilder::attach), then seal it with
/// [`build()`](EffectBuilder::build). Build validates the whole
/// structure and fails fast — a malformed tree never produces a
/// partially-usable effect.
///
/// ```
/// use ember_core::NodeKind;
/// use ember_effect::{EffectBuilder, EffectNode};
///
/// let mut builder = EffectBuilder::new("sparks");
/// let root = builder.node(EffectNode::new("root", NodeKind::Root));
/// let spark = builder.node(EffectNode::new("spark", NodeKind::Sprite));
/// builder.attach(root, spark).unwrap();
/// let effect = builder.build().unwrap();
/// assert_eq!(effect.node_count(), 2);
/// ```
pub struct EffectBuilder {
    name: String,
    nodes: Vec<EffectNode>,
}

impl EffectBuilder {
    /// Start an empty effect with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
        }
    }

    /// Register a node, returning its id.
    ///
    /// The first registered node must be the root; ids are assigned in
    /// registration order.
    pub fn node(&mut self, node: EffectNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Declare `child` as a child of `parent`.
    ///
    /// # Errors
    ///
    /// Fails early on ids that are not registered, on attaching the
    /// root under anything, and on attaching the same child twice.
    /// [`build()`](EffectBuilder::build) re-checks all of these, so
    /// mutating [`EffectNode::children`] directly is equally safe.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), StructureError> {
        if child == NodeId::ROOT {
            return Err(StructureError::RootMisplaced { node: parent });
        }
        if self.nodes.get(child.0 as usize).is_none() {
            return Err(StructureError::UnknownChild { node: parent, child });
        }
        if self.nodes.iter().any(|n| n.children.contains(&child)) {
            return Err(StructureError::DuplicateChild { child });
        }
        let parent_node = self
            .nodes
            .get_mut(parent.0 as usize)
            .ok_or(StructureError::UnknownChild { node: parent, child })?;
        parent_node.children.push(child);
        Ok(())
    }

    /// Validate the structure and seal the effect.
    ///
    /// # Errors
    ///
    /// - [`StructureError::EmptyEffect`] — no nodes registered.
    /// - [`StructureError::TooManyNodes`] — more nodes than `NodeId`
    ///   can index.
    /// - [`StructureError::RootMisplaced`] — node 0 is not of root
    ///   kind, a root-kind node appears elsewhere, or the root is
    ///   referenced as a child.
    /// - [`StructureError::UnknownChild`] — a child id without a node.
    /// - [`StructureError::DuplicateChild`] — a node referenced as a
    ///   child more than once (the definition must be a tree).
    /// - [`StructureError::OrphanNode`] — a non-root node no parent
    ///   references.
    pub fn build(self) -> Result<Effect, StructureError> {
        if self.nodes.is_empty() {
            return Err(StructureError::EmptyEffect);
        }
        if u32::try_from(self.nodes.len()).is_err() {
            return Err(StructureError::TooManyNodes {
                count: self.nodes.len(),
            });
        }
        if self.nodes[0].kind != NodeKind::Root {
            return Err(StructureError::RootMisplaced { node: NodeId::ROOT });
        }

        let mut referenced = vec![false; self.nodes.len()];
        for (idx, node) in self.nodes.iter().enumerate() {
            let id = NodeId(idx as u32);
            if idx > 0 && node.kind == NodeKind::Root {
                return Err(StructureError::RootMisplaced { node: id });
            }
            for &child in &node.children {
                if child == NodeId::ROOT {
                    return Err(StructureError::RootMisplaced { node: id });
                }
                let slot = referenced
                    .get_mut(child.0 as usize)
                    .ok_or(StructureError::UnknownChild { node: id, child })?;
                if *slot {
                    return Err(StructureError::DuplicateChild { child });
                }
                *slot = true;
            }
        }
        // Every non-root node must hang off exactly one parent.
        if let Some(idx) = referenced.iter().skip(1).position(|&r| !r) {
            return Err(StructureError::OrphanNode {
                node: NodeId(idx as u32 + 1),
            });
        }

        Ok(Effect {
            name: self.name,
            nodes: self.nodes,
        })
    }
}
