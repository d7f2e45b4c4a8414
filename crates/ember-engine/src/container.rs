//! Instance containers: the structural nodes of the live tree.
//!
//! One [`InstanceContainer`] exists per effect node, mirroring the
//! definition tree exactly. The container tree's shape is fixed at
//! construction — only the groups and instances inside it grow and
//! shrink as the playback runs.

use tracing::{debug, warn};

use ember_core::{NodeId, RenderRecord, RenderSink, SpawnError, StructureError};
use ember_effect::Effect;
use ember_pool::{SlotHandle, SlotPool};

use crate::config::PlayError;
use crate::context::UpdateCtx;
use crate::group::{InstanceGroup, SpawnRequest};
use crate::instance::{bind_basis, Instance};

/// The live materialization of one effect node.
pub struct InstanceContainer {
    node: NodeId,
    groups: Vec<InstanceGroup>,
    children: Vec<InstanceContainer>,
}

impl InstanceContainer {
    /// Recursively build the container tree for the subtree rooted at
    /// `node`.
    ///
    /// The effect was validated at build time, so a dangling child id
    /// here means the definition and the live tree diverged — an
    /// internal-consistency violation that aborts construction.
    pub(crate) fn build(effect: &Effect, node: NodeId) -> Result<Self, PlayError> {
        let def = effect
            .node(node)
            .ok_or(StructureError::UnknownChild { node, child: node })?;
        let children = def
            .children
            .iter()
            .map(|&child| Self::build(effect, child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            node,
            groups: Vec::new(),
            children,
        })
    }

    /// Advance this subtree by one tick.
    ///
    /// Phases, in order: update existing groups (collecting emission
    /// requests from still-active instances), retire finished groups,
    /// spawn the generations requested by the parent level, then
    /// recurse. Parent-requested spawns land strictly after the
    /// existing groups update, so a newborn instance is never advanced
    /// in the tick that created it.
    pub(crate) fn update(&mut self, ctx: &mut UpdateCtx<'_>, dt: f32, requests: Vec<SpawnRequest>) {
        let node = ctx
            .effect
            .node(self.node)
            .expect("container mirrors the definition tree");
        debug_assert_eq!(node.children.len(), self.children.len());

        let mut child_requests: Vec<Vec<SpawnRequest>> = vec![Vec::new(); self.children.len()];
        for group in &mut self.groups {
            group.update(ctx, dt, &node.children, &mut child_requests);
        }

        let before = self.groups.len();
        self.groups.retain(|group| !group.is_all_disposed());
        ctx.metrics.groups_retired += (before - self.groups.len()) as u32;

        for request in requests {
            self.spawn_group(ctx, request.parent);
        }

        for (child, requests) in self.children.iter_mut().zip(child_requests) {
            child.update(ctx, dt, requests);
        }
    }

    /// Spawn one generation of this node's instances.
    ///
    /// Every failure here is absorbed: a dead parent rejects the whole
    /// generation, the instance ceiling and pool exhaustion drop
    /// individual instances. The effect keeps playing either way.
    pub(crate) fn spawn_group(&mut self, ctx: &mut UpdateCtx<'_>, parent: Option<SlotHandle>) {
        let node = ctx
            .effect
            .node(self.node)
            .expect("container mirrors the definition tree");

        let base = match parent {
            None => ctx.root_transform,
            Some(handle) => match ctx.pool.get(handle) {
                Some(p) if p.state().may_emit() => {
                    bind_basis(node.bind, p.world(), ctx.root_transform)
                }
                other => {
                    let state = other.map(|p| p.state());
                    ctx.metrics.rejected_dead_parent += 1;
                    warn!(node = %self.node, ?state, "spawn rejected: parent not active");
                    return;
                }
            },
        };

        let live_here: u32 = self.groups.iter().map(|g| g.len() as u32).sum();
        let quota = match node.emission.max_alive {
            Some(cap) => node.emission.burst.min(cap.saturating_sub(live_here)),
            None => node.emission.burst,
        };
        if quota == 0 {
            return;
        }

        let mut group =
            InstanceGroup::new(ctx.global.next_group_id(), parent, ctx.global.elapsed());
        for _ in 0..quota {
            match ctx.global.try_reserve() {
                Ok(()) => {}
                Err(SpawnError::CeilingReached { live, ceiling }) => {
                    ctx.metrics.dropped_ceiling += 1;
                    debug!(node = %self.node, live, ceiling, "spawn dropped: instance ceiling");
                    continue;
                }
                Err(_) => continue,
            }
            let instance = Instance::spawn(self.node, node, parent, base, ctx.global.rng());
            match ctx.pool.alloc(instance) {
                Ok(handle) => {
                    group.push(handle);
                    ctx.metrics.spawned += 1;
                }
                Err(e) => {
                    ctx.global.release();
                    ctx.metrics.dropped_pool += 1;
                    debug!(node = %self.node, error = %e, "spawn dropped: pool exhausted");
                }
            }
        }

        if !group.is_empty() {
            self.groups.push(group);
        }
    }

    /// Append one render record per visible instance in this subtree,
    /// in insertion order.
    pub(crate) fn collect(
        &self,
        effect: &Effect,
        pool: &SlotPool<Instance>,
        sink: &mut dyn RenderSink,
    ) {
        let node = effect
            .node(self.node)
            .expect("container mirrors the definition tree");
        if node.kind.is_renderable() {
            for group in &self.groups {
                for &handle in group.handles() {
                    let Some(instance) = pool.get(handle) else {
                        continue;
                    };
                    if instance.state().may_render() {
                        sink.submit(RenderRecord {
                            node: self.node,
                            kind: node.kind,
                            transform: instance.world(),
                            color: instance.color(),
                        });
                    }
                }
            }
        }
        for child in &self.children {
            child.collect(effect, pool, sink);
        }
    }

    /// The effect node this container materializes.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Live emission generations, oldest first.
    pub fn groups(&self) -> &[InstanceGroup] {
        &self.groups
    }

    /// Child containers, in definition order.
    pub fn children(&self) -> &[InstanceContainer] {
        &self.children
    }

    /// Total live instances in this subtree.
    pub fn live_instances(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum::<usize>()
            + self.children.iter().map(|c| c.live_instances()).sum::<usize>()
    }
}

impl std::fmt::Debug for InstanceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceContainer")
            .field("node", &self.node)
            .field("groups", &self.groups.len())
            .field("children", &self.children.len())
            .finish()
    }
}
