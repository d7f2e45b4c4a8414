//! Instance groups: one emission generation.
//!
//! A group owns the instances spawned together by one emission event.
//! Instances stay in spawn order for their whole life — removal
//! compacts the sequence but never reorders it, which is what keeps
//! render-record order stable across frames.

use ember_core::NodeId;
use ember_pool::SlotHandle;

use crate::context::UpdateCtx;
use crate::instance::ParentStatus;

/// One generation of sibling instances.
pub struct InstanceGroup {
    id: u64,
    parent: Option<SlotHandle>,
    created_at: f32,
    instances: Vec<SlotHandle>,
}

/// A pending request to spawn one generation into a child container.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SpawnRequest {
    /// The instance whose emission event fired, `None` for the root
    /// generation.
    pub parent: Option<SlotHandle>,
}

impl InstanceGroup {
    pub(crate) fn new(id: u64, parent: Option<SlotHandle>, created_at: f32) -> Self {
        Self {
            id,
            parent,
            created_at,
            instances: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, handle: SlotHandle) {
        self.instances.push(handle);
    }

    /// Advance every owned instance by one tick, in insertion order,
    /// then compact out the slots that reached `Disposing`.
    ///
    /// Emission events fired by still-`Active` instances are appended
    /// to `requests` (indexed by child position); the owning container
    /// forwards them into the child containers after this group level
    /// finishes updating.
    pub(crate) fn update(
        &mut self,
        ctx: &mut UpdateCtx<'_>,
        dt: f32,
        children: &[NodeId],
        requests: &mut [Vec<SpawnRequest>],
    ) {
        let effect = ctx.effect;
        let stop = ctx.global.stop_requested();

        for &handle in &self.instances {
            let Some(instance) = ctx.pool.get(handle) else {
                continue;
            };
            let node = effect
                .node(instance.node())
                .expect("instance spawned from a node of this effect");

            let parent_status = match instance.parent() {
                None => ParentStatus::None,
                Some(parent) => match ctx.pool.get(parent) {
                    Some(p) if p.state().may_render() => ParentStatus::Live(p.world()),
                    _ => ParentStatus::Gone,
                },
            };

            let instance = ctx
                .pool
                .get_mut(handle)
                .expect("handle checked live above");
            instance.advance(dt, node, stop, parent_status);

            // Emission, gated on the post-transition state: an instance
            // that just started removing fires nothing this tick.
            if instance.state().may_emit() {
                let age = instance.age();
                for (child_idx, &child_id) in children.iter().enumerate() {
                    let schedule = &effect
                        .node(child_id)
                        .expect("child ids validated at build")
                        .emission;
                    let due = schedule.events_due_by(age);
                    let cursor = &mut instance.cursors[child_idx];
                    while cursor.fired < due {
                        cursor.fired += 1;
                        requests[child_idx].push(SpawnRequest {
                            parent: Some(handle),
                        });
                    }
                }
            }
        }

        self.instances.retain(|&handle| match ctx.pool.get(handle) {
            Some(instance) if instance.state().is_terminal() => {
                ctx.pool.free(handle);
                ctx.global.release();
                ctx.metrics.disposed += 1;
                false
            }
            Some(_) => true,
            None => false,
        });
    }

    /// Sequence id, unique within the playback, in creation order.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The instance whose emission spawned this generation. `None` for
    /// the root generation.
    pub fn parent(&self) -> Option<SlotHandle> {
        self.parent
    }

    /// Playback time at which the generation was spawned.
    pub fn created_at(&self) -> f32 {
        self.created_at
    }

    /// Handles of the owned instances, in spawn order.
    pub fn handles(&self) -> &[SlotHandle] {
        &self.instances
    }

    /// Number of owned instances not yet disposed.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the group owns no instances.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Whether every instance ever owned by this group has disposed.
    ///
    /// Groups receive instances only at creation, so an empty sequence
    /// means the generation is finished and the container may retire
    /// the group.
    pub fn is_all_disposed(&self) -> bool {
        self.instances.is_empty()
    }
}

impl std::fmt::Debug for InstanceGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstanceGroup")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("instances", &self.instances.len())
            .finish()
    }
}
