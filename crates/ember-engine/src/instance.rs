//! Live particle instances and their state machine.
//!
//! An [`Instance`] is the payload stored in one pool slot: the dynamic
//! state of a single particle. Everything static about it (lifetime,
//! curves, emission) lives in its [`EffectNode`]; the instance holds
//! only what changes per tick plus the spawn-time samples.
//!
//! The state machine advances strictly forward, one transition per
//! update pass:
//!
//! ```text
//! Active ──(age ≥ lifetime | stop | Always-bound parent removed)──▶ Removing
//! Removing ──(removing_age ≥ removal_duration)──▶ Removed
//! Removed ──(unconditionally, next pass)──▶ Disposing
//! ```
//!
//! A `Removed` instance keeps its slot for exactly one more pass so
//! `Always`-bound children can still observe the transition before the
//! slot is vacated.

use glam::{Mat4, Quat, Vec3};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use ember_core::{BindType, InstanceState, NodeId};
use ember_effect::EffectNode;
use ember_pool::SlotHandle;

/// Per-child emission bookkeeping: how many events have fired toward
/// the child node's schedule.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct EmissionCursor {
    pub(crate) fired: u32,
}

/// What an instance sees of its bound parent this tick.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ParentStatus {
    /// The instance has no parent (root generation).
    None,
    /// The parent occupies its slot and still has a valid transform
    /// (`Active` or `Removing`).
    Live(Mat4),
    /// The parent is `Removed`, `Disposing`, or its slot is vacated.
    Gone,
}

/// One live particle.
///
/// Stored by value in a pool slot; its address is stable for its whole
/// lifetime. Mutation happens only inside the owning update walk.
pub struct Instance {
    node: NodeId,
    state: InstanceState,
    age: f32,
    removing_age: f32,
    position: Vec3,
    velocity: Vec3,
    rotation: f32,
    angular_velocity: f32,
    bind: BindType,
    parent: Option<SlotHandle>,
    /// Basis the local transform is composed onto. Copied at spawn for
    /// every bind type; refreshed from the parent each tick under
    /// `Always`, then frozen at the last known value once the parent
    /// is gone.
    base: Mat4,
    world: Mat4,
    color: [f32; 4],
    pub(crate) cursors: SmallVec<[EmissionCursor; 4]>,
}

impl Instance {
    /// Spawn an instance of `node`, sampling generation parameters from
    /// the playback stream.
    ///
    /// Samples are drawn in a fixed order (position, velocity,
    /// rotation, angular velocity) so the stream stays reproducible.
    pub(crate) fn spawn(
        id: NodeId,
        node: &EffectNode,
        parent: Option<SlotHandle>,
        base: Mat4,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let params = &node.params;
        let position = params.position.sample(rng);
        let velocity = params.velocity.sample(rng);
        let rotation = params.rotation.sample(rng);
        let angular_velocity = params.angular_velocity.sample(rng);

        let mut instance = Self {
            node: id,
            state: InstanceState::Active,
            age: 0.0,
            removing_age: 0.0,
            position,
            velocity,
            rotation,
            angular_velocity,
            bind: node.bind,
            parent,
            base,
            world: Mat4::IDENTITY,
            color: [1.0; 4],
            cursors: SmallVec::from_elem(EmissionCursor::default(), node.children.len()),
        };
        instance.world = base * instance.local_transform(node);
        instance.color = instance.evaluate_color(node);
        instance
    }

    /// Advance by one tick.
    ///
    /// Exactly one state transition may happen per pass; kinematics and
    /// the world transform are refreshed for every non-terminal state.
    pub(crate) fn advance(&mut self, dt: f32, node: &EffectNode, stop: bool, parent: ParentStatus) {
        if self.state == InstanceState::Removed {
            self.state = InstanceState::Disposing;
            return;
        }

        self.age += dt;
        self.position += self.velocity * dt;
        self.rotation += self.angular_velocity * dt;

        match self.state {
            InstanceState::Active => {
                let parent_gone =
                    self.bind.tracks_parent() && matches!(parent, ParentStatus::Gone);
                if stop || parent_gone || self.age >= node.lifetime {
                    self.state = InstanceState::Removing;
                    self.removing_age = 0.0;
                }
            }
            InstanceState::Removing => {
                self.removing_age += dt;
                if self.removing_age >= node.removal_duration {
                    self.state = InstanceState::Removed;
                }
            }
            InstanceState::Removed | InstanceState::Disposing => {}
        }

        if self.bind.tracks_parent() {
            if let ParentStatus::Live(world) = parent {
                self.base = world;
            }
        }
        self.world = self.base * self.local_transform(node);
        self.color = self.evaluate_color(node);
    }

    fn normalized_age(&self, node: &EffectNode) -> f32 {
        if node.lifetime > 0.0 {
            (self.age / node.lifetime).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    fn local_transform(&self, node: &EffectNode) -> Mat4 {
        let scale = node.params.scale.eval(self.normalized_age(node));
        Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            Quat::from_rotation_z(self.rotation),
            self.position,
        )
    }

    fn evaluate_color(&self, node: &EffectNode) -> [f32; 4] {
        let mut color = node.params.color.eval(self.normalized_age(node));
        if self.state == InstanceState::Removing && node.removal_duration > 0.0 {
            let fade = 1.0 - (self.removing_age / node.removal_duration).clamp(0.0, 1.0);
            color[3] *= fade;
        }
        color
    }

    /// The effect node this instance was spawned from.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Current lifecycle state.
    pub fn state(&self) -> InstanceState {
        self.state
    }

    /// Seconds since spawn.
    pub fn age(&self) -> f32 {
        self.age
    }

    /// How this instance follows its parent.
    pub fn bind(&self) -> BindType {
        self.bind
    }

    /// Handle of the parent instance, if any.
    pub fn parent(&self) -> Option<SlotHandle> {
        self.parent
    }

    /// Current world transform.
    pub fn world(&self) -> Mat4 {
        self.world
    }

    /// Current RGBA color, fade-out applied.
    pub fn color(&self) -> [f32; 4] {
        self.color
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instance")
            .field("node", &self.node)
            .field("state", &self.state)
            .field("age", &self.age)
            .field("bind", &self.bind)
            .finish()
    }
}

/// Resolve the spawn-time bind basis for a child of a live parent.
///
/// `Always` and `WhenCreating` take the parent's full transform (the
/// former keeps refreshing it afterwards, the latter never does).
/// `NotBind` takes only the parent's translation, leaving orientation
/// on the world axes; `NotBindRoot` takes the parent's translation with
/// the playback root transform's rotation instead.
pub(crate) fn bind_basis(bind: BindType, parent_world: Mat4, root: Mat4) -> Mat4 {
    match bind {
        BindType::Always | BindType::WhenCreating => parent_world,
        BindType::NotBind => Mat4::from_translation(parent_world.w_axis.truncate()),
        BindType::NotBindRoot => {
            let (_, rotation, _) = root.to_scale_rotation_translation();
            Mat4::from_rotation_translation(rotation, parent_world.w_axis.truncate())
        }
    }
}
