//! One playing effect.
//!
//! [`Playback`] is the owning root of a live instance tree: the shared
//! [`PlaybackGlobal`], the instance pool, and the container hierarchy
//! mirroring the effect definition.
//!
//! # Ownership model
//!
//! `Playback` is [`Send`] (a host may move independent playbacks onto
//! worker threads) but offers no interior synchronization: all mutation
//! goes through `&mut self`, one logical owner at a time. Render
//! collection is `&self` and must follow the update that produced the
//! frame — the borrow checker enforces that they never interleave.

use std::sync::Arc;
use std::time::Instant;

use glam::Mat4;

use ember_core::{NodeId, RenderSink};
use ember_effect::Effect;
use ember_pool::SlotPool;

use crate::config::{PlayError, PlaybackConfig};
use crate::container::InstanceContainer;
use crate::context::UpdateCtx;
use crate::global::PlaybackGlobal;
use crate::instance::Instance;
use crate::metrics::UpdateMetrics;

// Compile-time assertion: Playback moves between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Playback>();
    }
};

/// A live playback of one effect definition.
pub struct Playback {
    effect: Arc<Effect>,
    pool: SlotPool<Instance>,
    global: PlaybackGlobal,
    root: InstanceContainer,
    transform: Mat4,
    metrics: UpdateMetrics,
}

impl Playback {
    /// Begin playing `effect`.
    ///
    /// Validates the configuration, builds the container tree from the
    /// definition, and spawns the root node's generation at time zero,
    /// so the first [`update`](Playback::update) call ages it.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] for an invalid configuration, an
    /// unbuildable pool, or a definition/live-tree shape mismatch.
    pub fn new(effect: Arc<Effect>, config: PlaybackConfig) -> Result<Self, PlayError> {
        config.validate()?;
        let pool = SlotPool::new(config.pool)?;
        let global = PlaybackGlobal::new(config.seed, config.instance_ceiling);
        let root = InstanceContainer::build(&effect, NodeId::ROOT)?;

        let mut playback = Self {
            effect,
            pool,
            global,
            root,
            transform: config.transform,
            metrics: UpdateMetrics::default(),
        };
        let mut metrics = UpdateMetrics::default();
        let mut ctx = UpdateCtx {
            effect: playback.effect.as_ref(),
            pool: &mut playback.pool,
            global: &mut playback.global,
            metrics: &mut metrics,
            root_transform: playback.transform,
        };
        playback.root.spawn_group(&mut ctx, None);
        metrics.live = playback.global.live_instances();
        playback.metrics = metrics;
        Ok(playback)
    }

    /// Advance the whole tree by one frame.
    ///
    /// One synchronous pass: existing instances age and transition,
    /// finished ones are freed, due emission events spawn new
    /// generations. Returns the metrics for this pass.
    pub fn update(&mut self, dt: f32) -> &UpdateMetrics {
        let start = Instant::now();
        let mut metrics = self.metrics.next_pass();
        {
            let mut ctx = UpdateCtx {
                effect: self.effect.as_ref(),
                pool: &mut self.pool,
                global: &mut self.global,
                metrics: &mut metrics,
                root_transform: self.transform,
            };
            self.root.update(&mut ctx, dt, Vec::new());
        }
        self.global.advance(dt);
        metrics.live = self.global.live_instances();
        metrics.total_us = start.elapsed().as_micros() as u64;
        self.metrics = metrics;
        &self.metrics
    }

    /// Request a cooperative stop.
    ///
    /// Every `Active` instance transitions to `Removing` in the next
    /// [`update`](Playback::update) call and fades out over its
    /// removal duration; nothing is torn down immediately.
    pub fn request_stop(&mut self) {
        self.global.request_stop();
    }

    /// Whether any instance still occupies a pool slot.
    ///
    /// Becomes `false` only after every instance across the tree,
    /// including cascaded children, has reached `Disposing`.
    pub fn is_alive(&self) -> bool {
        self.global.live_instances() > 0
    }

    /// Submit one render record per visible instance, in deterministic
    /// insertion order. Call strictly after [`update`](Playback::update).
    pub fn collect(&self, sink: &mut dyn RenderSink) {
        self.root.collect(&self.effect, &self.pool, sink);
    }

    /// The effect definition being played.
    pub fn effect(&self) -> &Arc<Effect> {
        &self.effect
    }

    /// Accumulated playback time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.global.elapsed()
    }

    /// Live instances across the whole tree.
    pub fn live_instances(&self) -> u32 {
        self.global.live_instances()
    }

    /// The seed this playback's random stream was created from.
    pub fn seed(&self) -> u64 {
        self.global.seed()
    }

    /// World transform of the effect root.
    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    /// The root of the live container tree.
    pub fn root(&self) -> &InstanceContainer {
        &self.root
    }

    /// Resolve an instance handle taken from the live tree.
    ///
    /// Returns `None` once the instance has disposed and its slot was
    /// vacated or reused.
    pub fn instance(&self, handle: ember_pool::SlotHandle) -> Option<&Instance> {
        self.pool.get(handle)
    }

    /// Metrics from the most recent update pass.
    pub fn last_metrics(&self) -> &UpdateMetrics {
        &self.metrics
    }
}

impl std::fmt::Debug for Playback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Playback")
            .field("effect", &self.effect.name())
            .field("elapsed", &self.global.elapsed())
            .field("live_instances", &self.global.live_instances())
            .field("seed", &self.global.seed())
            .finish()
    }
}
