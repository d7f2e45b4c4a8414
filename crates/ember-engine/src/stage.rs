//! The stage: a registry of independently playing effects.
//!
//! Hosts that run more than one effect at a time register playbacks on
//! a [`Stage`] and drive them with a single `update`/`collect` pair per
//! frame. Iteration order is insertion order, so the frame's combined
//! render stream is as deterministic as each playback's own.

use std::sync::Arc;

use indexmap::IndexMap;

use ember_core::{PlaybackId, RenderSink};
use ember_effect::Effect;

use crate::config::{PlayError, PlaybackConfig};
use crate::playback::Playback;

/// Registry of live playbacks.
///
/// Finished playbacks (no live instances left) are retired
/// automatically at the end of each [`update`](Stage::update) call.
#[derive(Default)]
pub struct Stage {
    playbacks: IndexMap<PlaybackId, Playback>,
}

impl Stage {
    /// An empty stage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin playing `effect`, returning the handle for later control.
    ///
    /// # Errors
    ///
    /// Propagates [`PlayError`] from [`Playback::new`].
    pub fn play(
        &mut self,
        effect: Arc<Effect>,
        config: PlaybackConfig,
    ) -> Result<PlaybackId, PlayError> {
        let playback = Playback::new(effect, config)?;
        let id = PlaybackId::next();
        self.playbacks.insert(id, playback);
        Ok(id)
    }

    /// Advance every playback by one frame, in insertion order, then
    /// retire the ones that finished.
    pub fn update(&mut self, dt: f32) {
        for playback in self.playbacks.values_mut() {
            playback.update(dt);
        }
        self.playbacks.retain(|_, playback| playback.is_alive());
    }

    /// Request a cooperative stop on one playback.
    ///
    /// Returns `false` when the id is unknown or already retired.
    pub fn request_stop(&mut self, id: PlaybackId) -> bool {
        match self.playbacks.get_mut(&id) {
            Some(playback) => {
                playback.request_stop();
                true
            }
            None => false,
        }
    }

    /// Request a cooperative stop on every playback.
    pub fn stop_all(&mut self) {
        for playback in self.playbacks.values_mut() {
            playback.request_stop();
        }
    }

    /// Whether the playback still has live instances.
    pub fn is_alive(&self, id: PlaybackId) -> bool {
        self.playbacks
            .get(&id)
            .is_some_and(|playback| playback.is_alive())
    }

    /// Shared access to one playback.
    pub fn get(&self, id: PlaybackId) -> Option<&Playback> {
        self.playbacks.get(&id)
    }

    /// Submit render records for every playback, in insertion order.
    /// Call strictly after [`update`](Stage::update).
    pub fn collect(&self, sink: &mut dyn RenderSink) {
        for playback in self.playbacks.values() {
            playback.collect(sink);
        }
    }

    /// Number of playbacks currently registered.
    pub fn playing(&self) -> usize {
        self.playbacks.len()
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("playing", &self.playbacks.len())
            .finish()
    }
}
