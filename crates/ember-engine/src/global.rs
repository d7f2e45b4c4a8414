//! Shared per-playback state.
//!
//! One [`PlaybackGlobal`] exists per playing effect. It owns the pieces
//! of state every container, group, and instance below it reads: the
//! elapsed-time accumulator, the seeded random stream, the live-instance
//! counter with its ceiling, and the cooperative stop flag. It is passed
//! explicitly down the update walk — never ambient — and only the owning
//! update call writes to it.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ember_core::SpawnError;

/// Playback-wide shared state.
///
/// Created when an effect begins playing; dropped when its playback is
/// torn down. Everything below it in the live tree holds it by
/// reference for at most the duration of one update call.
pub struct PlaybackGlobal {
    elapsed: f32,
    seed: u64,
    rng: ChaCha8Rng,
    live_instances: u32,
    instance_ceiling: u32,
    stop_requested: bool,
    next_group: u64,
}

impl PlaybackGlobal {
    /// Create fresh playback state with a seeded random stream.
    ///
    /// The stream is ChaCha8: the same seed and the same draw sequence
    /// reproduce identical values on every platform, which is what the
    /// determinism contract rests on.
    pub fn new(seed: u64, instance_ceiling: u32) -> Self {
        Self {
            elapsed: 0.0,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            live_instances: 0,
            instance_ceiling,
            stop_requested: false,
            next_group: 0,
        }
    }

    /// Accumulated playback time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// The seed the random stream was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of instances currently occupying pool slots.
    pub fn live_instances(&self) -> u32 {
        self.live_instances
    }

    /// The configured live-instance ceiling.
    pub fn instance_ceiling(&self) -> u32 {
        self.instance_ceiling
    }

    /// Whether a cooperative stop has been requested.
    ///
    /// Once set, the next update pass transitions every `Active`
    /// instance to `Removing`; the flag is never cleared.
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Request a cooperative stop.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    /// The deterministic random stream.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub(crate) fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub(crate) fn next_group_id(&mut self) -> u64 {
        let id = self.next_group;
        self.next_group += 1;
        id
    }

    /// Reserve one slot against the instance ceiling.
    pub(crate) fn try_reserve(&mut self) -> Result<(), SpawnError> {
        if self.live_instances >= self.instance_ceiling {
            return Err(SpawnError::CeilingReached {
                live: self.live_instances,
                ceiling: self.instance_ceiling,
            });
        }
        self.live_instances += 1;
        Ok(())
    }

    /// Return one reserved slot.
    pub(crate) fn release(&mut self) {
        debug_assert!(self.live_instances > 0, "release without reserve");
        self.live_instances = self.live_instances.saturating_sub(1);
    }
}

impl std::fmt::Debug for PlaybackGlobal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackGlobal")
            .field("elapsed", &self.elapsed)
            .field("seed", &self.seed)
            .field("live_instances", &self.live_instances)
            .field("stop_requested", &self.stop_requested)
            .finish()
    }
}
