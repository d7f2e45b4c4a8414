//! Per-update context threaded through the tree walk.

use glam::Mat4;

use ember_effect::Effect;
use ember_pool::SlotPool;

use crate::global::PlaybackGlobal;
use crate::instance::Instance;
use crate::metrics::UpdateMetrics;

/// Everything one update pass needs, passed explicitly down the walk.
///
/// The fields are deliberately separate borrows: a group can read node
/// definitions from `effect` while mutating instances through `pool`
/// without aliasing.
pub(crate) struct UpdateCtx<'a> {
    /// The immutable definition tree.
    pub effect: &'a Effect,
    /// Slot storage for every instance in the playback.
    pub pool: &'a mut SlotPool<Instance>,
    /// Shared playback state (time, stream, counters, stop flag).
    pub global: &'a mut PlaybackGlobal,
    /// Counters for this pass.
    pub metrics: &'a mut UpdateMetrics,
    /// World transform of the effect root.
    pub root_transform: Mat4,
}
