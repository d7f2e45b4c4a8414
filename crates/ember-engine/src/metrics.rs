//! Per-update metrics.
//!
//! [`UpdateMetrics`] captures what one `update()` call did, plus the
//! cumulative counts of absorbed spawn failures. Absorbed failures
//! never surface as errors (the frame always completes), so the
//! counters are the only way a host notices an effect running against
//! its ceiling.

/// Counters for a single update pass.
///
/// `spawned`, `disposed`, `groups_retired`, and `live` describe the
/// pass that produced this value. The `dropped_*` and `rejected_*`
/// counters are cumulative over the playback's lifetime.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateMetrics {
    /// Wall-clock time of the update pass, in microseconds.
    pub total_us: u64,
    /// Instances spawned this pass.
    pub spawned: u32,
    /// Instances that reached `Disposing` and were freed this pass.
    pub disposed: u32,
    /// Groups retired (all instances disposed) this pass.
    pub groups_retired: u32,
    /// Live instances after the pass.
    pub live: u32,
    /// Cumulative spawns dropped at the instance ceiling.
    pub dropped_ceiling: u64,
    /// Cumulative spawns dropped because the pool chain was exhausted.
    pub dropped_pool: u64,
    /// Cumulative spawn requests rejected for a non-`Active` parent.
    pub rejected_dead_parent: u64,
}

impl UpdateMetrics {
    /// A fresh pass value carrying over this pass's cumulative counters.
    pub(crate) fn next_pass(&self) -> Self {
        Self {
            dropped_ceiling: self.dropped_ceiling,
            dropped_pool: self.dropped_pool,
            rejected_dead_parent: self.rejected_dead_parent,
            ..Self::default()
        }
    }
}
