//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a node within an effect definition.
///
/// Nodes are registered at effect build time and assigned sequential IDs.
/// `NodeId(n)` corresponds to the n-th node in the effect's node list;
/// `NodeId(0)` is always the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node of every effect.
    pub const ROOT: NodeId = NodeId(0);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`PlaybackId`] allocation.
static PLAYBACK_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-process identifier for one playing effect.
///
/// Allocated from a monotonic atomic counter via [`PlaybackId::next`].
/// Two distinct playbacks always have different IDs, even when they play
/// the same effect definition, so a stage registry never confuses a
/// finished playback with a later one that reuses its storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaybackId(u64);

impl PlaybackId {
    /// Allocate a fresh, unique playback ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(PLAYBACK_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PlaybackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId(7).to_string(), "7");
        assert_eq!(NodeId::from(3u32), NodeId(3));
    }

    #[test]
    fn root_is_node_zero() {
        assert_eq!(NodeId::ROOT, NodeId(0));
    }

    #[test]
    fn playback_ids_are_unique() {
        let a = PlaybackId::next();
        let b = PlaybackId::next();
        assert_ne!(a, b);
        assert!(a < b);
    }
}
