//! The render boundary between the engine and graphics backends.
//!
//! The engine knows nothing about rasterization, buffers, or devices.
//! After each update pass it walks the live tree in insertion order and
//! submits one [`RenderRecord`] per visible instance to a [`RenderSink`].
//! Backends implement `RenderSink`; tests usually use a plain
//! `Vec<RenderRecord>`, which implements it too.

use glam::Mat4;

use crate::id::NodeId;
use crate::kind::NodeKind;

/// One renderable instance, as handed to the backend.
///
/// Records are submitted in a deterministic order: containers in
/// definition order, groups in creation order, instances in spawn order.
/// Two runs with the same seed and the same update sequence produce an
/// identical record stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderRecord {
    /// Which effect node this instance was spawned from.
    pub node: NodeId,
    /// Geometry kind of the node, so backends can batch by primitive.
    pub kind: NodeKind,
    /// World transform of the instance.
    pub transform: Mat4,
    /// RGBA color evaluated from the node's color curve at the
    /// instance's current age, fade-out applied.
    pub color: [f32; 4],
}

/// Receiver for per-frame render records.
///
/// The engine calls [`submit`](RenderSink::submit) once per visible
/// instance, strictly after the update pass that produced the frame.
/// Implementations must not call back into the engine.
pub trait RenderSink {
    /// Accept one render record.
    fn submit(&mut self, record: RenderRecord);
}

impl RenderSink for Vec<RenderRecord> {
    fn submit(&mut self, record: RenderRecord) {
        self.push(record);
    }
}
