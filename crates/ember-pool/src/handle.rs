//! Generation-tagged slot handles.
//!
//! A [`SlotHandle`] encodes the physical location of one pooled slot
//! plus the generation the slot had when the allocation was made. The
//! generation allows O(1) staleness checks: a handle to a slot that has
//! since been freed and reallocated no longer resolves.

use std::fmt;

/// Stable address of one allocated slot within a [`SlotPool`](crate::SlotPool).
///
/// Handles are plain `Copy` values and may be stored freely — in
/// particular as the non-owning parent links between bound instances.
/// Resolving a handle validates chunk index, slot index, and generation
/// before any data is touched, so a dangling handle degrades to `None`,
/// never to a read of the wrong occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct SlotHandle {
    /// Index of the chunk within the pool's chain.
    pub(crate) chunk: u16,
    /// Slot index within the chunk.
    pub(crate) slot: u16,
    /// Slot generation at allocation time.
    pub(crate) generation: u32,
}

impl SlotHandle {
    pub(crate) fn new(chunk: u16, slot: u16, generation: u32) -> Self {
        Self {
            chunk,
            slot,
            generation,
        }
    }

    /// Index of the chunk this handle points into.
    pub fn chunk(&self) -> u16 {
        self.chunk
    }

    /// Slot index within the chunk.
    pub fn slot(&self) -> u16 {
        self.slot
    }

    /// The generation this handle was allocated under.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for SlotHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SlotHandle(chunk={}, slot={}, gen={})",
            self.chunk, self.slot, self.generation
        )
    }
}
