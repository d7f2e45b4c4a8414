//! Fixed-capacity storage chunks.
//!
//! A [`Chunk`] owns storage for a fixed number of slots, allocated up
//! front and never resized. Allocation pops a free-list in O(1); freeing
//! pushes the slot back and bumps its generation counter so outstanding
//! handles to the old occupant go stale.

/// A fixed-capacity pool chunk.
///
/// Slots are `Option<T>`: vacant slots hold `None`, so a freed slot
/// drops its payload immediately and a reused slot starts from a fresh
/// value — there is no residual data bleed between occupants.
pub struct Chunk<T> {
    /// Slot storage. Length fixed at `capacity` for the chunk's lifetime.
    slots: Vec<Option<T>>,
    /// Per-slot generation, bumped on each free.
    generations: Vec<u32>,
    /// Vacant slot indices, popped on alloc.
    free_list: Vec<u16>,
}

impl<T> Chunk<T> {
    /// Create a chunk with the given slot count, all vacant.
    pub fn new(capacity: u16) -> Self {
        let cap = capacity as usize;
        let mut slots = Vec::with_capacity(cap);
        slots.resize_with(cap, || None);
        Self {
            slots,
            generations: vec![0; cap],
            // Reversed so slot 0 is handed out first.
            free_list: (0..capacity).rev().collect(),
        }
    }

    /// Allocate a slot for `value`.
    ///
    /// Returns `Some((slot, generation))` or `None` when the chunk is
    /// full. O(1).
    pub fn alloc(&mut self, value: T) -> Option<(u16, u32)> {
        let slot = self.free_list.pop()?;
        let idx = slot as usize;
        debug_assert!(self.slots[idx].is_none(), "free list handed out a live slot");
        self.slots[idx] = Some(value);
        Some((slot, self.generations[idx]))
    }

    /// Free a slot, returning its payload.
    ///
    /// The slot's generation is bumped, so handles taken before this
    /// call no longer resolve. Freeing a vacant slot returns `None` and
    /// leaves the chunk unchanged.
    pub fn free(&mut self, slot: u16) -> Option<T> {
        let idx = slot as usize;
        let value = self.slots.get_mut(idx)?.take()?;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.free_list.push(slot);
        Some(value)
    }

    /// Shared access to a slot, validated against `generation`.
    pub fn get(&self, slot: u16, generation: u32) -> Option<&T> {
        let idx = slot as usize;
        if *self.generations.get(idx)? != generation {
            return None;
        }
        self.slots[idx].as_ref()
    }

    /// Mutable access to a slot, validated against `generation`.
    pub fn get_mut(&mut self, slot: u16, generation: u32) -> Option<&mut T> {
        let idx = slot as usize;
        if *self.generations.get(idx)? != generation {
            return None;
        }
        self.slots[idx].as_mut()
    }

    /// Number of occupied slots.
    pub fn live_len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Total slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is vacant.
    pub fn is_full(&self) -> bool {
        self.free_list.is_empty()
    }

    /// Whether every slot is vacant.
    pub fn is_empty(&self) -> bool {
        self.free_list.len() == self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_fills_in_slot_order() {
        let mut chunk: Chunk<i32> = Chunk::new(4);
        let (s0, _) = chunk.alloc(10).unwrap();
        let (s1, _) = chunk.alloc(11).unwrap();
        assert_eq!(s0, 0);
        assert_eq!(s1, 1);
        assert_eq!(chunk.live_len(), 2);
    }

    #[test]
    fn alloc_fails_when_full() {
        let mut chunk: Chunk<i32> = Chunk::new(2);
        chunk.alloc(1).unwrap();
        chunk.alloc(2).unwrap();
        assert!(chunk.is_full());
        assert!(chunk.alloc(3).is_none());
    }

    #[test]
    fn free_then_alloc_reuses_slot() {
        let mut chunk: Chunk<i32> = Chunk::new(2);
        let (slot, _) = chunk.alloc(1).unwrap();
        chunk.alloc(2).unwrap();
        assert_eq!(chunk.free(slot), Some(1));
        let (reused, _) = chunk.alloc(3).unwrap();
        assert_eq!(reused, slot);
    }

    #[test]
    fn generation_bumps_on_free() {
        let mut chunk: Chunk<i32> = Chunk::new(1);
        let (slot, gen0) = chunk.alloc(1).unwrap();
        chunk.free(slot);
        let (_, gen1) = chunk.alloc(2).unwrap();
        assert_eq!(gen1, gen0 + 1);
        // The old handle's generation no longer resolves.
        assert!(chunk.get(slot, gen0).is_none());
        assert_eq!(chunk.get(slot, gen1), Some(&2));
    }

    #[test]
    fn freed_slot_reads_as_vacant() {
        let mut chunk: Chunk<i32> = Chunk::new(1);
        let (slot, generation) = chunk.alloc(7).unwrap();
        chunk.free(slot);
        assert!(chunk.get(slot, generation).is_none());
        assert!(chunk.is_empty());
    }

    #[test]
    fn double_free_is_a_no_op() {
        let mut chunk: Chunk<i32> = Chunk::new(2);
        let (slot, _) = chunk.alloc(1).unwrap();
        assert_eq!(chunk.free(slot), Some(1));
        assert_eq!(chunk.free(slot), None);
        assert_eq!(chunk.live_len(), 0);
    }

    #[test]
    fn get_mut_respects_generation() {
        let mut chunk: Chunk<i32> = Chunk::new(1);
        let (slot, generation) = chunk.alloc(5).unwrap();
        *chunk.get_mut(slot, generation).unwrap() = 6;
        assert_eq!(chunk.get(slot, generation), Some(&6));
        assert!(chunk.get_mut(slot, generation + 1).is_none());
    }
}
