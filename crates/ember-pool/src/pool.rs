//! The chunk chain.
//!
//! [`SlotPool`] strings [`Chunk`]s together and addresses them with
//! [`SlotHandle`]s. When every existing chunk is full a new chunk is
//! appended (up to [`PoolConfig::max_chunks`]) — existing chunks are
//! never resized, so slot addresses stay stable.

use crate::chunk::Chunk;
use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::handle::SlotHandle;

/// A growable chain of fixed-capacity chunks.
///
/// The pool starts with a single chunk and grows lazily. A cursor
/// remembers the chunk that last satisfied an allocation; frees anywhere
/// in the chain pull the cursor back so vacated slots are reused before
/// the chain grows.
pub struct SlotPool<T> {
    chunks: Vec<Chunk<T>>,
    config: PoolConfig,
    /// Index of the chunk to try first on the next alloc.
    cursor: usize,
}

impl<T> SlotPool<T> {
    /// Create a pool with one pre-allocated chunk.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let mut chunks = Vec::with_capacity(config.max_chunks as usize);
        chunks.push(Chunk::new(config.chunk_capacity));
        Ok(Self {
            chunks,
            config,
            cursor: 0,
        })
    }

    /// Allocate a slot for `value`, growing the chain if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::CapacityExceeded`] when every chunk is full
    /// and the chain is at `max_chunks`. The pool is unchanged and
    /// `value` is dropped.
    pub fn alloc(&mut self, value: T) -> Result<SlotHandle, PoolError> {
        // Try the cursor chunk first, then the rest of the chain.
        if !self.chunks[self.cursor].is_full() {
            return Ok(self.alloc_in(self.cursor, value));
        }
        if let Some(idx) = self.chunks.iter().position(|c| !c.is_full()) {
            self.cursor = idx;
            return Ok(self.alloc_in(idx, value));
        }

        // Every chunk is full — append a new one.
        if self.chunks.len() >= self.config.max_chunks as usize {
            return Err(PoolError::CapacityExceeded {
                live: self.live_len(),
                capacity: self.config.total_slots(),
            });
        }
        self.chunks.push(Chunk::new(self.config.chunk_capacity));
        self.cursor = self.chunks.len() - 1;
        Ok(self.alloc_in(self.cursor, value))
    }

    fn alloc_in(&mut self, chunk_idx: usize, value: T) -> SlotHandle {
        let (slot, generation) = self.chunks[chunk_idx]
            .alloc(value)
            .expect("chunk checked non-full before alloc");
        SlotHandle::new(chunk_idx as u16, slot, generation)
    }

    /// Free the slot behind `handle`, returning its payload.
    ///
    /// A stale or dangling handle returns `None` and leaves the pool
    /// unchanged.
    pub fn free(&mut self, handle: SlotHandle) -> Option<T> {
        let chunk_idx = handle.chunk as usize;
        let chunk = self.chunks.get_mut(chunk_idx)?;
        if chunk.get(handle.slot, handle.generation).is_none() {
            return None;
        }
        let value = chunk.free(handle.slot);
        if chunk_idx < self.cursor {
            self.cursor = chunk_idx;
        }
        value
    }

    /// Shared access to the slot behind `handle`.
    ///
    /// Returns `None` for stale or dangling handles.
    pub fn get(&self, handle: SlotHandle) -> Option<&T> {
        self.chunks
            .get(handle.chunk as usize)?
            .get(handle.slot, handle.generation)
    }

    /// Mutable access to the slot behind `handle`.
    pub fn get_mut(&mut self, handle: SlotHandle) -> Option<&mut T> {
        self.chunks
            .get_mut(handle.chunk as usize)?
            .get_mut(handle.slot, handle.generation)
    }

    /// Whether `handle` resolves to a live slot.
    pub fn contains(&self, handle: SlotHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of occupied slots across the chain.
    pub fn live_len(&self) -> usize {
        self.chunks.iter().map(|c| c.live_len()).sum()
    }

    /// Number of chunks currently allocated.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total slot storage currently allocated (live or vacant).
    pub fn memory_slots(&self) -> usize {
        self.chunks.iter().map(|c| c.capacity()).sum()
    }
}

impl<T> std::fmt::Debug for SlotPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlotPool")
            .field("live", &self.live_len())
            .field("chunks", &self.chunk_count())
            .field("chunk_capacity", &self.config.chunk_capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_pool() -> SlotPool<u32> {
        SlotPool::new(PoolConfig {
            chunk_capacity: 2,
            max_chunks: 3,
        })
        .unwrap()
    }

    #[test]
    fn alloc_within_first_chunk() {
        let mut pool = small_pool();
        let h = pool.alloc(7).unwrap();
        assert_eq!(h.chunk(), 0);
        assert_eq!(pool.get(h), Some(&7));
        assert_eq!(pool.live_len(), 1);
    }

    #[test]
    fn grows_a_chunk_on_overflow() {
        let mut pool = small_pool();
        pool.alloc(1).unwrap();
        pool.alloc(2).unwrap();
        let h = pool.alloc(3).unwrap();
        assert_eq!(h.chunk(), 1);
        assert_eq!(pool.chunk_count(), 2);
    }

    #[test]
    fn capacity_exceeded_past_max_chunks() {
        let mut pool = small_pool();
        for i in 0..6 {
            pool.alloc(i).unwrap();
        }
        assert_eq!(pool.chunk_count(), 3);
        let result = pool.alloc(99);
        assert!(matches!(result, Err(PoolError::CapacityExceeded { .. })));
        assert_eq!(pool.live_len(), 6);
    }

    #[test]
    fn freed_slots_are_reused_before_growth() {
        let mut pool = small_pool();
        let handles: Vec<_> = (0..4).map(|i| pool.alloc(i).unwrap()).collect();
        assert_eq!(pool.chunk_count(), 2);

        // Vacate a slot in the first chunk; the next alloc must land
        // there instead of growing a third chunk.
        pool.free(handles[0]).unwrap();
        let h = pool.alloc(10).unwrap();
        assert_eq!(h.chunk(), 0);
        assert_eq!(pool.chunk_count(), 2);
    }

    #[test]
    fn stale_handle_does_not_resolve() {
        let mut pool = small_pool();
        let h = pool.alloc(5).unwrap();
        pool.free(h).unwrap();
        let h2 = pool.alloc(6).unwrap();

        // Same physical slot, older generation.
        assert_eq!(h.chunk(), h2.chunk());
        assert_eq!(h.slot(), h2.slot());
        assert!(!pool.contains(h));
        assert_eq!(pool.get(h2), Some(&6));
    }

    #[test]
    fn double_free_returns_none() {
        let mut pool = small_pool();
        let h = pool.alloc(1).unwrap();
        assert_eq!(pool.free(h), Some(1));
        assert_eq!(pool.free(h), None);
        assert_eq!(pool.live_len(), 0);
    }

    #[test]
    fn reused_slot_starts_from_fresh_value() {
        let mut pool = small_pool();
        let h = pool.alloc(41).unwrap();
        *pool.get_mut(h).unwrap() = 42;
        pool.free(h).unwrap();

        let h2 = pool.alloc(0).unwrap();
        assert_eq!(pool.get(h2), Some(&0));
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let result: Result<SlotPool<u32>, _> = SlotPool::new(PoolConfig {
            chunk_capacity: 0,
            max_chunks: 1,
        });
        assert!(matches!(result, Err(PoolError::InvalidConfig { .. })));
    }

    #[test]
    fn memory_slots_counts_whole_chunks() {
        let mut pool = small_pool();
        assert_eq!(pool.memory_slots(), 2);
        pool.alloc(1).unwrap();
        pool.alloc(2).unwrap();
        pool.alloc(3).unwrap();
        assert_eq!(pool.memory_slots(), 4);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Live count always matches the number of un-freed allocs,
            /// and every live handle keeps resolving to its own value.
            #[test]
            fn alloc_free_interleave(ops in proptest::collection::vec(any::<bool>(), 1..200)) {
                let mut pool: SlotPool<usize> = SlotPool::new(PoolConfig {
                    chunk_capacity: 8,
                    max_chunks: 8,
                }).unwrap();
                let mut live: Vec<(SlotHandle, usize)> = Vec::new();

                for (i, is_alloc) in ops.into_iter().enumerate() {
                    if is_alloc || live.is_empty() {
                        if let Ok(h) = pool.alloc(i) {
                            live.push((h, i));
                        }
                    } else {
                        let (h, v) = live.swap_remove(i % live.len());
                        prop_assert_eq!(pool.free(h), Some(v));
                    }
                    prop_assert_eq!(pool.live_len(), live.len());
                }

                for (h, v) in &live {
                    prop_assert_eq!(pool.get(*h), Some(v));
                }
            }
        }
    }
}
