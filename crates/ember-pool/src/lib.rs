//! Chunked slot-pool allocation for the Ember particle effect runtime.
//!
//! High spawn rates would turn per-particle heap allocation into the
//! dominant cost of an effect. This crate provides [`SlotPool`], an
//! arena of fixed-capacity [`Chunk`]s addressed by generation-tagged
//! [`SlotHandle`]s:
//!
//! ```text
//! SlotPool<T>
//! └── Chunk<T>[] (fixed slot count, free-list reuse, never resized)
//!     └── slots: Option<T> + per-slot generation counter
//! ```
//!
//! A slot's address is stable for the whole lifetime of its occupant —
//! chunks are never resized or compacted; when every chunk is full a
//! new chunk is appended to the chain. Handles carry the generation the
//! slot had when the allocation was made, so a handle held across a
//! free-and-reuse is detected as stale in O(1) instead of silently
//! reading the new occupant.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod chunk;
pub mod config;
pub mod error;
pub mod handle;
pub mod pool;

pub use chunk::Chunk;
pub use config::PoolConfig;
pub use error::PoolError;
pub use handle::SlotHandle;
pub use pool::SlotPool;
