//! The Ember instance hierarchy and lifecycle engine.
//!
//! This crate turns a static effect definition into a live, growing and
//! shrinking tree of particle instances and drives it frame by frame:
//!
//! ```text
//! Playback (one playing effect)
//! ├── PlaybackGlobal (time, seeded stream, live counter, stop flag)
//! ├── SlotPool<Instance> (chunked slot storage, stable handles)
//! └── InstanceContainer tree (mirrors the definition)
//!     └── InstanceGroup[] (one per emission generation)
//!         └── SlotHandle[] (owned instances, in spawn order)
//! ```
//!
//! Each `update(dt)` walks the tree top-down: existing instances age
//! and advance their state machine, finished ones are freed back to the
//! pool, and due emission events spawn new generations — strictly after
//! the existing ones updated, so a newborn is never advanced in its
//! spawn tick. Rendering is a separate `&self` walk that hands one
//! record per visible instance to a [`RenderSink`](ember_core::RenderSink).
//!
//! The engine is single-threaded and cooperative by design: no internal
//! threads, no locks. [`Playback`] is `Send`, so hosts may update
//! independent playbacks on worker threads; [`Stage`] drives many
//! playbacks from one owner.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod container;
mod context;
pub mod global;
pub mod group;
pub mod instance;
pub mod metrics;
pub mod playback;
pub mod stage;

pub use config::{PlayError, PlaybackConfig};
pub use container::InstanceContainer;
pub use global::PlaybackGlobal;
pub use group::InstanceGroup;
pub use instance::Instance;
pub use metrics::UpdateMetrics;
pub use playback::Playback;
pub use stage::Stage;
