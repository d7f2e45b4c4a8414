//! Ember: a real-time particle effect runtime.
//!
//! This is the top-level facade crate that re-exports the public API
//! from all Ember sub-crates. For most users, adding `ember` as a
//! single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ember::prelude::*;
//!
//! // A burst of ten sprites under an invisible root.
//! let mut builder = EffectBuilder::new("sparks");
//! let mut root = EffectNode::new("root", NodeKind::Root);
//! root.lifetime = 5.0;
//! let root_id = builder.node(root);
//!
//! let mut spark = EffectNode::new("spark", NodeKind::Sprite);
//! spark.emission = EmissionSchedule::burst(10);
//! spark.lifetime = 1.0;
//! spark.removal_duration = 0.5;
//! let spark_id = builder.node(spark);
//! builder.attach(root_id, spark_id).unwrap();
//! let effect = std::sync::Arc::new(builder.build().unwrap());
//!
//! // Play it and drive one frame.
//! let mut playback = Playback::new(effect, PlaybackConfig::seeded(42)).unwrap();
//! playback.update(0.016);
//!
//! let mut records: Vec<RenderRecord> = Vec::new();
//! playback.collect(&mut records);
//! assert_eq!(records.len(), 10);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ember-core` | IDs, state machine, bind types, errors, render boundary |
//! | [`pool`] | `ember-pool` | Chunked slot pool and generation-tagged handles |
//! | [`effect`] | `ember-effect` | Definition trees, schedules, curves, builder |
//! | [`engine`] | `ember-engine` | Playbacks, the live instance tree, the stage |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`ember-core`).
///
/// Contains the instance state machine, bind types, node kinds, error
/// types, and the [`types::RenderSink`] boundary.
pub use ember_core as types;

/// Chunked slot pool allocation (`ember-pool`).
///
/// [`pool::SlotPool`] and [`pool::SlotHandle`] back every live
/// instance; most users never touch them directly.
pub use ember_pool as pool;

/// Effect definition trees (`ember-effect`).
///
/// Build immutable [`effect::Effect`]s with [`effect::EffectBuilder`],
/// then share them across playbacks with `Arc`.
pub use ember_effect as effect;

/// The live instance hierarchy and lifecycle engine (`ember-engine`).
///
/// [`engine::Playback`] drives one playing effect;
/// [`engine::Stage`] drives many.
pub use ember_engine as engine;

/// Common imports for typical Ember usage.
///
/// ```rust
/// use ember::prelude::*;
/// ```
pub mod prelude {
    // Core vocabulary
    pub use ember_core::{
        BindType, InstanceState, NodeId, NodeKind, PlaybackId, RenderRecord, RenderSink,
    };

    // Errors
    pub use ember_core::{SpawnError, StructureError};
    pub use ember_pool::PoolError;

    // Definitions
    pub use ember_effect::{
        ColorCurve, Curve, Effect, EffectBuilder, EffectNode, EmissionSchedule, GenerationParams,
        RandomRange, RandomVec3,
    };

    // Pool
    pub use ember_pool::{PoolConfig, SlotHandle, SlotPool};

    // Engine
    pub use ember_engine::{
        PlayError, Playback, PlaybackConfig, PlaybackGlobal, Stage, UpdateMetrics,
    };
}
