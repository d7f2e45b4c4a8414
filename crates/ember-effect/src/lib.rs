//! Effect definition trees for the Ember particle effect runtime.
//!
//! An [`Effect`] is the static, read-only description of a particle
//! behavior tree: one [`EffectNode`] per emitter, each carrying an
//! emission schedule, lifetime and fade-out durations, a bind type, and
//! generation parameters (spawn-time random ranges plus age-driven
//! curves). Effects are built once through [`EffectBuilder`], validated
//! fail-fast, and then shared immutably (`Arc<Effect>`) across any
//! number of playbacks — the engine never mutates a definition.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod curve;
pub mod node;
pub mod params;
pub mod schedule;

pub use builder::EffectBuilder;
pub use curve::{ColorCurve, Curve};
pub use node::{Effect, EffectNode};
pub use params::{GenerationParams, RandomRange, RandomVec3};
pub use schedule::EmissionSchedule;
