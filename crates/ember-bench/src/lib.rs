//! Benchmark crate for the Ember particle effect runtime.
//!
//! Contains no library code — see the `benches/` directory.
