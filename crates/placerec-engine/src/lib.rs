//! Category-weighted multi-vector scoring.
//!
//! Fans one nearest-neighbor search per (category, vector) pair out against
//! the store, converts distances into weighted similarity scores, aggregates
//! them per entity, and returns everything above a dynamic threshold, best
//! first.

pub mod assemble;
pub mod engine;
pub mod policy;

pub use engine::RecommendationEngine;
pub use policy::WeightPolicy;
