//! # wobble-types
//!
//! Shared types, identifiers, error types, and numeric constants
//! for the Wobble shape-matching deformation kernel.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Wobble crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{WobbleError, WobbleResult};
pub use ids::ParticleId;
