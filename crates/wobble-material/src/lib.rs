//! # wobble-material
//!
//! Named material presets for Wobble bodies.
//!
//! ## Design
//!
//! A [`MaterialPreset`] is a [`DeformationParams`](wobble_solver::DeformationParams)
//! plus a per-particle mass under a human-readable name. The
//! [`PresetDatabase`] stores the built-in presets (jelly, rubber, stiff,
//! putty, rigid) and accepts custom ones at runtime, so scene files can
//! refer to a material by name.

pub mod database;
pub mod properties;

pub use database::PresetDatabase;
pub use properties::MaterialPreset;
