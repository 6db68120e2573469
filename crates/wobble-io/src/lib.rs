//! # wobble-io
//!
//! Scene input/output contract and validation.
//!
//! Defines the boundary types that external systems (CLI, scripts, host
//! adapters) use to describe a body, how it is driven frame by frame,
//! and what a run produced. Scenes are written in TOML; meshes may be
//! referenced as JSON files.

pub mod contract;
pub mod validator;

pub use contract::{Drag, FrameDrive, SceneInput, SceneMetrics, SceneOutput, ShapeSpec};
pub use validator::{validate_input, validate_mesh_json};
