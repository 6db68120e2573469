//! # wobble-solver
//!
//! Meshless shape matching and elastic integration.
//!
//! ## Key Types
//!
//! - [`Body`] — Owns a deformable point set and advances it frame by frame
//! - [`DeformationParams`] — Mode, blend factor, stiffness and damping
//! - [`StepReport`] — What a step did: applied mode, rotation, warnings
//! - [`deformation::compute_goals`] — Best-fit goal positions with the
//!   Quadratic → Linear → Rotation → Identity fallback chain

pub mod body;
pub mod centroid;
pub mod config;
pub mod covariance;
pub mod deformation;
pub mod integrator;
pub mod report;
pub mod state;

pub use body::Body;
pub use config::{DeformationMode, DeformationParams};
pub use deformation::{AppliedMode, Deformation, Fallback, FallbackReason};
pub use report::{StepReport, StepWarning};
pub use state::ParticleState;
