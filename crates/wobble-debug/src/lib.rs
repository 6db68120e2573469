//! # wobble-debug
//!
//! Inspection hooks and body snapshots for debugging simulation issues.
//! Hooks observe the frame loop and its step reports; snapshots
//! serialize a full body to binary for replay and diffing.

pub mod hooks;
pub mod snapshot;

pub use hooks::{InspectionHook, TelemetryHook};
pub use snapshot::BodySnapshot;
