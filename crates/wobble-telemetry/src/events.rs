//! Simulation event types.
//!
//! Structured events emitted around each frame of a body's simulation.
//! Events are plain values: mode names and reasons travel as strings so
//! that telemetry consumers do not depend on the solver crate.

use serde::{Deserialize, Serialize};

/// A simulation event, tagged with the frame it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Frame started.
    FrameBegin {
        /// Timestep requested for this frame (seconds).
        dt: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Mode that produced the goals (e.g. "linear").
        applied: String,
        /// Wall-clock time for the step (seconds).
        wall_time: f64,
    },

    /// A deformation mode failed and a simpler one took over.
    ModeFallback {
        from: String,
        to: String,
        reason: String,
    },

    /// Deformation was skipped; goals equal current positions.
    DeformationSkipped {
        /// "degenerate" or "all_fixed".
        reason: String,
    },

    /// Particles with non-finite current positions were seen.
    NonFiniteInput { count: usize },

    /// Particles were reset to rest after becoming non-finite.
    ParticlesRecovered { count: usize },

    /// Energy snapshot at the end of the frame.
    Energy {
        /// Kinetic energy (0.5 * m * v^2).
        kinetic: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl EventKind {
    /// Short label used by log sinks and CSV output.
    pub fn label(&self) -> &str {
        match self {
            EventKind::FrameBegin { .. } => "frame_begin",
            EventKind::FrameEnd { .. } => "frame_end",
            EventKind::ModeFallback { .. } => "mode_fallback",
            EventKind::DeformationSkipped { .. } => "deformation_skipped",
            EventKind::NonFiniteInput { .. } => "non_finite_input",
            EventKind::ParticlesRecovered { .. } => "particles_recovered",
            EventKind::Energy { .. } => "energy",
            EventKind::Custom { label, .. } => label,
        }
    }

    /// Whether this event reports a degraded frame.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            EventKind::ModeFallback { .. }
                | EventKind::DeformationSkipped { .. }
                | EventKind::NonFiniteInput { .. }
                | EventKind::ParticlesRecovered { .. }
        )
    }
}

impl SimulationEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}
