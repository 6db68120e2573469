//! Per-step diagnostics returned by [`Body::step`](crate::body::Body::step).

use serde::{Deserialize, Serialize};
use wobble_math::Mat3;

use crate::config::DeformationMode;
use crate::deformation::{AppliedMode, Fallback, FallbackReason};

/// A non-fatal condition encountered during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepWarning {
    /// Some current positions were NaN or infinite and were left out of the fit.
    NonFiniteInput { count: usize },
    /// Current and rest shapes both collapsed to a point; deformation skipped.
    DegenerateConfiguration,
    /// Every particle is pinned; deformation skipped.
    AllFixed,
    /// A deformation mode failed and a simpler one was used.
    Fallback {
        from: AppliedMode,
        to: AppliedMode,
        reason: FallbackReason,
    },
    /// Particles whose state became non-finite were reset to rest.
    ParticlesReset { count: usize },
}

impl From<Fallback> for StepWarning {
    fn from(f: Fallback) -> Self {
        StepWarning::Fallback {
            from: f.from,
            to: f.to,
            reason: f.reason,
        }
    }
}

/// Result of a single step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    /// Frame index of this step, starting at 0.
    pub frame: u64,
    /// Mode configured on the body.
    pub requested: DeformationMode,
    /// Mode that actually produced the goals.
    pub applied: AppliedMode,
    /// Rotation extracted this frame.
    pub rotation: Mat3,
    /// Non-fatal conditions, in the order encountered.
    pub warnings: Vec<StepWarning>,
    /// Particles reset to rest by the integrator.
    pub reset_count: usize,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

impl StepReport {
    /// Whether the step completed in the requested mode without warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.applied == AppliedMode::from(self.requested)
    }

    /// Fallbacks taken this step.
    pub fn fallbacks(&self) -> impl Iterator<Item = &StepWarning> {
        self.warnings
            .iter()
            .filter(|w| matches!(w, StepWarning::Fallback { .. }))
    }
}
