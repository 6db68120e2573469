//! Deformation configuration.
//!
//! Parameters that control how a body is matched to its rest shape and
//! how quickly it is pulled toward the resulting goal positions.

use serde::{Deserialize, Serialize};
use wobble_types::{WobbleError, WobbleResult};

/// Which best-fit transform drives the goal positions.
///
/// A closed set: dispatch is a single `match`, one pure function per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeformationMode {
    /// Pure rotation. `beta` is ignored (treated as 0).
    #[default]
    Rotation,
    /// Rotation blended with a volume-normalized 3×3 linear fit.
    Linear,
    /// Rotation blended with a 3×9 quadratic fit.
    Quadratic,
}

impl DeformationMode {
    /// Returns all modes, simplest first.
    pub fn all() -> &'static [DeformationMode] {
        &[
            DeformationMode::Rotation,
            DeformationMode::Linear,
            DeformationMode::Quadratic,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            DeformationMode::Rotation => "rotation",
            DeformationMode::Linear => "linear",
            DeformationMode::Quadratic => "quadratic",
        }
    }

    /// Parses a mode from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rotation" => Some(DeformationMode::Rotation),
            "linear" => Some(DeformationMode::Linear),
            "quadratic" => Some(DeformationMode::Quadratic),
            _ => None,
        }
    }
}

/// Configuration for a body's deformation and integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeformationParams {
    /// Active deformation mode.
    pub mode: DeformationMode,

    /// Blend factor in `[0, 1]` between the rotation fit (0) and the
    /// higher-order fit (1). Forced to 0 in rotation mode.
    pub beta: f64,

    /// Elasticity time constant (> 0). Smaller is stiffer.
    pub tau: f64,

    /// Regularization added to the auto-covariance diagonal before inversion (≥ 0).
    pub perturbation: f64,

    /// Linear velocity decay per step, in `[0, 1]`.
    pub damping: f64,

    /// Bound on relative-position and goal-offset lengths (> 0).
    pub max_displacement: f64,
}

impl Default for DeformationParams {
    fn default() -> Self {
        Self {
            mode: DeformationMode::Rotation,
            beta: 0.5,
            tau: 0.02,
            perturbation: 1.0e-4,
            damping: 0.05,
            max_displacement: 10.0,
        }
    }
}

impl DeformationParams {
    /// Rigid shape matching: rotation only, quick recovery.
    pub fn rigid() -> Self {
        Self {
            mode: DeformationMode::Rotation,
            beta: 0.0,
            ..Default::default()
        }
    }

    /// Linear mode with the given blend factor.
    pub fn linear(beta: f64) -> Self {
        Self {
            mode: DeformationMode::Linear,
            beta,
            ..Default::default()
        }
    }

    /// Quadratic mode with the given blend factor.
    pub fn quadratic(beta: f64) -> Self {
        Self {
            mode: DeformationMode::Quadratic,
            beta,
            ..Default::default()
        }
    }

    /// The blend factor actually used: 0 in rotation mode, `beta` otherwise.
    #[inline]
    pub fn effective_beta(&self) -> f64 {
        match self.mode {
            DeformationMode::Rotation => 0.0,
            DeformationMode::Linear | DeformationMode::Quadratic => self.beta,
        }
    }

    /// Checks every parameter against its documented range.
    pub fn validate(&self) -> WobbleResult<()> {
        if !(0.0..=1.0).contains(&self.beta) {
            return Err(WobbleError::InvalidConfig(format!(
                "beta must be in [0, 1], got {}",
                self.beta
            )));
        }
        if !self.tau.is_finite() || self.tau <= 0.0 {
            return Err(WobbleError::InvalidConfig(format!(
                "tau must be positive, got {}",
                self.tau
            )));
        }
        if !self.perturbation.is_finite() || self.perturbation < 0.0 {
            return Err(WobbleError::InvalidConfig(format!(
                "perturbation must be non-negative, got {}",
                self.perturbation
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(WobbleError::InvalidConfig(format!(
                "damping must be in [0, 1], got {}",
                self.damping
            )));
        }
        if !self.max_displacement.is_finite() || self.max_displacement <= 0.0 {
            return Err(WobbleError::InvalidConfig(format!(
                "max_displacement must be positive, got {}",
                self.max_displacement
            )));
        }
        Ok(())
    }
}
