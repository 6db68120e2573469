//! Deformation solver — goal positions from a best-fit transform.
//!
//! Given the current and rest point clouds, the solver fits a transform
//! mapping rest onto current and returns, per particle, where that
//! transform says the particle should be. Three fits are available:
//!
//! - **Rotation** — `goal = R·q + c`
//! - **Linear** — `goal = (β·A + (1−β)·R)·q + c`, `A = Apq·Aqq⁻¹`
//! - **Quadratic** — `goal = (β·Ã + (1−β)·[R|0])·q̃ + c`
//!
//! A fit that hits a singular matrix or produces non-finite values hands
//! over to the next simpler one: Quadratic → Linear → Rotation → Identity.
//! Identity (`goal = q + c`) cannot fail, so the chain always terminates.
//!
//! Pinned particles take no part in the fit. Centroids and covariances
//! use the movable particles only, and each pinned particle's goal is its
//! current position.

use wobble_math::decomposition::extract_rotation_detailed;
use wobble_math::guard;
use wobble_math::mat9::{quadratic_features, Mat3x9};
use wobble_math::{Mat3, Vec3};
use wobble_types::constants::{MAX_TRANSFORM_ELEMENT, VOLUME_SCALE_MAX, VOLUME_SCALE_MIN};

use crate::centroid::centroid_of;
use crate::config::{DeformationMode, DeformationParams};
use crate::covariance::{
    auto_covariance, cross_covariance, quadratic_auto_covariance, quadratic_cross_covariance,
};

/// The fit that actually produced a frame's goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppliedMode {
    /// Quadratic fit.
    Quadratic,
    /// Linear fit.
    Linear,
    /// Rotation fit.
    Rotation,
    /// Terminal fallback: rest shape translated to the current centroid.
    Identity,
    /// Deformation skipped this frame; goals equal current positions.
    Skipped,
}

impl AppliedMode {
    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            AppliedMode::Quadratic => "quadratic",
            AppliedMode::Linear => "linear",
            AppliedMode::Rotation => "rotation",
            AppliedMode::Identity => "identity",
            AppliedMode::Skipped => "skipped",
        }
    }
}

impl From<DeformationMode> for AppliedMode {
    fn from(mode: DeformationMode) -> Self {
        match mode {
            DeformationMode::Rotation => AppliedMode::Rotation,
            DeformationMode::Linear => AppliedMode::Linear,
            DeformationMode::Quadratic => AppliedMode::Quadratic,
        }
    }
}

/// Why a fit was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// A required matrix had `|det|` below the singularity threshold.
    SingularMatrix,
    /// The fit produced a non-finite transform or goal.
    NonFinite,
}

/// One step down the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fallback {
    /// The fit that failed.
    pub from: AppliedMode,
    /// The fit tried next.
    pub to: AppliedMode,
    /// Why `from` failed.
    pub reason: FallbackReason,
}

/// Goal positions for one frame, with a record of how they were found.
#[derive(Debug, Clone)]
pub struct Deformation {
    /// One goal per particle, index-aligned with the input.
    pub goals: Vec<Vec3>,
    /// Fit that produced the goals.
    pub applied: AppliedMode,
    /// Rotation extracted from `Apq` (identity when the fit was skipped).
    pub rotation: Mat3,
    /// Current-frame centroid of the movable particles.
    pub centroid: Vec3,
    /// Fallbacks taken, in order.
    pub fallbacks: Vec<Fallback>,
    /// Particles whose current position was non-finite.
    pub non_finite_inputs: usize,
    /// Both relative-position sets were near zero; deformation skipped.
    pub degenerate: bool,
    /// Every particle is pinned; deformation skipped.
    pub all_fixed: bool,
}

impl Deformation {
    fn skipped(current: &[Vec3], non_finite_inputs: usize) -> Self {
        Self {
            goals: current.to_vec(),
            applied: AppliedMode::Skipped,
            rotation: Mat3::IDENTITY,
            centroid: Vec3::ZERO,
            fallbacks: Vec::new(),
            non_finite_inputs,
            degenerate: false,
            all_fixed: false,
        }
    }
}

/// Movable-particle data in compact, index-aligned form.
struct Frame<'a> {
    /// Current positions relative to the current centroid (clamped).
    p: Vec<Vec3>,
    /// Rest positions relative to the rest centroid.
    q: Vec<Vec3>,
    /// Masses of the movable particles.
    m: Vec<f64>,
    params: &'a DeformationParams,
}

/// Compute goal positions for every particle.
///
/// `current`, `rest`, `masses` and `fixed` must all have the same length;
/// [`Body`](crate::body::Body) enforces that before calling in.
pub fn compute_goals(
    current: &[Vec3],
    rest: &[Vec3],
    masses: &[f64],
    fixed: &[bool],
    params: &DeformationParams,
) -> Deformation {
    let non_finite_inputs = current.iter().filter(|p| !p.is_finite()).count();
    let movable: Vec<usize> = (0..current.len()).filter(|&i| !fixed[i]).collect();

    if movable.is_empty() {
        tracing::warn!(particles = current.len(), "all particles fixed, deformation skipped");
        let mut out = Deformation::skipped(current, non_finite_inputs);
        out.all_fixed = true;
        return out;
    }

    let c = centroid_of(current, masses, movable.iter().copied()).point;
    let c0 = centroid_of(rest, masses, movable.iter().copied()).point;

    let max_len = params.max_displacement;
    let frame = Frame {
        p: movable
            .iter()
            .map(|&i| {
                let rel = current[i] - c;
                // Non-finite terms stay non-finite so the covariance skips them.
                if rel.is_finite() {
                    guard::clamp_length(rel, max_len)
                } else {
                    rel
                }
            })
            .collect(),
        q: movable.iter().map(|&i| rest[i] - c0).collect(),
        m: movable.iter().map(|&i| masses[i]).collect(),
        params,
    };

    if guard::is_degenerate(guard::total_magnitude(&frame.p))
        && guard::is_degenerate(guard::total_magnitude(&frame.q))
    {
        tracing::debug!("degenerate configuration, deformation skipped");
        let mut out = Deformation::skipped(current, non_finite_inputs);
        out.centroid = c;
        out.degenerate = true;
        return out;
    }

    let apq = cross_covariance(&frame.p, &frame.q, &frame.m);
    let rotation = extract_rotation_detailed(&apq).rotation;

    let mut fallbacks = Vec::new();
    let mut mode = AppliedMode::from(params.mode);
    let offsets = loop {
        let attempt = match mode {
            AppliedMode::Quadratic => quadratic_offsets(&frame, &rotation),
            AppliedMode::Linear => linear_offsets(&frame, &apq, &rotation),
            AppliedMode::Rotation => rotation_offsets(&frame, &rotation),
            AppliedMode::Identity | AppliedMode::Skipped => break frame.q.clone(),
        };
        match attempt {
            Ok(offsets) => break offsets,
            Err(reason) => {
                let next = simpler(mode);
                tracing::warn!(
                    from = mode.name(),
                    to = next.name(),
                    ?reason,
                    "deformation mode fell back"
                );
                fallbacks.push(Fallback {
                    from: mode,
                    to: next,
                    reason,
                });
                mode = next;
            }
        }
    };

    let mut goals = current.to_vec();
    for (k, &i) in movable.iter().enumerate() {
        goals[i] = c + guard::clamp_length(offsets[k], max_len);
    }

    Deformation {
        goals,
        applied: mode,
        rotation,
        centroid: c,
        fallbacks,
        non_finite_inputs,
        degenerate: false,
        all_fixed: false,
    }
}

/// Next fit down the chain.
fn simpler(mode: AppliedMode) -> AppliedMode {
    match mode {
        AppliedMode::Quadratic => AppliedMode::Linear,
        AppliedMode::Linear => AppliedMode::Rotation,
        AppliedMode::Rotation | AppliedMode::Identity | AppliedMode::Skipped => {
            AppliedMode::Identity
        }
    }
}

fn finite_offsets(offsets: Vec<Vec3>) -> Result<Vec<Vec3>, FallbackReason> {
    if guard::all_finite(&offsets) {
        Ok(offsets)
    } else {
        Err(FallbackReason::NonFinite)
    }
}

/// Rotation fit: `R·q`. β is always 0 here.
fn rotation_offsets(frame: &Frame<'_>, rotation: &Mat3) -> Result<Vec<Vec3>, FallbackReason> {
    if !guard::is_finite_mat3(rotation) {
        return Err(FallbackReason::NonFinite);
    }
    finite_offsets(frame.q.iter().map(|&q| *rotation * q).collect())
}

/// Linear fit: `(β·A + (1−β)·R)·q`.
fn linear_offsets(
    frame: &Frame<'_>,
    apq: &Mat3,
    rotation: &Mat3,
) -> Result<Vec<Vec3>, FallbackReason> {
    let params = frame.params;

    let aqq = auto_covariance(&frame.q, &frame.m)
        + Mat3::from_diagonal(Vec3::splat(params.perturbation));
    if guard::is_singular(aqq.determinant()) {
        return Err(FallbackReason::SingularMatrix);
    }
    let aqq_inv = aqq.inverse();
    if !guard::is_finite_mat3(&aqq_inv) {
        return Err(FallbackReason::NonFinite);
    }

    let a = *apq * aqq_inv;
    let det = a.determinant();
    if guard::is_singular(det) {
        return Err(FallbackReason::SingularMatrix);
    }

    // Volume preservation: scale so |det A| ≈ 1.
    let scale = det.abs().cbrt().clamp(VOLUME_SCALE_MIN, VOLUME_SCALE_MAX);
    let a = guard::clamp_elements(&(a * (1.0 / scale)), MAX_TRANSFORM_ELEMENT);

    let beta = params.effective_beta();
    let t = a * beta + *rotation * (1.0 - beta);
    if !guard::is_finite_mat3(&t) {
        return Err(FallbackReason::NonFinite);
    }

    finite_offsets(frame.q.iter().map(|&q| t * q).collect())
}

/// Quadratic fit: `(β·Ã + (1−β)·[R|0])·q̃`.
fn quadratic_offsets(frame: &Frame<'_>, rotation: &Mat3) -> Result<Vec<Vec3>, FallbackReason> {
    let params = frame.params;

    let mut aqq = quadratic_auto_covariance(&frame.q, &frame.m);
    aqq.add_diagonal(params.perturbation);
    let Some((aqq_inv, det)) = aqq.inverse_with_determinant() else {
        return Err(FallbackReason::SingularMatrix);
    };
    if guard::is_singular(det) {
        return Err(FallbackReason::SingularMatrix);
    }

    let apq = quadratic_cross_covariance(&frame.p, &frame.q, &frame.m);
    let a = guard::clamp_elements_3x9(&apq.mul_mat9(&aqq_inv), MAX_TRANSFORM_ELEMENT);

    let beta = params.effective_beta();
    let t = a.blend(beta, &Mat3x9::from_linear_block(rotation), 1.0 - beta);
    if !t.is_finite() {
        return Err(FallbackReason::NonFinite);
    }

    finite_offsets(
        frame
            .q
            .iter()
            .map(|&q| t.mul_features(&quadratic_features(q)))
            .collect(),
    )
}
