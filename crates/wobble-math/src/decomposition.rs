//! Rotation extraction from a cross-covariance matrix.
//!
//! Shape matching needs the rotational part `R` of the polar
//! decomposition `Apq = R·S`. The polar factor is unchanged by positive
//! scaling, so `Apq` is first normalized to unit Frobenius norm; the
//! singularity checks below then do not depend on the size of the body.
//! The extractor refines the normalized matrix toward its
//! orthogonal polar factor with a scaled Newton iteration, and drops to
//! a Gram–Schmidt orthonormalization of `Apq`'s columns whenever an
//! iterate is singular or non-finite.
//!
//! Whatever path is taken, the result is a proper rotation (det ≈ +1)
//! or the identity.

use wobble_types::constants::{
    AXIS_SNAP_THRESHOLD, DETERMINANT_TOLERANCE, MAX_POLAR_ITERATIONS, POLAR_CONVERGENCE,
    ROTATION_EPSILON,
};

use crate::guard;
use crate::{frobenius_norm, Mat3, Vec3};

/// Which branch produced the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationPath {
    /// Input was degenerate or non-finite; identity returned.
    Identity,
    /// Polar iteration converged (or ran out of steps) cleanly.
    Polar {
        /// Iterations performed.
        iterations: u32,
    },
    /// Polar iteration hit a singular iterate; Gram–Schmidt of `Apq` used.
    GramSchmidt,
}

/// Rotation plus a record of how it was obtained.
#[derive(Debug, Clone, Copy)]
pub struct RotationExtraction {
    /// Proper rotation matrix.
    pub rotation: Mat3,
    /// Branch taken.
    pub path: RotationPath,
    /// True if the final determinant check forced a re-orthonormalization.
    pub corrected: bool,
}

/// Extract a proper rotation from `apq`.
///
/// See [`extract_rotation_detailed`] for the branch record.
#[inline]
pub fn extract_rotation(apq: &Mat3) -> Mat3 {
    extract_rotation_detailed(apq).rotation
}

/// Extract a proper rotation from `apq`, reporting which branch was used.
///
/// 1. Degenerate (`‖Apq‖_F < ε`) or non-finite input → identity.
///    Otherwise `Apq` is divided by `‖Apq‖_F`.
/// 2. Up to [`MAX_POLAR_ITERATIONS`] steps of `R ← ½(γR + γ⁻¹R⁻ᵀ)`,
///    where `γ = sqrt(‖R⁻¹‖_F / ‖R‖_F)` rescales each iterate so large or
///    tiny covariances converge within the step budget.
/// 3. A singular or non-finite iterate abandons the iteration in favor of
///    [`gram_schmidt`] on `Apq`.
/// 4. If `|det R − 1|` exceeds [`DETERMINANT_TOLERANCE`], `R` is
///    re-orthonormalized with [`gram_schmidt`].
pub fn extract_rotation_detailed(apq: &Mat3) -> RotationExtraction {
    let norm = frobenius_norm(apq);
    if !guard::is_finite_mat3(apq) || !norm.is_finite() || norm < ROTATION_EPSILON {
        return RotationExtraction {
            rotation: Mat3::IDENTITY,
            path: RotationPath::Identity,
            corrected: false,
        };
    }

    let unit = *apq * (1.0 / norm);
    let (mut rotation, path) = match polar_iteration(&unit) {
        Some((r, iterations)) => (r, RotationPath::Polar { iterations }),
        None => (gram_schmidt(&unit), RotationPath::GramSchmidt),
    };

    let mut corrected = false;
    if (rotation.determinant() - 1.0).abs() > DETERMINANT_TOLERANCE {
        rotation = gram_schmidt(&rotation);
        corrected = true;
    }

    if !guard::is_finite_mat3(&rotation) {
        return RotationExtraction {
            rotation: Mat3::IDENTITY,
            path: RotationPath::Identity,
            corrected,
        };
    }

    RotationExtraction {
        rotation,
        path,
        corrected,
    }
}

/// Scaled Newton iteration toward the orthogonal polar factor.
///
/// `unit` has unit Frobenius norm. Returns `None` on the first singular
/// or non-finite iterate.
fn polar_iteration(unit: &Mat3) -> Option<(Mat3, u32)> {
    let mut r = *unit;
    let mut iterations = 0;

    for _ in 0..MAX_POLAR_ITERATIONS {
        let det = r.determinant();
        if guard::is_singular(det) {
            return None;
        }

        let inv_t = r.inverse().transpose();
        if !guard::is_finite_mat3(&inv_t) {
            return None;
        }

        let gamma = (frobenius_norm(&inv_t) / frobenius_norm(&r)).sqrt();
        if !gamma.is_finite() || gamma <= 0.0 {
            return None;
        }

        let next = (r * gamma + inv_t * (1.0 / gamma)) * 0.5;
        if !guard::is_finite_mat3(&next) {
            return None;
        }

        let delta = frobenius_norm(&(next - r));
        r = next;
        iterations += 1;

        if delta < POLAR_CONVERGENCE {
            break;
        }
    }

    Some((r, iterations))
}

/// Orthonormalize the columns of `m` into a proper rotation.
///
/// Each candidate basis vector that lies within the snap cone of a
/// coordinate axis (|dot| > [`AXIS_SNAP_THRESHOLD`]) is replaced by that
/// axis, which keeps box-like meshes from shearing into non-orthogonal
/// frames. The third column is always `c0 × c1`, so `det = +1`.
/// Degenerate columns are replaced by an arbitrary perpendicular.
pub fn gram_schmidt(m: &Mat3) -> Mat3 {
    let c0 = match m.x_axis.try_normalize() {
        Some(v) if v.is_finite() => snap_to_axis(v),
        _ => Vec3::X,
    };

    let projected = m.y_axis - c0 * m.y_axis.dot(c0);
    let c1 = match projected.try_normalize() {
        Some(v) if v.is_finite() => {
            let snapped = snap_to_axis(v);
            // Only accept the snap if it keeps the basis orthogonal.
            if snapped.dot(c0).abs() < 1e-9 {
                snapped
            } else {
                v
            }
        }
        _ => fallback_perpendicular(c0, m.z_axis),
    };

    let c2 = c0.cross(c1);
    Mat3::from_cols(c0, c1, c2)
}

/// Snap a unit vector onto the nearest signed coordinate axis when close enough.
fn snap_to_axis(v: Vec3) -> Vec3 {
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        let d = v.dot(axis);
        if d.abs() > AXIS_SNAP_THRESHOLD {
            return axis * d.signum();
        }
    }
    v
}

/// A unit vector perpendicular to `c0`, preferring the direction of `hint`.
fn fallback_perpendicular(c0: Vec3, hint: Vec3) -> Vec3 {
    let from_hint = hint - c0 * hint.dot(c0);
    match from_hint.try_normalize() {
        Some(v) if v.is_finite() => v,
        _ => c0.any_orthonormal_vector(),
    }
}
