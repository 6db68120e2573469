//! Stability guard — the numerical checks every pipeline stage shares.
//!
//! Centroid, covariance, rotation, deformation, and integration all call
//! into these helpers instead of re-implementing their own finiteness,
//! singularity, and magnitude checks. Keeping the thresholds in one place
//! means one adversarial frame is judged the same way everywhere.

use wobble_types::constants::{DEGENERATE_MAGNITUDE, SINGULAR_DET_THRESHOLD};

use crate::mat9::Mat3x9;
use crate::{Mat3, Vec3};

/// Returns true if all three components are finite.
#[inline]
pub fn is_finite_vec(v: Vec3) -> bool {
    v.is_finite()
}

/// Returns true if every point in the slice is finite.
pub fn all_finite(points: &[Vec3]) -> bool {
    points.iter().all(|p| p.is_finite())
}

/// Returns true if every element of the matrix is finite.
#[inline]
pub fn is_finite_mat3(m: &Mat3) -> bool {
    m.is_finite()
}

/// A determinant is singular when it is non-finite or below the shared threshold.
#[inline]
pub fn is_singular(det: f64) -> bool {
    !det.is_finite() || det.abs() < SINGULAR_DET_THRESHOLD
}

/// A relative-position magnitude is degenerate when it is below the shared threshold.
#[inline]
pub fn is_degenerate(magnitude: f64) -> bool {
    !magnitude.is_finite() || magnitude < DEGENERATE_MAGNITUDE
}

/// Masses must be finite and strictly positive; anything else becomes 1.0.
#[inline]
pub fn sanitize_mass(mass: f64) -> f64 {
    if mass.is_finite() && mass > 0.0 {
        mass
    } else {
        1.0
    }
}

/// Scale `v` down so its length does not exceed `max_len`.
///
/// Non-finite vectors collapse to zero.
#[inline]
pub fn clamp_length(v: Vec3, max_len: f64) -> Vec3 {
    if !v.is_finite() {
        return Vec3::ZERO;
    }
    let len_sq = v.length_squared();
    if len_sq > max_len * max_len {
        v * (max_len / len_sq.sqrt())
    } else {
        v
    }
}

/// Clamp every element of a 3×3 matrix to `[-bound, bound]`.
pub fn clamp_elements(m: &Mat3, bound: f64) -> Mat3 {
    let mut cols = m.to_cols_array();
    for v in cols.iter_mut() {
        *v = v.clamp(-bound, bound);
    }
    Mat3::from_cols_array(&cols)
}

/// Clamp every element of a 3×9 matrix to `[-bound, bound]`.
pub fn clamp_elements_3x9(m: &Mat3x9, bound: f64) -> Mat3x9 {
    let mut out = *m;
    for v in out.rows.iter_mut().flatten() {
        *v = v.clamp(-bound, bound);
    }
    out
}

/// Root of the summed squared lengths, `sqrt(Σ |v|²)`.
///
/// Non-finite entries are ignored.
pub fn total_magnitude(points: &[Vec3]) -> f64 {
    points
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| p.length_squared())
        .sum::<f64>()
        .sqrt()
}
