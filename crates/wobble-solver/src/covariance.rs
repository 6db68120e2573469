//! Covariance accumulation for shape matching.
//!
//! All inputs are positions relative to their centroids, index-aligned
//! with `masses`. Every term is validated before it is accumulated: a
//! term whose operands are non-finite is skipped. When no term survives
//! the identity (or identity block) is returned, so downstream inversion
//! and rotation extraction always receive a well-defined matrix.

use wobble_math::mat9::{quadratic_features, Mat3x9, Mat9};
use wobble_math::{outer, Mat3, Vec3};

#[inline]
fn weight(masses: &[f64], i: usize) -> Option<f64> {
    let m = masses.get(i).copied().unwrap_or(1.0);
    m.is_finite().then_some(m)
}

/// Cross-covariance `Apq = Σ mᵢ · pᵢ qᵢᵀ` of current (`p`) against rest (`q`).
pub fn cross_covariance(p: &[Vec3], q: &[Vec3], masses: &[f64]) -> Mat3 {
    let mut apq = Mat3::ZERO;
    let mut terms = 0;
    for (i, (&pi, &qi)) in p.iter().zip(q.iter()).enumerate() {
        let Some(m) = weight(masses, i) else { continue };
        if !pi.is_finite() || !qi.is_finite() {
            continue;
        }
        apq += outer(pi * m, qi);
        terms += 1;
    }
    if terms == 0 || !apq.is_finite() {
        return Mat3::IDENTITY;
    }
    apq
}

/// Auto-covariance `Aqq = Σ mᵢ · qᵢ qᵢᵀ` of the rest configuration.
pub fn auto_covariance(q: &[Vec3], masses: &[f64]) -> Mat3 {
    let mut aqq = Mat3::ZERO;
    let mut terms = 0;
    for (i, &qi) in q.iter().enumerate() {
        let Some(m) = weight(masses, i) else { continue };
        if !qi.is_finite() {
            continue;
        }
        aqq += outer(qi * m, qi);
        terms += 1;
    }
    if terms == 0 || !aqq.is_finite() {
        return Mat3::IDENTITY;
    }
    aqq
}

/// 9×9 auto-covariance `Σ mᵢ · q̃ᵢ q̃ᵢᵀ` over the quadratic features of `q`.
pub fn quadratic_auto_covariance(q: &[Vec3], masses: &[f64]) -> Mat9 {
    let mut aqq = Mat9::ZERO;
    let mut terms = 0;
    for (i, &qi) in q.iter().enumerate() {
        let Some(m) = weight(masses, i) else { continue };
        if !qi.is_finite() {
            continue;
        }
        let f = quadratic_features(qi);
        aqq.add_outer(&f, &f, m);
        terms += 1;
    }
    if terms == 0 || !aqq.is_finite() {
        return Mat9::IDENTITY;
    }
    aqq
}

/// 3×9 cross-covariance `Σ mᵢ · pᵢ q̃ᵢᵀ` of current positions against
/// the quadratic features of the rest positions.
pub fn quadratic_cross_covariance(p: &[Vec3], q: &[Vec3], masses: &[f64]) -> Mat3x9 {
    let mut apq = Mat3x9::ZERO;
    let mut terms = 0;
    for (i, (&pi, &qi)) in p.iter().zip(q.iter()).enumerate() {
        let Some(m) = weight(masses, i) else { continue };
        if !pi.is_finite() || !qi.is_finite() {
            continue;
        }
        apq.add_outer(pi, &quadratic_features(qi), m);
        terms += 1;
    }
    if terms == 0 || !apq.is_finite() {
        return Mat3x9::IDENTITY_BLOCK;
    }
    apq
}
