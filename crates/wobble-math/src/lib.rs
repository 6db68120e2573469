//! # wobble-math
//!
//! Linear algebra primitives for the Wobble shape-matching kernel.
//!
//! Provides:
//! - Double-precision `glam` types under the kernel's canonical names
//! - 9×9 and 3×9 matrices for quadratic shape matching, with a
//!   partial-pivoting Gauss–Jordan inverse
//! - Rotation extraction (iterative polar factor with Gram–Schmidt fallback)
//! - Numerical guards shared by every stage of the pipeline

pub mod decomposition;
pub mod guard;
pub mod mat9;

/// Canonical 3-vector of the kernel (`f64`).
pub type Vec3 = glam::DVec3;
/// Canonical 3×3 matrix of the kernel (`f64`, column-major).
pub type Mat3 = glam::DMat3;

pub use decomposition::{extract_rotation, gram_schmidt, RotationExtraction, RotationPath};
pub use mat9::{quadratic_features, Mat3x9, Mat9};

/// Outer product `a · bᵀ` as a 3×3 matrix.
#[inline]
pub fn outer(a: Vec3, b: Vec3) -> Mat3 {
    Mat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// Frobenius norm `sqrt(Σ m_ij²)`.
#[inline]
pub fn frobenius_norm(m: &Mat3) -> f64 {
    m.to_cols_array().iter().map(|v| v * v).sum::<f64>().sqrt()
}
