//! 9×9 and 3×9 matrix types for quadratic shape matching.
//!
//! Quadratic deformation lifts each rest-relative position `q` into the
//! feature vector `q̃ = [x, y, z, x², y², z², xy, yz, zx]`. The fit then
//! needs the 9×9 auto-covariance `Σ m q̃ q̃ᵀ`, its inverse, and 3×9
//! transforms that map `q̃` back to 3D.
//!
//! Both types are row-major. The size is fixed, so the inverse is a
//! closed Gauss–Jordan loop with no general-purpose solver behind it.

use serde::{Deserialize, Serialize};
use wobble_types::constants::PIVOT_EPSILON;

use crate::{Mat3, Vec3};

/// Lift a rest-relative position into the 9-component quadratic basis.
#[inline]
pub fn quadratic_features(q: Vec3) -> [f64; 9] {
    [
        q.x,
        q.y,
        q.z,
        q.x * q.x,
        q.y * q.y,
        q.z * q.z,
        q.x * q.y,
        q.y * q.z,
        q.z * q.x,
    ]
}

/// A 9×9 row-major matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat9 {
    /// `rows[i][j]` is the element at row `i`, column `j`.
    pub rows: [[f64; 9]; 9],
}

impl Mat9 {
    /// The zero matrix.
    pub const ZERO: Self = Self {
        rows: [[0.0; 9]; 9],
    };

    /// The identity matrix.
    pub const IDENTITY: Self = {
        let mut rows = [[0.0; 9]; 9];
        let mut i = 0;
        while i < 9 {
            rows[i][i] = 1.0;
            i += 1;
        }
        Self { rows }
    };

    /// Accumulate `weight · a · bᵀ` into this matrix.
    #[inline]
    pub fn add_outer(&mut self, a: &[f64; 9], b: &[f64; 9], weight: f64) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            let wa = weight * a[i];
            for (j, v) in row.iter_mut().enumerate() {
                *v += wa * b[j];
            }
        }
    }

    /// Add `value` to every diagonal element.
    pub fn add_diagonal(&mut self, value: f64) {
        for i in 0..9 {
            self.rows[i][i] += value;
        }
    }

    /// Returns true if every element is finite.
    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }

    /// Matrix-vector product.
    pub fn mul_vec(&self, v: &[f64; 9]) -> [f64; 9] {
        let mut out = [0.0; 9];
        for (o, row) in out.iter_mut().zip(self.rows.iter()) {
            *o = row.iter().zip(v.iter()).map(|(a, b)| a * b).sum();
        }
        out
    }

    /// Matrix product `self · rhs`.
    pub fn mul_mat(&self, rhs: &Mat9) -> Mat9 {
        let mut out = Mat9::ZERO;
        for i in 0..9 {
            for k in 0..9 {
                let a = self.rows[i][k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..9 {
                    out.rows[i][j] += a * rhs.rows[k][j];
                }
            }
        }
        out
    }

    /// Invert by Gauss–Jordan elimination with partial pivoting.
    ///
    /// Returns the inverse together with the determinant (the signed
    /// product of the pivots), or `None` when a pivot vanishes or the
    /// elimination produces non-finite values. Callers apply their own
    /// singularity threshold to the returned determinant.
    pub fn inverse_with_determinant(&self) -> Option<(Mat9, f64)> {
        let mut a = self.rows;
        let mut inv = Mat9::IDENTITY.rows;
        let mut det = 1.0_f64;

        for col in 0..9 {
            // Partial pivot: largest magnitude in this column at or below the diagonal.
            let mut pivot_row = col;
            let mut pivot_mag = a[col][col].abs();
            for (r, row) in a.iter().enumerate().skip(col + 1) {
                let mag = row[col].abs();
                if mag > pivot_mag {
                    pivot_mag = mag;
                    pivot_row = r;
                }
            }

            if !pivot_mag.is_finite() || pivot_mag < PIVOT_EPSILON {
                return None;
            }

            if pivot_row != col {
                a.swap(pivot_row, col);
                inv.swap(pivot_row, col);
                det = -det;
            }

            let pivot = a[col][col];
            det *= pivot;
            let inv_pivot = 1.0 / pivot;
            for j in 0..9 {
                a[col][j] *= inv_pivot;
                inv[col][j] *= inv_pivot;
            }

            for r in 0..9 {
                if r == col {
                    continue;
                }
                let factor = a[r][col];
                if factor == 0.0 {
                    continue;
                }
                for j in 0..9 {
                    a[r][j] -= factor * a[col][j];
                    inv[r][j] -= factor * inv[col][j];
                }
            }
        }

        let inverse = Mat9 { rows: inv };
        if !det.is_finite() || !inverse.is_finite() {
            return None;
        }
        Some((inverse, det))
    }
}

impl Default for Mat9 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A 3×9 row-major matrix mapping quadratic features to 3D.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat3x9 {
    /// `rows[i][j]` is the element at row `i`, column `j`.
    pub rows: [[f64; 9]; 3],
}

impl Mat3x9 {
    /// The zero matrix.
    pub const ZERO: Self = Self {
        rows: [[0.0; 9]; 3],
    };

    /// `[I | 0]`: reproduces the linear part of `q̃` and ignores the rest.
    pub const IDENTITY_BLOCK: Self = Self {
        rows: [
            [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ],
    };

    /// Embed a 3×3 matrix in the first three columns, zeros elsewhere.
    pub fn from_linear_block(m: &Mat3) -> Self {
        let mut out = Self::ZERO;
        for (i, row) in out.rows.iter_mut().enumerate() {
            let r = m.row(i);
            row[0] = r.x;
            row[1] = r.y;
            row[2] = r.z;
        }
        out
    }

    /// The first three columns as a 3×3 matrix.
    pub fn linear_block(&self) -> Mat3 {
        Mat3::from_cols(
            Vec3::new(self.rows[0][0], self.rows[1][0], self.rows[2][0]),
            Vec3::new(self.rows[0][1], self.rows[1][1], self.rows[2][1]),
            Vec3::new(self.rows[0][2], self.rows[1][2], self.rows[2][2]),
        )
    }

    /// Accumulate `weight · p · q̃ᵀ`.
    #[inline]
    pub fn add_outer(&mut self, p: Vec3, q: &[f64; 9], weight: f64) {
        let wp = [weight * p.x, weight * p.y, weight * p.z];
        for (row, w) in self.rows.iter_mut().zip(wp) {
            for (v, qj) in row.iter_mut().zip(q.iter()) {
                *v += w * qj;
            }
        }
    }

    /// Product with a 9×9 matrix.
    pub fn mul_mat9(&self, rhs: &Mat9) -> Mat3x9 {
        let mut out = Mat3x9::ZERO;
        for i in 0..3 {
            for k in 0..9 {
                let a = self.rows[i][k];
                if a == 0.0 {
                    continue;
                }
                for j in 0..9 {
                    out.rows[i][j] += a * rhs.rows[k][j];
                }
            }
        }
        out
    }

    /// Apply to a feature vector.
    #[inline]
    pub fn mul_features(&self, q: &[f64; 9]) -> Vec3 {
        let dot = |row: &[f64; 9]| row.iter().zip(q.iter()).map(|(a, b)| a * b).sum::<f64>();
        Vec3::new(dot(&self.rows[0]), dot(&self.rows[1]), dot(&self.rows[2]))
    }

    /// `self · a + other · b`, element-wise.
    pub fn blend(&self, a: f64, other: &Mat3x9, b: f64) -> Mat3x9 {
        let mut out = Mat3x9::ZERO;
        for i in 0..3 {
            for j in 0..9 {
                out.rows[i][j] = self.rows[i][j] * a + other.rows[i][j] * b;
            }
        }
        out
    }

    /// Returns true if every element is finite.
    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }

    /// Largest absolute element.
    pub fn max_abs(&self) -> f64 {
        self.rows.iter().flatten().fold(0.0, |acc, v| acc.max(v.abs()))
    }
}

impl Default for Mat3x9 {
    fn default() -> Self {
        Self::ZERO
    }
}
