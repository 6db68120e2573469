//! Numerical tolerances and simulation defaults.

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f64 = 1.0 / 60.0;

/// Gravitational acceleration (m/s²) used by the procedural scenarios.
pub const GRAVITY: f64 = 9.81;

/// A matrix whose determinant magnitude is below this value is singular.
///
/// Applied uniformly to the 3×3 and 9×9 inversions and to the
/// polar-iteration iterates.
pub const SINGULAR_DET_THRESHOLD: f64 = 1.0e-8;

/// Relative-position magnitude below which a configuration is degenerate.
pub const DEGENERATE_MAGNITUDE: f64 = 1.0e-10;

/// Frobenius norm below which a covariance matrix carries no orientation.
pub const ROTATION_EPSILON: f64 = 1.0e-12;

/// Upper bound on polar-decomposition refinement steps.
pub const MAX_POLAR_ITERATIONS: u32 = 10;

/// Polar iteration stops once successive iterates differ by less than this.
pub const POLAR_CONVERGENCE: f64 = 1.0e-14;

/// Allowed distance of `det(R)` from 1.0 before re-orthonormalization.
pub const DETERMINANT_TOLERANCE: f64 = 0.1;

/// A Gram–Schmidt basis vector whose dot product with a coordinate axis
/// exceeds this is snapped onto that axis.
pub const AXIS_SNAP_THRESHOLD: f64 = 0.8;

/// Clamp range for the volume-normalization scale `cbrt(|det A|)`.
pub const VOLUME_SCALE_MIN: f64 = 0.1;
/// See [`VOLUME_SCALE_MIN`].
pub const VOLUME_SCALE_MAX: f64 = 10.0;

/// Magnitude bound on every element of a linear or quadratic transform.
pub const MAX_TRANSFORM_ELEMENT: f64 = 5.0;

/// Gauss–Jordan pivots smaller than this abort the elimination.
pub const PIVOT_EPSILON: f64 = 1.0e-14;
