//! Centroid calculation.
//!
//! The centroid never comes back non-finite: points with non-finite
//! coordinates are left out of the sum and counted, and an empty
//! selection yields the origin.

use wobble_math::Vec3;

/// Result of a centroid computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    /// The (mass-weighted) mean position.
    pub point: Vec3,
    /// Points that contributed.
    pub used: usize,
    /// Points excluded because their coordinates were non-finite.
    pub skipped: usize,
}

/// Mass-weighted centroid of every point.
///
/// Points without a matching mass entry weigh 1.0.
pub fn centroid(points: &[Vec3], masses: &[f64]) -> Centroid {
    centroid_of(points, masses, 0..points.len())
}

/// Mass-weighted centroid of the selected point indices.
///
/// Falls back to the unweighted mean when the selected masses sum to zero,
/// and to the origin when no finite point is selected.
pub fn centroid_of(
    points: &[Vec3],
    masses: &[f64],
    indices: impl IntoIterator<Item = usize>,
) -> Centroid {
    let mut weighted = Vec3::ZERO;
    let mut unweighted = Vec3::ZERO;
    let mut total_mass = 0.0_f64;
    let mut used = 0_usize;
    let mut skipped = 0_usize;

    for i in indices {
        let p = points[i];
        if !p.is_finite() {
            skipped += 1;
            continue;
        }
        let m = masses.get(i).copied().unwrap_or(1.0);
        let m = if m.is_finite() && m > 0.0 { m } else { 0.0 };

        weighted += p * m;
        unweighted += p;
        total_mass += m;
        used += 1;
    }

    if skipped > 0 {
        tracing::warn!(skipped, used, "centroid excluded non-finite points");
    }

    let point = if used == 0 {
        Vec3::ZERO
    } else if total_mass > 0.0 {
        weighted / total_mass
    } else {
        unweighted / used as f64
    };

    // Finite inputs can still overflow when summed.
    let point = if point.is_finite() { point } else { Vec3::ZERO };

    Centroid {
        point,
        used,
        skipped,
    }
}
