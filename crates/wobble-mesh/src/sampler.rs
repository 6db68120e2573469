//! Vertex sampling — the read/write adapter between a host mesh and the kernel.
//!
//! The kernel only needs "an indexable, stable-ordered buffer of points".
//! Hosts expose that through [`PointSource`] (read) and [`PointSink`]
//! (write back). The kernel never inspects scene nodes or mesh types.

use wobble_math::Vec3;

use crate::mesh::TriangleMesh;

/// Read access to an ordered, stable-indexed set of world-space points.
///
/// Index `i` must refer to the same logical vertex for the lifetime of
/// the body built from this source.
pub trait PointSource {
    /// Number of points.
    fn point_count(&self) -> usize;

    /// World-space position of point `i`.
    fn point(&self, i: usize) -> Vec3;
}

/// Write access used to push updated positions back into a host buffer.
pub trait PointSink {
    /// Overwrite point `i`.
    fn set_point(&mut self, i: usize, p: Vec3);
}

/// Read every point of `source` in index order.
pub fn sample<S: PointSource + ?Sized>(source: &S) -> Vec<Vec3> {
    (0..source.point_count()).map(|i| source.point(i)).collect()
}

/// Write `points` into `sink`, index by index.
pub fn write_back<S: PointSink + ?Sized>(sink: &mut S, points: &[Vec3]) {
    for (i, &p) in points.iter().enumerate() {
        sink.set_point(i, p);
    }
}

impl PointSource for TriangleMesh {
    fn point_count(&self) -> usize {
        self.vertex_count()
    }

    fn point(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i] as f64, self.pos_y[i] as f64, self.pos_z[i] as f64)
    }
}

impl PointSink for TriangleMesh {
    fn set_point(&mut self, i: usize, p: Vec3) {
        self.set_position(i, p.x as f32, p.y as f32, p.z as f32);
    }
}

impl PointSource for [Vec3] {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn point(&self, i: usize) -> Vec3 {
        self[i]
    }
}

impl PointSource for Vec<Vec3> {
    fn point_count(&self) -> usize {
        self.len()
    }

    fn point(&self, i: usize) -> Vec3 {
        self[i]
    }
}

impl PointSink for [Vec3] {
    fn set_point(&mut self, i: usize, p: Vec3) {
        self[i] = p;
    }
}

impl PointSink for Vec<Vec3> {
    fn set_point(&mut self, i: usize, p: Vec3) {
        self[i] = p;
    }
}
