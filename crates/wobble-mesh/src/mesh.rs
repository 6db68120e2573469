//! Core triangle mesh type with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! Positions are `f32`, as a render buffer would hold them. The kernel
//! never reads these arrays directly; it goes through [`PointSource`].
//!
//! [`PointSource`]: crate::sampler::PointSource

use serde::{Deserialize, Serialize};
use wobble_types::{WobbleError, WobbleResult};

/// A triangle mesh stored in Structure-of-Arrays layout.
///
/// Triangles are optional: a mesh with no indices is a plain point cloud,
/// which is all shape matching needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,

    /// Triangle indices — each triangle is [v0, v1, v2].
    /// Stored flat: `[t0v0, t0v1, t0v2, t1v0, t1v1, t1v2, ...]`
    #[serde(default)]
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the three vertex indices of triangle `t`.
    #[inline]
    pub fn triangle(&self, t: usize) -> [u32; 3] {
        let base = t * 3;
        [self.indices[base], self.indices[base + 1], self.indices[base + 2]]
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, x: f32, y: f32, z: f32) {
        self.pos_x[i] = x;
        self.pos_y[i] = y;
        self.pos_z[i] = z;
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, x: f32, y: f32, z: f32) -> u32 {
        self.pos_x.push(x);
        self.pos_y.push(y);
        self.pos_z.push(z);
        (self.pos_x.len() - 1) as u32
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, triangle_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(triangle_capacity * 3),
        }
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        if self.vertex_count() == 0 {
            return None;
        }
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        for i in 0..self.vertex_count() {
            let p = self.position(i);
            for k in 0..3 {
                min[k] = min[k].min(p[k]);
                max[k] = max[k].max(p[k]);
            }
        }
        Some((min, max))
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - All positions are finite
    /// - Triangle indices are within bounds
    /// - No degenerate triangles (repeated vertex indices)
    pub fn validate(&self) -> WobbleResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(WobbleError::InvalidRestShape(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if let Some(i) = (0..n).find(|&i| !self.position(i).iter().all(|v| v.is_finite())) {
            return Err(WobbleError::InvalidRestShape(format!(
                "Vertex {} has a non-finite position",
                i
            )));
        }

        if self.indices.len() % 3 != 0 {
            return Err(WobbleError::InvalidRestShape(
                "Index count is not divisible by 3".into(),
            ));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(WobbleError::InvalidRestShape(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.triangle_count() {
            let [a, b, c] = self.triangle(t);
            if a == b || b == c || a == c {
                return Err(WobbleError::InvalidRestShape(format!(
                    "Triangle {} has repeated vertex indices: [{}, {}, {}]",
                    t, a, b, c
                )));
            }
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved AoS position data
    /// `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn from_interleaved(positions: &[f32], indices: &[u32]) -> WobbleResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(WobbleError::InvalidRestShape(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / 3);
        for p in positions.chunks_exact(3) {
            mesh.push_vertex(p[0], p[1], p[2]);
        }
        mesh.indices = indices.to_vec();

        mesh.validate()?;
        Ok(mesh)
    }

    /// Flattens positions back to interleaved `[x0, y0, z0, ...]`.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertex_count() * 3);
        for i in 0..self.vertex_count() {
            out.extend_from_slice(&self.position(i));
        }
        out
    }
}
