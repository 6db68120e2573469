//! # wobble-mesh
//!
//! Host-side geometry for the Wobble kernel.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`] — A render-style mesh with `f32` positions in
//!   contiguous SoA buffers.
//! - [`PointSource`] / [`PointSink`] — The narrow capability the kernel
//!   needs from a host: an indexable, stable-ordered buffer of points.
//! - Procedural generators for tests and benchmarks (cubes, lattices,
//!   grids, spheres).

pub mod generators;
pub mod mesh;
pub mod sampler;

pub use mesh::TriangleMesh;
pub use sampler::{sample, write_back, PointSink, PointSource};
