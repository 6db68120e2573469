//! Procedural mesh generators for benchmarks and testing.
//!
//! These generators produce deterministic, resolution-configurable shapes.
//! Vertex order is fixed by construction so that bodies built from the
//! same generator call always agree on particle indices.

use crate::mesh::TriangleMesh;

/// Generates the 8 corners of an axis-aligned cube of edge `size`,
/// centered at the origin, with 12 surface triangles.
///
/// Vertex `i` has coordinates `(±h, ±h, ±h)` where bit 0 of `i` selects
/// X, bit 1 selects Y, and bit 2 selects Z (set bit = positive side).
///
/// # Example
/// ```
/// use wobble_mesh::generators::cube;
/// let mesh = cube(1.0);
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn cube(size: f32) -> TriangleMesh {
    let h = size / 2.0;
    let mut mesh = TriangleMesh::with_capacity(8, 12);

    for i in 0..8u32 {
        let x = if i & 1 != 0 { h } else { -h };
        let y = if i & 2 != 0 { h } else { -h };
        let z = if i & 4 != 0 { h } else { -h };
        mesh.push_vertex(x, y, z);
    }

    // Outward-facing quads, split into two triangles each.
    const FACES: [[u32; 4]; 6] = [
        [0, 2, 6, 4], // -X
        [1, 5, 7, 3], // +X
        [0, 4, 5, 1], // -Y
        [2, 3, 7, 6], // +Y
        [0, 1, 3, 2], // -Z
        [4, 6, 7, 5], // +Z
    ];
    for [a, b, c, d] in FACES {
        mesh.indices.extend_from_slice(&[a, b, c, a, c, d]);
    }

    mesh
}

/// Generates a regular lattice of points filling a box, centered at the origin.
///
/// The lattice has `nx × ny × nz` points spanning `extent` along each
/// axis. No triangles are produced; the result is a point cloud.
/// Points are ordered X-fastest, then Y, then Z.
///
/// # Example
/// ```
/// use wobble_mesh::generators::box_lattice;
/// let mesh = box_lattice([3, 3, 3], [2.0, 2.0, 2.0]);
/// assert_eq!(mesh.vertex_count(), 27);
/// assert_eq!(mesh.triangle_count(), 0);
/// ```
pub fn box_lattice(counts: [usize; 3], extent: [f32; 3]) -> TriangleMesh {
    let [nx, ny, nz] = counts;
    let mut mesh = TriangleMesh::with_capacity(nx * ny * nz, 0);

    let coord = |k: usize, n: usize, ext: f32| -> f32 {
        if n <= 1 {
            0.0
        } else {
            -ext / 2.0 + ext * k as f32 / (n - 1) as f32
        }
    };

    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                mesh.push_vertex(coord(i, nx, extent[0]), coord(j, ny, extent[1]), coord(k, nz, extent[2]));
            }
        }
    }

    mesh
}

/// Generates a flat rectangular quad grid in the XY plane.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]` in Y,
/// centered at the origin at Z=0.
///
/// # Arguments
/// - `cols` — Number of quads along X (vertex count = cols + 1).
/// - `rows` — Number of quads along Y (vertex count = rows + 1).
/// - `width` — Total width.
/// - `height` — Total height.
pub fn quad_grid(cols: usize, rows: usize, width: f32, height: f32) -> TriangleMesh {
    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let mut mesh = TriangleMesh::with_capacity(verts_x * verts_y, cols * rows * 2);

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as f32 / cols as f32;
            let v = j as f32 / rows as f32;
            mesh.push_vertex(-half_w + u * width, half_h - v * height, 0.0);
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let top_left = (j * verts_x + i) as u32;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x as u32;
            let bot_right = bot_left + 1;

            mesh.indices.extend_from_slice(&[top_left, bot_left, top_right]);
            mesh.indices.extend_from_slice(&[top_right, bot_left, bot_right]);
        }
    }

    mesh
}

/// Generates a UV sphere centered at the origin.
///
/// Pole rows are collapsed to a single vertex each, so every vertex is a
/// distinct point (duplicated seam vertices would double-weight the fit).
///
/// # Arguments
/// - `radius` — Sphere radius.
/// - `stacks` — Number of horizontal slices (latitude divisions), at least 2.
/// - `slices` — Number of vertical slices (longitude divisions), at least 3.
pub fn uv_sphere(radius: f32, stacks: usize, slices: usize) -> TriangleMesh {
    let stacks = stacks.max(2);
    let slices = slices.max(3);
    let ring_count = stacks - 1;
    let mut mesh = TriangleMesh::with_capacity(ring_count * slices + 2, stacks * slices * 2);

    let north = mesh.push_vertex(0.0, radius, 0.0);
    for i in 1..stacks {
        let phi = std::f32::consts::PI * i as f32 / stacks as f32;
        for j in 0..slices {
            let theta = 2.0 * std::f32::consts::PI * j as f32 / slices as f32;
            mesh.push_vertex(
                radius * phi.sin() * theta.cos(),
                radius * phi.cos(),
                radius * phi.sin() * theta.sin(),
            );
        }
    }
    let south = mesh.push_vertex(0.0, -radius, 0.0);

    let ring = |r: usize, j: usize| -> u32 { (1 + r * slices + (j % slices)) as u32 };

    for j in 0..slices {
        mesh.indices.extend_from_slice(&[north, ring(0, j + 1), ring(0, j)]);
    }
    for r in 0..ring_count.saturating_sub(1) {
        for j in 0..slices {
            let a = ring(r, j);
            let b = ring(r, j + 1);
            let c = ring(r + 1, j);
            let d = ring(r + 1, j + 1);
            mesh.indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }
    for j in 0..slices {
        mesh.indices.extend_from_slice(&[south, ring(ring_count - 1, j), ring(ring_count - 1, j + 1)]);
    }

    mesh
}

/// Generates `count` evenly spaced collinear points along X, centered at
/// the origin. Useful for exercising singular covariance handling.
pub fn line(count: usize, length: f32) -> TriangleMesh {
    box_lattice([count, 1, 1], [length, 0.0, 0.0])
}
