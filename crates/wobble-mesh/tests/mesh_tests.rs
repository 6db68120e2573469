//! Integration tests for wobble-mesh.

use wobble_math::Vec3;
use wobble_mesh::generators::{box_lattice, cube, line, quad_grid, uv_sphere};
use wobble_mesh::sampler::{sample, write_back, PointSource};
use wobble_mesh::TriangleMesh;

// ─── TriangleMesh Tests ───────────────────────────────────────

fn make_single_triangle() -> TriangleMesh {
    TriangleMesh {
        pos_x: vec![0.0, 1.0, 0.0],
        pos_y: vec![0.0, 0.0, 1.0],
        pos_z: vec![0.0, 0.0, 0.0],
        indices: vec![0, 1, 2],
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn position_access() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.position(1), [1.0, 0.0, 0.0]);
    assert_eq!(mesh.triangle(0), [0, 1, 2]);
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = make_single_triangle();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.indices[2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_degenerate() {
    let mut mesh = make_single_triangle();
    mesh.indices = vec![0, 0, 1];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_non_finite() {
    let mut mesh = make_single_triangle();
    mesh.pos_z[1] = f32::NAN;
    assert!(mesh.validate().is_err());
}

#[test]
fn interleaved_round_trip() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mesh = TriangleMesh::from_interleaved(&positions, &[0, 1, 2]).unwrap();
    assert_eq!(mesh.pos_x, vec![0.0, 1.0, 0.0]);
    assert_eq!(mesh.to_interleaved(), positions);
}

#[test]
fn from_interleaved_rejects_ragged() {
    assert!(TriangleMesh::from_interleaved(&[0.0, 1.0], &[]).is_err());
}

#[test]
fn point_cloud_without_triangles_is_valid() {
    let mesh = box_lattice([2, 2, 2], [1.0, 1.0, 1.0]);
    assert!(mesh.validate().is_ok());
}

#[test]
fn bounds() {
    let mesh = cube(2.0);
    let (min, max) = mesh.bounds().unwrap();
    assert_eq!(min, [-1.0, -1.0, -1.0]);
    assert_eq!(max, [1.0, 1.0, 1.0]);
    assert!(TriangleMesh::default().bounds().is_none());
}

#[test]
fn mesh_serialization() {
    let mesh = cube(1.0);
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: TriangleMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered.vertex_count(), 8);
    assert_eq!(recovered.indices, mesh.indices);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn cube_corners() {
    let mesh = cube(1.0);
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    assert!(mesh.validate().is_ok());
    assert_eq!(mesh.position(0), [-0.5, -0.5, -0.5]);
    assert_eq!(mesh.position(7), [0.5, 0.5, 0.5]);
    assert_eq!(mesh.position(1), [0.5, -0.5, -0.5]);
}

#[test]
fn lattice_is_centered() {
    let mesh = box_lattice([3, 4, 2], [2.0, 3.0, 1.0]);
    assert_eq!(mesh.vertex_count(), 24);
    let n = mesh.vertex_count() as f32;
    let cx: f32 = mesh.pos_x.iter().sum::<f32>() / n;
    let cy: f32 = mesh.pos_y.iter().sum::<f32>() / n;
    let cz: f32 = mesh.pos_z.iter().sum::<f32>() / n;
    assert!(cx.abs() < 1e-6 && cy.abs() < 1e-6 && cz.abs() < 1e-6);
}

#[test]
fn quad_grid_counts() {
    let mesh = quad_grid(2, 2, 1.0, 1.0);
    assert_eq!(mesh.vertex_count(), 9);
    assert_eq!(mesh.triangle_count(), 8);
    assert!(mesh.validate().is_ok());
}

#[test]
fn sphere_vertices_on_surface() {
    let mesh = uv_sphere(0.5, 8, 12);
    assert_eq!(mesh.vertex_count(), 7 * 12 + 2);
    assert!(mesh.validate().is_ok());
    for i in 0..mesh.vertex_count() {
        let [x, y, z] = mesh.position(i);
        let r = (x * x + y * y + z * z).sqrt();
        assert!((r - 0.5).abs() < 1e-5, "vertex {i} at radius {r}");
    }
}

#[test]
fn line_is_collinear() {
    let mesh = line(5, 4.0);
    assert_eq!(mesh.vertex_count(), 5);
    assert!(mesh.pos_y.iter().all(|&y| y == 0.0));
    assert!(mesh.pos_z.iter().all(|&z| z == 0.0));
    assert_eq!(mesh.pos_x[0], -2.0);
    assert_eq!(mesh.pos_x[4], 2.0);
}

// ─── Sampler Tests ────────────────────────────────────────────

#[test]
fn sample_widens_to_f64_in_order() {
    let mesh = cube(1.0);
    let points = sample(&mesh);
    assert_eq!(points.len(), 8);
    assert_eq!(points[3], Vec3::new(0.5, 0.5, -0.5));
}

#[test]
fn write_back_updates_mesh() {
    let mut mesh = cube(1.0);
    let mut points = sample(&mesh);
    for p in points.iter_mut() {
        *p += Vec3::new(1.0, 0.0, 0.0);
    }
    write_back(&mut mesh, &points);
    assert_eq!(mesh.position(0), [0.5, -0.5, -0.5]);
}

#[test]
fn vec_is_a_point_source() {
    let points = vec![Vec3::X, Vec3::Y];
    assert_eq!(points.point_count(), 2);
    assert_eq!(points.point(1), Vec3::Y);
    assert_eq!(sample(points.as_slice()), points);
}
