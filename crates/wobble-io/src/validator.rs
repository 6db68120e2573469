//! Scene and mesh validation.
//!
//! Validates scene inputs before a body is built from them, catching
//! data-level errors early with clear diagnostics.

use std::path::Path;

use wobble_material::PresetDatabase;
use wobble_mesh::TriangleMesh;
use wobble_types::{WobbleError, WobbleResult};

use crate::contract::{FrameDrive, SceneInput, ShapeSpec};

/// Validates a complete scene input.
///
/// Checks:
/// - Generator arguments are usable and the rest shape is finite
/// - Mass array length matches the particle count
/// - Pinned and dragged indices are in range
/// - Parameters (explicit or preset) are valid
/// - Frame drive values are physically reasonable
///
/// Returns the particle count of the scene.
pub fn validate_input(
    input: &SceneInput,
    base_dir: &Path,
    presets: &PresetDatabase,
) -> WobbleResult<usize> {
    validate_shape(&input.shape)?;

    let rest = input.shape.rest_points(base_dir)?;
    let n = rest.len();
    if n == 0 {
        return Err(WobbleError::InvalidRestShape("shape has no points".into()));
    }
    if let Some(i) = rest.iter().position(|p| !p.is_finite()) {
        return Err(WobbleError::InvalidRestShape(format!(
            "rest point {i} is not finite"
        )));
    }

    if let Some(masses) = &input.masses {
        if masses.len() != n {
            return Err(WobbleError::DimensionMismatch {
                what: "masses",
                expected: n,
                actual: masses.len(),
            });
        }
        if let Some(i) = masses.iter().position(|&m| !m.is_finite() || m <= 0.0) {
            return Err(WobbleError::InvalidConfig(format!(
                "mass {i} must be positive and finite, got {}",
                masses[i]
            )));
        }
    }

    for &index in &input.fixed {
        check_index(index, n)?;
    }
    let mut pinned = vec![false; n];
    for &index in &input.fixed {
        pinned[index as usize] = true;
    }
    if pinned.iter().all(|&p| p) {
        tracing::warn!(particles = n, "every particle is fixed; deformation will be skipped");
    }

    input.resolve_params(presets)?.validate()?;
    validate_drive(&input.drive, n)?;

    Ok(n)
}

/// Validates a JSON-encoded `TriangleMesh`.
///
/// Returns the vertex count.
pub fn validate_mesh_json(text: &str) -> WobbleResult<usize> {
    let mesh: TriangleMesh =
        serde_json::from_str(text).map_err(|e| WobbleError::Serialization(e.to_string()))?;
    mesh.validate()?;
    if mesh.vertex_count() == 0 {
        return Err(WobbleError::InvalidRestShape("mesh has no vertices".into()));
    }
    Ok(mesh.vertex_count())
}

fn check_index(index: u32, n: usize) -> WobbleResult<()> {
    if index as usize >= n {
        return Err(WobbleError::IndexOutOfRange {
            index: index as usize,
            len: n,
        });
    }
    Ok(())
}

fn validate_shape(shape: &ShapeSpec) -> WobbleResult<()> {
    let positive = |name: &str, v: f32| {
        if v.is_finite() && v > 0.0 {
            Ok(())
        } else {
            Err(WobbleError::InvalidConfig(format!(
                "{name} must be positive, got {v}"
            )))
        }
    };
    match shape {
        ShapeSpec::Cube { size } => positive("cube size", *size),
        ShapeSpec::Lattice { counts, extent } => {
            if counts.iter().any(|&c| c == 0) {
                return Err(WobbleError::InvalidConfig(
                    "lattice counts must be at least 1".into(),
                ));
            }
            if extent.iter().any(|e| !e.is_finite() || *e < 0.0) {
                return Err(WobbleError::InvalidConfig(
                    "lattice extent must be finite and non-negative".into(),
                ));
            }
            Ok(())
        }
        ShapeSpec::Sphere { radius, .. } => positive("sphere radius", *radius),
        ShapeSpec::Line { count, length } => {
            if *count < 2 {
                return Err(WobbleError::InvalidConfig(
                    "line needs at least 2 points".into(),
                ));
            }
            positive("line length", *length)
        }
        ShapeSpec::Grid {
            cols,
            rows,
            width,
            height,
        } => {
            if *cols == 0 || *rows == 0 {
                return Err(WobbleError::InvalidConfig(
                    "grid needs at least one quad per side".into(),
                ));
            }
            positive("grid width", *width)?;
            positive("grid height", *height)
        }
        ShapeSpec::Points { .. } | ShapeSpec::Mesh { .. } => Ok(()),
    }
}

fn validate_drive(drive: &FrameDrive, n: usize) -> WobbleResult<()> {
    if !drive.dt.is_finite() || drive.dt <= 0.0 {
        return Err(WobbleError::InvalidTimestep(drive.dt));
    }
    if drive.dt > 1.0 {
        return Err(WobbleError::InvalidConfig(
            "timestep dt > 1.0 is unreasonably large".into(),
        ));
    }
    if drive.frames == 0 {
        return Err(WobbleError::InvalidConfig(
            "frame count must be >= 1".into(),
        ));
    }
    if drive.gravity.iter().chain(&drive.initial_offset).any(|v| !v.is_finite()) {
        return Err(WobbleError::InvalidConfig(
            "gravity and initial offset must be finite".into(),
        ));
    }
    if let Some(initial) = &drive.initial_positions {
        if initial.len() != n {
            return Err(WobbleError::DimensionMismatch {
                what: "initial positions",
                expected: n,
                actual: initial.len(),
            });
        }
        if initial.iter().flatten().any(|v| !v.is_finite()) {
            return Err(WobbleError::InvalidConfig(
                "initial positions must be finite".into(),
            ));
        }
    }
    for drag in &drive.drags {
        check_index(drag.particle, n)?;
        if drag.end_frame < drag.start_frame {
            return Err(WobbleError::InvalidConfig(format!(
                "drag on particle {} ends before it starts",
                drag.particle
            )));
        }
        if drag.velocity.iter().any(|v| !v.is_finite()) {
            return Err(WobbleError::InvalidConfig(format!(
                "drag on particle {} has a non-finite velocity",
                drag.particle
            )));
        }
    }
    Ok(())
}
