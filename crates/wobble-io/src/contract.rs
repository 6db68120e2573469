//! Scene input/output contract types.
//!
//! These types define the I/O boundary of the Wobble kernel.
//! They are serializable for scene files and CLI configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use wobble_material::PresetDatabase;
use wobble_math::Vec3;
use wobble_mesh::generators::{box_lattice, cube, line, quad_grid, uv_sphere};
use wobble_mesh::sampler::sample;
use wobble_mesh::TriangleMesh;
use wobble_solver::DeformationParams;
use wobble_types::constants::DEFAULT_DT;
use wobble_types::{WobbleError, WobbleResult};

/// Where the rest shape of a scene comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeSpec {
    /// 8-corner cube of edge `size`.
    Cube { size: f32 },
    /// Regular point lattice filling a box.
    Lattice { counts: [usize; 3], extent: [f32; 3] },
    /// UV sphere with collapsed poles.
    Sphere {
        radius: f32,
        stacks: usize,
        slices: usize,
    },
    /// Collinear points along X.
    Line { count: usize, length: f32 },
    /// Flat quad grid in the XY plane.
    Grid {
        cols: usize,
        rows: usize,
        width: f32,
        height: f32,
    },
    /// Explicit points.
    Points { points: Vec<[f64; 3]> },
    /// A `TriangleMesh` stored as JSON, relative to the scene file.
    Mesh { path: PathBuf },
}

impl ShapeSpec {
    /// Materialize the rest shape.
    ///
    /// Relative mesh paths are resolved against `base_dir`.
    pub fn rest_points(&self, base_dir: &Path) -> WobbleResult<Vec<Vec3>> {
        let mesh = match self {
            ShapeSpec::Cube { size } => cube(*size),
            ShapeSpec::Lattice { counts, extent } => box_lattice(*counts, *extent),
            ShapeSpec::Sphere {
                radius,
                stacks,
                slices,
            } => uv_sphere(*radius, *stacks, *slices),
            ShapeSpec::Line { count, length } => line(*count, *length),
            ShapeSpec::Grid {
                cols,
                rows,
                width,
                height,
            } => quad_grid(*cols, *rows, *width, *height),
            ShapeSpec::Points { points } => {
                return Ok(points.iter().map(|&p| Vec3::from_array(p)).collect());
            }
            ShapeSpec::Mesh { path } => load_mesh_json(&base_dir.join(path))?,
        };
        Ok(sample(&mesh))
    }
}

/// Reads and validates a JSON-encoded `TriangleMesh`.
pub fn load_mesh_json(path: &Path) -> WobbleResult<TriangleMesh> {
    let text = std::fs::read_to_string(path)?;
    let mesh: TriangleMesh = serde_json::from_str(&text)
        .map_err(|e| WobbleError::Serialization(format!("{}: {e}", path.display())))?;
    mesh.validate()?;
    Ok(mesh)
}

/// A host drag applied to one particle over a frame range.
///
/// While active, the host moves the particle by `velocity · dt` in its
/// buffer before each step, the way a user dragging a vertex would.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drag {
    pub particle: u32,
    /// First frame the drag is active.
    #[serde(default)]
    pub start_frame: u32,
    /// First frame the drag is no longer active.
    pub end_frame: u32,
    /// Drag velocity (units/s).
    pub velocity: [f64; 3],
}

impl Drag {
    /// Whether the drag moves its particle on `frame`.
    pub fn is_active(&self, frame: u32) -> bool {
        (self.start_frame..self.end_frame).contains(&frame)
    }
}

/// How the host loop drives the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameDrive {
    /// Number of frames to simulate.
    pub frames: u32,
    /// Timestep in seconds (e.g., 1/60).
    pub dt: f64,
    /// Acceleration applied to every movable particle as a force `m·g`.
    pub gravity: [f64; 3],
    /// Initial offset applied to the host buffer before the first frame.
    pub initial_offset: [f64; 3],
    /// Host buffer contents for the first frame. Defaults to the rest shape.
    pub initial_positions: Option<Vec<[f64; 3]>>,
    pub drags: Vec<Drag>,
}

impl Default for FrameDrive {
    fn default() -> Self {
        Self {
            frames: 120,
            dt: DEFAULT_DT,
            gravity: [0.0; 3],
            initial_offset: [0.0; 3],
            initial_positions: None,
            drags: Vec::new(),
        }
    }
}

/// Complete input specification for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneInput {
    /// Rest shape.
    pub shape: ShapeSpec,

    /// Per-particle masses. `None` = preset mass or 1.0.
    #[serde(default)]
    pub masses: Option<Vec<f64>>,

    /// Indices of pinned particles.
    #[serde(default)]
    pub fixed: Vec<u32>,

    /// Named material preset (see `PresetDatabase`).
    #[serde(default)]
    pub preset: Option<String>,

    /// Explicit parameters. Take precedence over `preset`.
    #[serde(default)]
    pub params: Option<DeformationParams>,

    #[serde(default)]
    pub drive: FrameDrive,
}

impl SceneInput {
    /// A scene over `shape` with default parameters and drive.
    pub fn new(shape: ShapeSpec) -> Self {
        Self {
            shape,
            masses: None,
            fixed: Vec::new(),
            preset: None,
            params: None,
            drive: FrameDrive::default(),
        }
    }

    /// Parses a scene from TOML text.
    pub fn from_toml_str(text: &str) -> WobbleResult<Self> {
        toml::from_str(text).map_err(|e| WobbleError::Serialization(format!("scene TOML: {e}")))
    }

    /// Reads a scene from a TOML file.
    pub fn from_toml_file(path: &Path) -> WobbleResult<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Effective deformation parameters: explicit params, else the named
    /// preset, else defaults.
    pub fn resolve_params(&self, presets: &PresetDatabase) -> WobbleResult<DeformationParams> {
        if let Some(params) = &self.params {
            return Ok(params.clone());
        }
        match &self.preset {
            Some(name) => presets
                .get(name)
                .map(|p| p.params.clone())
                .ok_or_else(|| WobbleError::InvalidConfig(format!("unknown preset '{name}'"))),
            None => Ok(DeformationParams::default()),
        }
    }

    /// Effective masses for `particle_count` particles: explicit masses,
    /// else the preset's particle mass, else `None` (all 1.0).
    pub fn resolve_masses(
        &self,
        presets: &PresetDatabase,
        particle_count: usize,
    ) -> Option<Vec<f64>> {
        if let Some(masses) = &self.masses {
            return Some(masses.clone());
        }
        self.preset
            .as_deref()
            .and_then(|name| presets.get(name))
            .map(|p| p.masses(particle_count))
    }
}

/// Output from a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneOutput {
    /// Final particle positions.
    pub positions: Vec<[f64; 3]>,
    pub metrics: SceneMetrics,
}

/// Aggregate metrics from a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneMetrics {
    /// Total wall-clock time (seconds).
    pub wall_time_seconds: f64,
    /// Number of frames executed.
    pub frame_count: u32,
    /// Kinetic energy after the last frame.
    pub final_kinetic_energy: f64,
    /// Frames on which some mode fell back.
    pub fallback_frames: u32,
    /// Frames on which deformation was skipped.
    pub skipped_frames: u32,
    /// Particles reset to rest, summed over all frames.
    pub reset_particles: u64,
    /// Largest distance of a final position from its rest position.
    pub max_displacement: f64,
}
