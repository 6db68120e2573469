//! Benchmark scenarios — procedural scenes for regression testing.
//!
//! Five canonical scenarios:
//! 1. **Rigid shift** — Cube displaced as a whole; must hold the shift with no wobble
//! 2. **Twisted lattice** — Lattice released from a twist about Y (quadratic mode)
//! 3. **Pinned beam** — Beam pinned at one end, sagging under gravity (linear mode)
//! 4. **Scattered points** — Irregular cloud released from jittered positions
//! 5. **Dragged sphere** — Sphere whose north pole is dragged by the host

use serde::{Deserialize, Serialize};

use wobble_io::contract::{Drag, SceneInput, ShapeSpec};
use wobble_math::{Mat3, Vec3};
use wobble_mesh::generators::box_lattice;
use wobble_mesh::sampler::sample;
use wobble_solver::DeformationParams;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Cube translated by one unit, rotation mode.
    RigidShift,
    /// 5×5×5 lattice released from a twist.
    TwistedLattice,
    /// 8×2×2 beam pinned at its left end under gravity.
    PinnedBeam,
    /// 64 pseudo-random points released from jittered positions.
    ScatteredPoints,
    /// UV sphere with its north pole dragged upward.
    DraggedSphere,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::RigidShift,
            ScenarioKind::TwistedLattice,
            ScenarioKind::PinnedBeam,
            ScenarioKind::ScatteredPoints,
            ScenarioKind::DraggedSphere,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::RigidShift => "rigid_shift",
            ScenarioKind::TwistedLattice => "twisted_lattice",
            ScenarioKind::PinnedBeam => "pinned_beam",
            ScenarioKind::ScatteredPoints => "scattered_points",
            ScenarioKind::DraggedSphere => "dragged_sphere",
        }
    }

    /// Parses a kind from its name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Scene driven by the host loop.
    pub scene: SceneInput,
}

impl Scenario {
    /// A 2×2×2 cube whose host buffer starts one unit along +X.
    pub fn rigid_shift() -> Self {
        let mut scene = SceneInput::new(ShapeSpec::Cube { size: 2.0 });
        scene.params = Some(DeformationParams::rigid());
        scene.drive.frames = 60;
        scene.drive.initial_offset = [1.0, 0.0, 0.0];
        Self {
            kind: ScenarioKind::RigidShift,
            scene,
        }
    }

    /// A 5×5×5 jelly lattice twisted by 0.6 rad per unit of height.
    pub fn twisted_lattice() -> Self {
        let counts = [5, 5, 5];
        let extent = [2.0, 2.0, 2.0];
        let rest = sample(&box_lattice(counts, extent));
        let twisted = rest
            .iter()
            .map(|&p| (Mat3::from_rotation_y(0.6 * p.y) * p).to_array())
            .collect();

        let mut scene = SceneInput::new(ShapeSpec::Lattice { counts, extent });
        scene.preset = Some("jelly".into());
        scene.drive.frames = 120;
        scene.drive.initial_positions = Some(twisted);
        Self {
            kind: ScenarioKind::TwistedLattice,
            scene,
        }
    }

    /// A 4 × 0.5 × 0.5 beam pinned at its minimum-X face, sagging under gravity.
    pub fn pinned_beam() -> Self {
        let counts = [8, 2, 2];
        let extent = [4.0, 0.5, 0.5];
        let rest = sample(&box_lattice(counts, extent));
        let min_x = rest.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let fixed = rest
            .iter()
            .enumerate()
            .filter(|(_, p)| (p.x - min_x).abs() < 1e-9)
            .map(|(i, _)| i as u32)
            .collect();

        let mut scene = SceneInput::new(ShapeSpec::Lattice { counts, extent });
        scene.params = Some(DeformationParams::linear(0.5));
        scene.fixed = fixed;
        scene.drive.frames = 120;
        scene.drive.gravity = [0.0, -9.81, 0.0];
        Self {
            kind: ScenarioKind::PinnedBeam,
            scene,
        }
    }

    /// 64 points in a unit box, released from positions jittered by up to 0.1.
    pub fn scattered_points() -> Self {
        let mut rng = Lcg(0x5eed);
        let points: Vec<[f64; 3]> = (0..64)
            .map(|_| [rng.next_signed(), rng.next_signed(), rng.next_signed()])
            .collect();
        let jittered = points
            .iter()
            .map(|&p| {
                let offset = Vec3::new(rng.next_signed(), rng.next_signed(), rng.next_signed());
                (Vec3::from_array(p) + 0.1 * offset).to_array()
            })
            .collect();

        let mut scene = SceneInput::new(ShapeSpec::Points { points });
        scene.params = Some(DeformationParams::quadratic(0.5));
        scene.drive.frames = 90;
        scene.drive.initial_positions = Some(jittered);
        Self {
            kind: ScenarioKind::ScatteredPoints,
            scene,
        }
    }

    /// A rubber UV sphere whose north pole is dragged up for half a second.
    pub fn dragged_sphere() -> Self {
        let mut scene = SceneInput::new(ShapeSpec::Sphere {
            radius: 1.0,
            stacks: 8,
            slices: 12,
        });
        scene.preset = Some("rubber".into());
        scene.drive.frames = 90;
        scene.drive.drags.push(Drag {
            particle: 0,
            start_frame: 0,
            end_frame: 30,
            velocity: [0.0, 1.5, 0.0],
        });
        Self {
            kind: ScenarioKind::DraggedSphere,
            scene,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::RigidShift => Self::rigid_shift(),
            ScenarioKind::TwistedLattice => Self::twisted_lattice(),
            ScenarioKind::PinnedBeam => Self::pinned_beam(),
            ScenarioKind::ScatteredPoints => Self::scattered_points(),
            ScenarioKind::DraggedSphere => Self::dragged_sphere(),
        }
    }

    /// Override the number of frames.
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.scene.drive.frames = frames;
        self
    }
}

/// Deterministic linear congruential generator for reproducible clouds.
struct Lcg(u64);

impl Lcg {
    /// Uniform value in `[-1, 1)`.
    fn next_signed(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    }
}
