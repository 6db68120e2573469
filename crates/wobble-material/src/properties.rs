//! Material presets.
//!
//! A preset bundles deformation parameters with a per-particle mass so
//! that a scene can ask for "jelly" instead of spelling out every value.

use serde::{Deserialize, Serialize};
use wobble_math::Vec3;
use wobble_solver::{Body, DeformationParams};
use wobble_types::WobbleResult;

/// A named set of deformation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPreset {
    /// Lookup key (e.g., "jelly").
    pub name: String,

    /// One-line description of how the material behaves.
    #[serde(default)]
    pub description: String,

    /// Mass assigned to every particle.
    /// Heavier bodies respond less to external forces.
    pub particle_mass: f64,

    /// Shape matching and integration parameters.
    pub params: DeformationParams,
}

impl MaterialPreset {
    /// Uniform masses for a body of `particle_count` particles.
    pub fn masses(&self, particle_count: usize) -> Vec<f64> {
        vec![self.particle_mass; particle_count]
    }

    /// Elastic stiffness `1/τ`. Higher snaps back faster.
    pub fn stiffness(&self) -> f64 {
        1.0 / self.params.tau
    }

    /// Returns true if the preset allows non-rigid deformation.
    pub fn is_deformable(&self) -> bool {
        self.params.effective_beta() > 0.0
    }

    /// Build a body over `rest` using this preset's masses and parameters.
    pub fn build_body(&self, rest: &[Vec3]) -> WobbleResult<Body> {
        let masses = self.masses(rest.len());
        Body::new(rest, Some(&masses))?.with_params(self.params.clone())
    }
}
