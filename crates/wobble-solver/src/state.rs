//! Particle state — per-particle buffers owned by a body.
//!
//! This is the primary mutable data structure during simulation.
//! The integrator reads and writes these buffers each step; the rest
//! shape is copied in once at creation and never written again.

use wobble_math::guard::sanitize_mass;
use wobble_math::Vec3;
use wobble_types::{WobbleError, WobbleResult};

/// Per-particle simulation buffers.
///
/// All arrays have length `particle_count` and are indexed by
/// [`ParticleId`](wobble_types::ParticleId). Order never changes.
#[derive(Debug, Clone)]
pub struct ParticleState {
    /// Number of particles.
    pub particle_count: usize,

    // ─── Kinematics ───
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,

    /// External force accumulated since the last step.
    pub forces: Vec<Vec3>,

    // ─── Immutable after creation; read through `rest()` / `masses()` ───
    pub(crate) rest: Vec<Vec3>,
    pub(crate) masses: Vec<f64>,

    /// Pinned particles skip integration and the best fit.
    pub fixed: Vec<bool>,
}

impl ParticleState {
    /// Initialize state from a rest shape and optional per-particle masses.
    ///
    /// Positions start at the rest shape, velocities and forces at zero.
    /// Masses that are non-finite or not positive are replaced by 1.0.
    pub fn from_rest(rest: &[Vec3], masses: Option<&[f64]>) -> WobbleResult<Self> {
        let n = rest.len();

        if n == 0 {
            return Err(WobbleError::InvalidRestShape(
                "rest shape has no points".into(),
            ));
        }
        if let Some(i) = rest.iter().position(|p| !p.is_finite()) {
            return Err(WobbleError::InvalidRestShape(format!(
                "rest point {i} is not finite"
            )));
        }

        let masses = match masses {
            Some(m) if m.len() != n => {
                return Err(WobbleError::DimensionMismatch {
                    what: "masses",
                    expected: n,
                    actual: m.len(),
                })
            }
            Some(m) => {
                let replaced = m.iter().filter(|&&x| sanitize_mass(x) != x).count();
                if replaced > 0 {
                    tracing::warn!(replaced, "invalid masses replaced by 1.0");
                }
                m.iter().copied().map(sanitize_mass).collect()
            }
            None => vec![1.0; n],
        };

        Ok(Self {
            particle_count: n,
            positions: rest.to_vec(),
            velocities: vec![Vec3::ZERO; n],
            forces: vec![Vec3::ZERO; n],
            rest: rest.to_vec(),
            masses,
            fixed: vec![false; n],
        })
    }

    /// Rest shape captured at creation.
    pub fn rest(&self) -> &[Vec3] {
        &self.rest
    }

    /// Per-particle masses, all finite and positive.
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Number of pinned particles.
    pub fn fixed_count(&self) -> usize {
        self.fixed.iter().filter(|&&f| f).count()
    }

    /// Zero every force accumulator.
    pub fn clear_forces(&mut self) {
        self.forces.fill(Vec3::ZERO);
    }

    /// Compute total kinetic energy: 0.5 * Σ m_i * ||v_i||².
    ///
    /// Pinned particles do not move and contribute nothing.
    pub fn kinetic_energy(&self) -> f64 {
        let mut energy = 0.0f64;
        for i in 0..self.particle_count {
            if !self.fixed[i] {
                energy += 0.5 * self.masses[i] * self.velocities[i].length_squared();
            }
        }
        energy
    }
}
