//! The body aggregate: a deformable point set and its stepping API.
//!
//! A [`Body`] owns everything the kernel needs between frames: rest shape,
//! masses, velocities, the force accumulator, pinned particles and the
//! deformation parameters. There is no process-wide state; independent
//! bodies can be stepped on different threads.
//!
//! # Frame loop
//!
//! ```text
//! let mut body = Body::new(&rest, None)?;
//! loop {
//!     let current = host.read_points();
//!     body.step(&current, dt)?;
//!     host.write_points(body.positions());
//! }
//! ```

use std::time::Instant;

use wobble_math::{guard, Mat3, Vec3};
use wobble_mesh::sampler::{sample, write_back, PointSink, PointSource};
use wobble_types::{ParticleId, WobbleError, WobbleResult};

use crate::config::DeformationParams;
use crate::deformation::{compute_goals, AppliedMode};
use crate::integrator::integrate;
use crate::report::{StepReport, StepWarning};
use crate::state::ParticleState;

/// A deformable body driven by shape matching.
#[derive(Debug, Clone)]
pub struct Body {
    state: ParticleState,
    params: DeformationParams,
    frame: u64,
    last_rotation: Mat3,
}

impl Body {
    /// Create a body from its rest shape.
    ///
    /// The rest shape is copied once and never modified. Masses default
    /// to 1.0; invalid masses are replaced by 1.0.
    ///
    /// # Errors
    /// - [`WobbleError::InvalidRestShape`] if `rest` is empty or not finite.
    /// - [`WobbleError::DimensionMismatch`] if `masses` has the wrong length.
    pub fn new(rest: &[Vec3], masses: Option<&[f64]>) -> WobbleResult<Self> {
        let state = ParticleState::from_rest(rest, masses)?;
        tracing::debug!(particles = state.particle_count, "body created");
        Ok(Self {
            state,
            params: DeformationParams::default(),
            frame: 0,
            last_rotation: Mat3::IDENTITY,
        })
    }

    /// Create a body whose rest shape is the current content of `source`.
    pub fn from_source<S: PointSource + ?Sized>(
        source: &S,
        masses: Option<&[f64]>,
    ) -> WobbleResult<Self> {
        Self::new(&sample(source), masses)
    }

    /// Replace the deformation parameters.
    ///
    /// Invalid parameters are rejected and the previous ones kept.
    pub fn set_params(&mut self, params: DeformationParams) -> WobbleResult<()> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Builder-style variant of [`set_params`](Self::set_params).
    pub fn with_params(mut self, params: DeformationParams) -> WobbleResult<Self> {
        self.set_params(params)?;
        Ok(self)
    }

    /// Pin or release a particle.
    ///
    /// Releasing a particle does not restore any velocity it had before
    /// it was pinned.
    pub fn set_fixed(&mut self, id: ParticleId, fixed: bool) -> WobbleResult<()> {
        let i = self.check_index(id)?;
        self.state.fixed[i] = fixed;
        if fixed {
            self.state.velocities[i] = Vec3::ZERO;
            self.state.forces[i] = Vec3::ZERO;
        }
        Ok(())
    }

    /// Add an external force to a particle, consumed by the next step.
    ///
    /// Forces accumulate. Non-finite forces are dropped.
    pub fn add_force(&mut self, id: ParticleId, force: Vec3) -> WobbleResult<()> {
        let i = self.check_index(id)?;
        if !force.is_finite() {
            tracing::warn!(particle = %id, "non-finite force dropped");
            return Ok(());
        }
        self.state.forces[i] += force;
        Ok(())
    }

    /// Add the same force to every movable particle.
    pub fn add_force_all(&mut self, force: Vec3) {
        if !force.is_finite() {
            tracing::warn!("non-finite force dropped");
            return;
        }
        for i in 0..self.state.particle_count {
            if !self.state.fixed[i] {
                self.state.forces[i] += force;
            }
        }
    }

    /// Advance one frame.
    ///
    /// `current` is the host's view of the point positions this frame
    /// (index-aligned with the rest shape). Pinned particles keep the
    /// position given here. On return, [`positions`](Self::positions)
    /// holds the integrated positions.
    ///
    /// # Errors
    /// - [`WobbleError::DimensionMismatch`] if `current` has the wrong length.
    /// - [`WobbleError::InvalidTimestep`] if `dt` is not a positive finite number.
    ///
    /// On error the body is left untouched.
    pub fn step(&mut self, current: &[Vec3], dt: f64) -> WobbleResult<StepReport> {
        let n = self.state.particle_count;
        if current.len() != n {
            return Err(WobbleError::DimensionMismatch {
                what: "current positions",
                expected: n,
                actual: current.len(),
            });
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(WobbleError::InvalidTimestep(dt));
        }

        let start = Instant::now();
        let frame = self.frame;

        // 1. Best fit and goal positions
        let deformation = compute_goals(
            current,
            &self.state.rest,
            &self.state.masses,
            &self.state.fixed,
            &self.params,
        );

        let mut warnings = Vec::new();
        if deformation.non_finite_inputs > 0 {
            tracing::warn!(
                frame,
                count = deformation.non_finite_inputs,
                "non-finite current positions"
            );
            warnings.push(StepWarning::NonFiniteInput {
                count: deformation.non_finite_inputs,
            });
        }
        if deformation.all_fixed {
            warnings.push(StepWarning::AllFixed);
        }
        if deformation.degenerate {
            warnings.push(StepWarning::DegenerateConfiguration);
        }
        warnings.extend(deformation.fallbacks.iter().copied().map(StepWarning::from));

        // 2. Integrate from the host's positions
        self.state.positions.copy_from_slice(current);
        let reset_count = integrate(&mut self.state, &deformation.goals, &self.params, dt);
        if reset_count > 0 {
            warnings.push(StepWarning::ParticlesReset { count: reset_count });
        }

        if deformation.applied != AppliedMode::Skipped {
            self.last_rotation = deformation.rotation;
        }
        self.frame += 1;

        tracing::debug!(
            frame,
            requested = self.params.mode.name(),
            applied = deformation.applied.name(),
            "step complete"
        );

        Ok(StepReport {
            frame,
            requested: self.params.mode,
            applied: deformation.applied,
            rotation: deformation.rotation,
            warnings,
            reset_count,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    /// Sample `buffer`, step, and write the new positions back into it.
    pub fn step_buffer<B: PointSource + PointSink + ?Sized>(
        &mut self,
        buffer: &mut B,
        dt: f64,
    ) -> WobbleResult<StepReport> {
        let current = sample(buffer);
        let report = self.step(&current, dt)?;
        write_back(buffer, &self.state.positions);
        Ok(report)
    }

    /// Overwrite the dynamic state, e.g. when restoring a snapshot.
    ///
    /// `rotation` becomes the value reported by [`rotation`](Self::rotation)
    /// until the next fit. Rest shape and masses are not touched.
    pub fn restore(
        &mut self,
        positions: &[Vec3],
        velocities: &[Vec3],
        fixed: &[bool],
        frame: u64,
        rotation: Mat3,
    ) -> WobbleResult<()> {
        if !guard::is_finite_mat3(&rotation) {
            return Err(WobbleError::InvalidConfig(
                "restored rotation is not finite".into(),
            ));
        }
        let n = self.state.particle_count;
        for (what, len) in [
            ("positions", positions.len()),
            ("velocities", velocities.len()),
            ("fixed flags", fixed.len()),
        ] {
            if len != n {
                return Err(WobbleError::DimensionMismatch {
                    what,
                    expected: n,
                    actual: len,
                });
            }
        }

        self.state.positions.copy_from_slice(positions);
        self.state.velocities.copy_from_slice(velocities);
        self.state.fixed.copy_from_slice(fixed);
        self.state.clear_forces();
        self.frame = frame;
        self.last_rotation = rotation;
        Ok(())
    }

    fn check_index(&self, id: ParticleId) -> WobbleResult<usize> {
        let i = id.index();
        if i >= self.state.particle_count {
            return Err(WobbleError::IndexOutOfRange {
                index: i,
                len: self.state.particle_count,
            });
        }
        Ok(i)
    }

    // ─── Accessors ───────────────────────────────────────────

    /// Number of particles. Fixed at creation.
    pub fn particle_count(&self) -> usize {
        self.state.particle_count
    }

    /// Positions after the most recent step (rest shape before the first).
    pub fn positions(&self) -> &[Vec3] {
        &self.state.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.state.velocities
    }

    pub fn rest_positions(&self) -> &[Vec3] {
        &self.state.rest
    }

    pub fn masses(&self) -> &[f64] {
        &self.state.masses
    }

    /// Whether particle `id` is pinned. Out-of-range ids are not pinned.
    pub fn is_fixed(&self, id: ParticleId) -> bool {
        self.state.fixed.get(id.index()).copied().unwrap_or(false)
    }

    /// Pin flags for every particle.
    pub fn fixed_flags(&self) -> &[bool] {
        &self.state.fixed
    }

    pub fn fixed_count(&self) -> usize {
        self.state.fixed_count()
    }

    pub fn params(&self) -> &DeformationParams {
        &self.params
    }

    /// Total kinetic energy of the movable particles.
    pub fn kinetic_energy(&self) -> f64 {
        self.state.kinetic_energy()
    }

    /// Number of completed steps.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Rotation from the most recent frame that ran a fit.
    pub fn rotation(&self) -> Mat3 {
        self.last_rotation
    }

    /// Read-only view of the full particle state.
    pub fn state(&self) -> &ParticleState {
        &self.state
    }
}
