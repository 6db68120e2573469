//! Elastic integrator — pulls particles toward their goals.
//!
//! Explicit, damped update per movable particle:
//!
//! ```text
//! v += (g − x)·dt/τ + (F/m)·dt − v·damping
//! x += v·dt
//! F  = 0
//! ```
//!
//! Pinned particles keep their position; their velocity and force are
//! zeroed. After the update any particle that is no longer finite is put
//! back on its rest position with zero velocity.

use wobble_math::{guard, Vec3};

use crate::config::DeformationParams;
use crate::state::ParticleState;

/// Advance `state` by one step toward `goals`.
///
/// Returns the number of particles reset to rest because their state
/// became non-finite.
pub fn integrate(
    state: &mut ParticleState,
    goals: &[Vec3],
    params: &DeformationParams,
    dt: f64,
) -> usize {
    let stiffness = dt / params.tau;

    for i in 0..state.particle_count {
        if state.fixed[i] {
            state.velocities[i] = Vec3::ZERO;
            state.forces[i] = Vec3::ZERO;
            continue;
        }

        let x = state.positions[i];
        let v = state.velocities[i];

        let elasticity = (goals[i] - x) * stiffness;
        let acceleration = state.forces[i] / state.masses[i];
        let v = v + elasticity + acceleration * dt - v * params.damping;

        state.velocities[i] = v;
        state.positions[i] = x + v * dt;
        state.forces[i] = Vec3::ZERO;
    }

    recover_non_finite(state)
}

/// Reset every non-finite particle to rest with zero velocity.
pub fn recover_non_finite(state: &mut ParticleState) -> usize {
    let mut reset = 0;
    for i in 0..state.particle_count {
        if guard::is_finite_vec(state.positions[i]) && guard::is_finite_vec(state.velocities[i]) {
            continue;
        }
        state.positions[i] = state.rest[i];
        state.velocities[i] = Vec3::ZERO;
        state.forces[i] = Vec3::ZERO;
        reset += 1;
    }

    if reset > 0 {
        tracing::warn!(reset, "non-finite particles reset to rest");
    }
    reset
}
