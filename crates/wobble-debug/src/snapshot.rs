//! Body snapshot serialization for replay and debugging.
//!
//! Snapshots capture a body completely (rest shape, masses, dynamic
//! state, pins, parameters and the last fitted rotation) so that a
//! simulation can be resumed or replayed bit-for-bit from that point.

use std::path::Path;

use serde::{Deserialize, Serialize};
use wobble_math::{Mat3, Vec3};
use wobble_solver::{Body, DeformationParams};
use wobble_types::{WobbleError, WobbleResult};

/// A complete body snapshot.
///
/// Serialized with `bincode` for compact binary output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    /// Number of completed frames when this snapshot was taken.
    pub frame: u64,
    /// Simulation time in seconds.
    pub sim_time: f64,
    pub params: DeformationParams,
    pub rest: Vec<Vec3>,
    pub masses: Vec<f64>,
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub fixed: Vec<bool>,
    /// Rotation reported by the last fit before the snapshot.
    pub rotation: Mat3,
}

impl BodySnapshot {
    /// Captures the full state of `body`.
    pub fn from_body(body: &Body, sim_time: f64) -> Self {
        Self {
            frame: body.frame(),
            sim_time,
            params: body.params().clone(),
            rest: body.rest_positions().to_vec(),
            masses: body.masses().to_vec(),
            positions: body.positions().to_vec(),
            velocities: body.velocities().to_vec(),
            fixed: body.fixed_flags().to_vec(),
            rotation: body.rotation(),
        }
    }

    /// Number of particles in the snapshot.
    pub fn particle_count(&self) -> usize {
        self.rest.len()
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> WobbleResult<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| WobbleError::Serialization(format!("snapshot encoding failed: {e}")))
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> WobbleResult<Self> {
        let snapshot: Self = bincode::deserialize(data)
            .map_err(|e| WobbleError::Serialization(format!("snapshot decoding failed: {e}")))?;
        snapshot.check_lengths()?;
        Ok(snapshot)
    }

    /// Writes the binary snapshot to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> WobbleResult<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Reads a binary snapshot from `path`.
    pub fn load(path: impl AsRef<Path>) -> WobbleResult<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }

    /// Overwrites the dynamic state and parameters of an existing body.
    ///
    /// The body must have been created from the same rest shape.
    pub fn restore_into(&self, body: &mut Body) -> WobbleResult<()> {
        if body.particle_count() != self.particle_count() {
            return Err(WobbleError::DimensionMismatch {
                what: "snapshot particles",
                expected: body.particle_count(),
                actual: self.particle_count(),
            });
        }
        if body.rest_positions() != self.rest.as_slice() {
            return Err(WobbleError::InvalidRestShape(
                "snapshot was taken from a different rest shape".into(),
            ));
        }

        body.set_params(self.params.clone())?;
        body.restore(
            &self.positions,
            &self.velocities,
            &self.fixed,
            self.frame,
            self.rotation,
        )?;
        tracing::debug!(frame = self.frame, "body restored from snapshot");
        Ok(())
    }

    /// Rebuilds a body from scratch.
    pub fn to_body(&self) -> WobbleResult<Body> {
        let mut body = Body::new(&self.rest, Some(&self.masses))?;
        self.restore_into(&mut body)?;
        Ok(body)
    }

    fn check_lengths(&self) -> WobbleResult<()> {
        let n = self.rest.len();
        for (what, len) in [
            ("snapshot masses", self.masses.len()),
            ("snapshot positions", self.positions.len()),
            ("snapshot velocities", self.velocities.len()),
            ("snapshot fixed flags", self.fixed.len()),
        ] {
            if len != n {
                return Err(WobbleError::DimensionMismatch {
                    what,
                    expected: n,
                    actual: len,
                });
            }
        }
        Ok(())
    }
}
