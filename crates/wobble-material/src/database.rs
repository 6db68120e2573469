//! Preset database with the built-in materials.
//!
//! The 5 built-in presets span the useful range of the parameter space,
//! from a fully rigid body to a soft quadratic jelly.

use std::collections::HashMap;

use wobble_solver::{DeformationMode, DeformationParams};

use crate::properties::MaterialPreset;

/// A named collection of material presets.
///
/// Presets are looked up by name (e.g., "jelly", "rubber").
/// Custom presets can be registered at runtime.
#[derive(Debug, Clone)]
pub struct PresetDatabase {
    presets: HashMap<String, MaterialPreset>,
}

impl PresetDatabase {
    /// Creates a new database with the 5 built-in presets.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();

        db.register(jelly());
        db.register(rubber());
        db.register(stiff());
        db.register(putty());
        db.register(rigid());

        db
    }

    /// Creates an empty database.
    pub fn empty() -> Self {
        Self {
            presets: HashMap::new(),
        }
    }

    /// Registers a preset. Overwrites if the name already exists.
    pub fn register(&mut self, preset: MaterialPreset) {
        self.presets.insert(preset.name.clone(), preset);
    }

    /// Looks up a preset by name. Returns `None` if not found.
    pub fn get(&self, name: &str) -> Option<&MaterialPreset> {
        self.presets.get(name)
    }

    /// Returns all registered preset names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Returns true if the database is empty.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetDatabase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Presets ─────────────────────────────────────────────────

/// Jelly — soft, wobbly, bulges under load.
/// Quadratic fit with a high blend factor and light damping.
fn jelly() -> MaterialPreset {
    MaterialPreset {
        name: "jelly".into(),
        description: "Soft quadratic body that bulges and wobbles".into(),
        particle_mass: 1.0,
        params: DeformationParams {
            mode: DeformationMode::Quadratic,
            beta: 0.8,
            tau: 0.08,
            perturbation: 1.0e-4,
            damping: 0.02,
            max_displacement: 10.0,
        },
    }
}

/// Rubber — springy, stretches and shears but recovers quickly.
fn rubber() -> MaterialPreset {
    MaterialPreset {
        name: "rubber".into(),
        description: "Springy linear body that stretches and shears".into(),
        particle_mass: 1.0,
        params: DeformationParams {
            mode: DeformationMode::Linear,
            beta: 0.6,
            tau: 0.03,
            perturbation: 1.0e-4,
            damping: 0.04,
            max_displacement: 10.0,
        },
    }
}

/// Stiff — mostly rigid with a little linear give.
fn stiff() -> MaterialPreset {
    MaterialPreset {
        name: "stiff".into(),
        description: "Mostly rigid body with slight linear give".into(),
        particle_mass: 2.0,
        params: DeformationParams {
            mode: DeformationMode::Linear,
            beta: 0.15,
            tau: 0.01,
            perturbation: 1.0e-4,
            damping: 0.08,
            max_displacement: 5.0,
        },
    }
}

/// Putty — heavy, slow to recover, strongly damped.
fn putty() -> MaterialPreset {
    MaterialPreset {
        name: "putty".into(),
        description: "Heavy, slow-recovering, strongly damped body".into(),
        particle_mass: 3.0,
        params: DeformationParams {
            mode: DeformationMode::Quadratic,
            beta: 0.95,
            tau: 0.5,
            perturbation: 1.0e-3,
            damping: 0.3,
            max_displacement: 10.0,
        },
    }
}

/// Rigid — rotation only; the shape never deforms at rest.
fn rigid() -> MaterialPreset {
    MaterialPreset {
        name: "rigid".into(),
        description: "Rotation-only body that keeps its rest shape".into(),
        particle_mass: 1.0,
        params: DeformationParams::rigid(),
    }
}
