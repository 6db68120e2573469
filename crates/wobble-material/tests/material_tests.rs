//! Integration tests for wobble-material.

use wobble_math::Vec3;
use wobble_material::{MaterialPreset, PresetDatabase};
use wobble_solver::{DeformationMode, DeformationParams};

// ─── MaterialPreset Tests ─────────────────────────────────────

fn custom_preset() -> MaterialPreset {
    MaterialPreset {
        name: "custom".into(),
        description: String::new(),
        particle_mass: 0.5,
        params: DeformationParams::linear(0.4),
    }
}

#[test]
fn preset_masses() {
    let masses = custom_preset().masses(4);
    assert_eq!(masses, vec![0.5; 4]);
}

#[test]
fn preset_stiffness() {
    let preset = custom_preset();
    assert!((preset.stiffness() - 50.0).abs() < 1e-9);
}

#[test]
fn preset_builds_body() {
    let rest = vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
    let body = custom_preset().build_body(&rest).unwrap();
    assert_eq!(body.particle_count(), 4);
    assert_eq!(body.masses(), &[0.5; 4]);
    assert_eq!(body.params().mode, DeformationMode::Linear);
}

#[test]
fn invalid_preset_params_rejected() {
    let mut preset = custom_preset();
    preset.params.tau = -1.0;
    assert!(preset.build_body(&[Vec3::ZERO, Vec3::X]).is_err());
}

#[test]
fn preset_serialization() {
    let preset = custom_preset();
    let json = serde_json::to_string(&preset).unwrap();
    let recovered: MaterialPreset = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, preset);
}

// ─── PresetDatabase Tests ─────────────────────────────────────

#[test]
fn default_database_has_five_presets() {
    let db = PresetDatabase::with_defaults();
    assert_eq!(db.len(), 5);
    assert_eq!(db.names(), vec!["jelly", "putty", "rigid", "rubber", "stiff"]);
}

#[test]
fn every_default_preset_is_valid() {
    let db = PresetDatabase::with_defaults();
    for name in db.names() {
        let preset = db.get(name).unwrap();
        assert_eq!(preset.name, name);
        assert!(preset.params.validate().is_ok(), "{name}");
        assert!(preset.particle_mass > 0.0);
    }
}

#[test]
fn missing_preset_returns_none() {
    let db = PresetDatabase::with_defaults();
    assert!(db.get("nonexistent").is_none());
}

#[test]
fn custom_preset_registration() {
    let mut db = PresetDatabase::empty();
    assert!(db.is_empty());
    db.register(custom_preset());
    assert_eq!(db.len(), 1);
    assert!(db.get("custom").is_some());

    // Re-registering overwrites.
    let mut heavier = custom_preset();
    heavier.particle_mass = 9.0;
    db.register(heavier);
    assert_eq!(db.len(), 1);
    assert_eq!(db.get("custom").unwrap().particle_mass, 9.0);
}

#[test]
fn rigid_preset_does_not_deform() {
    let db = PresetDatabase::with_defaults();
    assert!(!db.get("rigid").unwrap().is_deformable());
    assert!(db.get("jelly").unwrap().is_deformable());
}

#[test]
fn stiffness_ordering() {
    let db = PresetDatabase::with_defaults();
    let stiff = db.get("stiff").unwrap();
    let jelly = db.get("jelly").unwrap();
    let putty = db.get("putty").unwrap();
    assert!(stiff.stiffness() > jelly.stiffness());
    assert!(jelly.stiffness() > putty.stiffness());
}
