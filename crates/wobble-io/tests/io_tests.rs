//! Integration tests for wobble-io.

use std::path::Path;

use wobble_io::contract::{Drag, FrameDrive, SceneInput, ShapeSpec};
use wobble_io::validator::{validate_input, validate_mesh_json};
use wobble_material::PresetDatabase;
use wobble_mesh::generators::cube;
use wobble_solver::{DeformationMode, DeformationParams};
use wobble_types::WobbleError;

const SCENE: &str = r#"
preset = "jelly"
fixed = [0, 1]

[shape]
kind = "lattice"
counts = [3, 3, 3]
extent = [2.0, 2.0, 2.0]

[drive]
frames = 30
dt = 0.01
gravity = [0.0, -9.81, 0.0]

[[drive.drags]]
particle = 26
end_frame = 10
velocity = [1.0, 0.0, 0.0]
"#;

fn here() -> &'static Path {
    Path::new(".")
}

fn make_valid_input() -> SceneInput {
    SceneInput::new(ShapeSpec::Cube { size: 1.0 })
}

// ─── Contract Tests ───────────────────────────────────────────

#[test]
fn default_drive() {
    let drive = FrameDrive::default();
    assert_eq!(drive.frames, 120);
    assert!((drive.dt - 1.0 / 60.0).abs() < 1e-12);
    assert_eq!(drive.gravity, [0.0; 3]);
}

#[test]
fn scene_from_toml() {
    let scene = SceneInput::from_toml_str(SCENE).unwrap();
    assert_eq!(scene.preset.as_deref(), Some("jelly"));
    assert_eq!(scene.fixed, vec![0, 1]);
    assert_eq!(scene.drive.frames, 30);
    assert_eq!(scene.drive.drags.len(), 1);
    assert_eq!(scene.drive.drags[0].start_frame, 0);
    assert!(matches!(scene.shape, ShapeSpec::Lattice { counts: [3, 3, 3], .. }));
}

#[test]
fn minimal_toml_uses_defaults() {
    let scene = SceneInput::from_toml_str("[shape]\nkind = \"cube\"\nsize = 2.0\n").unwrap();
    assert_eq!(scene.drive, FrameDrive::default());
    assert!(scene.params.is_none());
    assert_eq!(scene.resolve_params(&PresetDatabase::default()).unwrap(), DeformationParams::default());
}

#[test]
fn malformed_toml_is_a_serialization_error() {
    let err = SceneInput::from_toml_str("[shape]\nkind = \"dodecahedron\"\n").unwrap_err();
    assert!(matches!(err, WobbleError::Serialization(_)));
}

#[test]
fn explicit_params_override_preset() {
    let presets = PresetDatabase::with_defaults();
    let mut scene = SceneInput::from_toml_str(SCENE).unwrap();
    assert_eq!(scene.resolve_params(&presets).unwrap().mode, DeformationMode::Quadratic);

    scene.params = Some(DeformationParams::linear(0.2));
    assert_eq!(scene.resolve_params(&presets).unwrap(), DeformationParams::linear(0.2));
}

#[test]
fn preset_masses_apply() {
    let presets = PresetDatabase::with_defaults();
    let mut scene = make_valid_input();
    assert!(scene.resolve_masses(&presets, 8).is_none());

    scene.preset = Some("putty".into());
    assert_eq!(scene.resolve_masses(&presets, 8), Some(vec![3.0; 8]));

    scene.masses = Some(vec![0.5; 8]);
    assert_eq!(scene.resolve_masses(&presets, 8), Some(vec![0.5; 8]));
}

#[test]
fn shape_points() {
    let cube_points = ShapeSpec::Cube { size: 1.0 }.rest_points(here()).unwrap();
    assert_eq!(cube_points.len(), 8);

    let explicit = ShapeSpec::Points {
        points: vec![[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]],
    };
    let points = explicit.rest_points(here()).unwrap();
    assert_eq!(points[1].y, 2.0);
}

#[test]
fn shape_from_mesh_file() {
    let dir = std::env::temp_dir();
    let name = format!("wobble_io_mesh_{}.json", std::process::id());
    std::fs::write(dir.join(&name), serde_json::to_string(&cube(2.0)).unwrap()).unwrap();

    let shape = ShapeSpec::Mesh { path: name.clone().into() };
    let points = shape.rest_points(&dir).unwrap();
    let _ = std::fs::remove_file(dir.join(&name));
    assert_eq!(points.len(), 8);
    assert_eq!(points[7].z, 1.0);
}

#[test]
fn missing_mesh_file_is_io_error() {
    let shape = ShapeSpec::Mesh {
        path: "definitely/not/here.json".into(),
    };
    assert!(matches!(shape.rest_points(here()), Err(WobbleError::Io(_))));
}

#[test]
fn drag_activity_window() {
    let drag = Drag {
        particle: 0,
        start_frame: 2,
        end_frame: 4,
        velocity: [0.0; 3],
    };
    assert!(!drag.is_active(1));
    assert!(drag.is_active(2));
    assert!(drag.is_active(3));
    assert!(!drag.is_active(4));
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn valid_input_passes() {
    let presets = PresetDatabase::with_defaults();
    assert_eq!(validate_input(&make_valid_input(), here(), &presets).unwrap(), 8);
    let scene = SceneInput::from_toml_str(SCENE).unwrap();
    assert_eq!(validate_input(&scene, here(), &presets).unwrap(), 27);
}

#[test]
fn wrong_mass_length() {
    let mut input = make_valid_input();
    input.masses = Some(vec![1.0; 3]);
    let err = validate_input(&input, here(), &PresetDatabase::default()).unwrap_err();
    assert!(matches!(err, WobbleError::DimensionMismatch { expected: 8, actual: 3, .. }));
}

#[test]
fn non_positive_mass_rejected() {
    let mut input = make_valid_input();
    input.masses = Some(vec![1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    assert!(validate_input(&input, here(), &PresetDatabase::default()).is_err());
}

#[test]
fn fixed_index_out_of_range() {
    let mut input = make_valid_input();
    input.fixed = vec![8];
    let err = validate_input(&input, here(), &PresetDatabase::default()).unwrap_err();
    assert!(matches!(err, WobbleError::IndexOutOfRange { index: 8, len: 8 }));
}

#[test]
fn all_fixed_scene_is_accepted() {
    let mut input = make_valid_input();
    input.fixed = (0..8).collect();
    assert_eq!(validate_input(&input, here(), &PresetDatabase::default()).unwrap(), 8);
}

#[test]
fn unknown_preset_rejected() {
    let mut input = make_valid_input();
    input.preset = Some("granite".into());
    assert!(matches!(
        validate_input(&input, here(), &PresetDatabase::default()),
        Err(WobbleError::InvalidConfig(_))
    ));
}

#[test]
fn invalid_params_rejected() {
    let mut input = make_valid_input();
    input.params = Some(DeformationParams::linear(2.0));
    assert!(validate_input(&input, here(), &PresetDatabase::default()).is_err());
}

#[test]
fn negative_dt_rejected() {
    let mut input = make_valid_input();
    input.drive.dt = -0.01;
    assert!(matches!(
        validate_input(&input, here(), &PresetDatabase::default()),
        Err(WobbleError::InvalidTimestep(_))
    ));
}

#[test]
fn zero_frames_rejected() {
    let mut input = make_valid_input();
    input.drive.frames = 0;
    assert!(validate_input(&input, here(), &PresetDatabase::default()).is_err());
}

#[test]
fn bad_generator_arguments_rejected() {
    let presets = PresetDatabase::default();
    for shape in [
        ShapeSpec::Cube { size: -1.0 },
        ShapeSpec::Lattice { counts: [0, 2, 2], extent: [1.0; 3] },
        ShapeSpec::Line { count: 1, length: 1.0 },
        ShapeSpec::Points { points: vec![] },
        ShapeSpec::Points { points: vec![[f64::NAN, 0.0, 0.0]] },
    ] {
        assert!(validate_input(&SceneInput::new(shape.clone()), here(), &presets).is_err(), "{shape:?}");
    }
}

#[test]
fn drag_out_of_range_rejected() {
    let mut input = make_valid_input();
    input.drive.drags.push(Drag {
        particle: 40,
        start_frame: 0,
        end_frame: 5,
        velocity: [1.0, 0.0, 0.0],
    });
    assert!(validate_input(&input, here(), &PresetDatabase::default()).is_err());
}

#[test]
fn mesh_json_validation() {
    let json = serde_json::to_string(&cube(1.0)).unwrap();
    assert_eq!(validate_mesh_json(&json).unwrap(), 8);
    assert!(validate_mesh_json("{not json").is_err());
    assert!(validate_mesh_json(r#"{"pos_x":[],"pos_y":[],"pos_z":[]}"#).is_err());
}

#[test]
fn initial_positions_must_match_shape() {
    let mut input = make_valid_input();
    input.drive.initial_positions = Some(vec![[0.0; 3]; 5]);
    assert!(matches!(
        validate_input(&input, here(), &PresetDatabase::default()),
        Err(WobbleError::DimensionMismatch { what: "initial positions", .. })
    ));
}
