//! Integration tests for wobble-bench.

use std::path::Path;

use wobble_bench::metrics::BenchmarkMetrics;
use wobble_bench::runner::{run_scene, BenchmarkRunner};
use wobble_bench::scenarios::{Scenario, ScenarioKind};
use wobble_debug::hooks::TelemetryHook;
use wobble_io::validator::validate_input;
use wobble_material::PresetDatabase;
use wobble_math::Vec3;
use wobble_telemetry::events::EventKind;
use wobble_types::WobbleError;

fn here() -> &'static Path {
    Path::new(".")
}

// ─── Scenario Tests ───────────────────────────────────────────

#[test]
fn all_scenarios() {
    assert_eq!(ScenarioKind::all().len(), 5);
    for &kind in ScenarioKind::all() {
        assert_eq!(ScenarioKind::from_name(kind.name()), Some(kind));
        assert_eq!(Scenario::from_kind(kind).kind, kind);
    }
    assert_eq!(ScenarioKind::from_name("self_fold"), None);
}

#[test]
fn every_scenario_validates() {
    let presets = PresetDatabase::with_defaults();
    for &kind in ScenarioKind::all() {
        let scenario = Scenario::from_kind(kind);
        assert!(
            validate_input(&scenario.scene, here(), &presets).is_ok(),
            "{} failed validation",
            kind.name()
        );
    }
}

#[test]
fn pinned_beam_setup() {
    let s = Scenario::pinned_beam();
    // One 2×2 end face
    assert_eq!(s.scene.fixed.len(), 4);
    assert_eq!(s.scene.drive.gravity, [0.0, -9.81, 0.0]);
}

#[test]
fn twisted_lattice_setup() {
    let s = Scenario::twisted_lattice();
    assert_eq!(s.scene.drive.initial_positions.as_ref().map(Vec::len), Some(125));
    assert_eq!(s.scene.preset.as_deref(), Some("jelly"));
}

// ─── Runner Tests ─────────────────────────────────────────────

#[test]
fn rigid_shift_holds_translation() {
    let presets = PresetDatabase::with_defaults();
    let run = run_scene(&Scenario::rigid_shift().scene, here(), &presets, &mut []).unwrap();

    for (p, r) in run.body.positions().iter().zip(run.body.rest_positions()) {
        assert!(p.distance(*r + Vec3::X) < 1e-9, "{p} vs {r}");
    }
    assert!(run.output.metrics.final_kinetic_energy < 1e-12);
    assert!((run.output.metrics.max_displacement - 1.0).abs() < 1e-9);
    assert_eq!(run.output.metrics.fallback_frames, 0);
}

#[test]
fn pinned_beam_keeps_pins_and_sags() {
    let presets = PresetDatabase::with_defaults();
    let scenario = Scenario::pinned_beam().with_frames(30);
    let run = run_scene(&scenario.scene, here(), &presets, &mut []).unwrap();

    for &i in &scenario.scene.fixed {
        let i = i as usize;
        assert_eq!(run.body.positions()[i], run.body.rest_positions()[i]);
    }
    assert!(run.output.metrics.max_displacement > 0.0);
    let sagged = run
        .body
        .positions()
        .iter()
        .zip(run.body.rest_positions())
        .any(|(p, r)| p.y < r.y);
    assert!(sagged);
}

#[test]
fn output_matches_body() {
    let presets = PresetDatabase::with_defaults();
    let scenario = Scenario::dragged_sphere().with_frames(20);
    let run = run_scene(&scenario.scene, here(), &presets, &mut []).unwrap();

    assert_eq!(run.output.positions.len(), run.body.particle_count());
    for (out, p) in run.output.positions.iter().zip(run.body.positions()) {
        assert_eq!(Vec3::from_array(*out), *p);
    }
    assert_eq!(run.output.metrics.frame_count, 20);
    assert_eq!(run.step_times.len(), 20);
    assert_eq!(run.body.frame(), 20);
}

#[test]
fn scenarios_stay_finite() {
    let presets = PresetDatabase::with_defaults();
    for &kind in ScenarioKind::all() {
        let scenario = Scenario::from_kind(kind).with_frames(40);
        let run = run_scene(&scenario.scene, here(), &presets, &mut []).unwrap();
        assert!(
            run.body.positions().iter().all(|p| p.is_finite()),
            "{} produced non-finite positions",
            kind.name()
        );
        assert!(run.output.metrics.final_kinetic_energy.is_finite());
        assert_eq!(run.output.metrics.reset_particles, 0, "{}", kind.name());
    }
}

#[test]
fn runs_are_deterministic() {
    let presets = PresetDatabase::with_defaults();
    let scenario = Scenario::scattered_points().with_frames(20);
    let a = run_scene(&scenario.scene, here(), &presets, &mut []).unwrap();
    let b = run_scene(&scenario.scene, here(), &presets, &mut []).unwrap();
    assert_eq!(a.output.positions, b.output.positions);
}

#[test]
fn hooks_see_every_frame() {
    let presets = PresetDatabase::with_defaults();
    let scenario = Scenario::pinned_beam().with_frames(5);
    let mut hook = TelemetryHook::new();
    run_scene(&scenario.scene, here(), &presets, &mut [&mut hook]).unwrap();

    let events = hook.drain_events();
    let begins = events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::FrameBegin { .. }))
        .count();
    let energies = events
        .iter()
        .filter(|e| matches!(e.kind, EventKind::Energy { .. }))
        .count();
    assert_eq!(begins, 5);
    assert_eq!(energies, 5);
    assert_eq!(events[0].frame, 0);
    assert_eq!(events.last().map(|e| e.frame), Some(4));
}

#[test]
fn invalid_scene_is_an_error() {
    let presets = PresetDatabase::with_defaults();
    let mut scene = Scenario::rigid_shift().scene;
    scene.fixed = vec![99];
    let err = run_scene(&scene, here(), &presets, &mut []).unwrap_err();
    assert!(matches!(err, WobbleError::IndexOutOfRange { index: 99, .. }));
}

#[test]
fn run_all_scenarios() {
    for &kind in ScenarioKind::all() {
        let scenario = Scenario::from_kind(kind).with_frames(3);
        let metrics = BenchmarkRunner::run(&scenario).unwrap();
        assert_eq!(metrics.scenario, kind.name());
        assert_eq!(metrics.frames, 3);
        assert!(metrics.particle_count > 0);
        assert!(metrics.min_step_time <= metrics.max_step_time);
    }
}

// ─── Metrics Tests ────────────────────────────────────────────

#[test]
fn metrics_csv_output() {
    let metrics = BenchmarkMetrics {
        scenario: "test".into(),
        particle_count: 125,
        frames: 100,
        total_wall_time: 1.5,
        avg_step_time: 0.015,
        min_step_time: 0.01,
        max_step_time: 0.02,
        final_kinetic_energy: 1e-5,
        max_displacement: 0.5,
        fallback_frames: 2,
        reset_particles: 0,
    };

    let csv = BenchmarkMetrics::to_csv(&[metrics.clone(), metrics]);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("scenario,particle_count"));
    assert!(lines[1].starts_with("test,125,100,"));
    assert!(lines[1].ends_with(",2,0"));
    assert_eq!(
        lines[0].split(',').count(),
        lines[1].split(',').count()
    );
}
