//! Integration tests for wobble-debug.

use wobble_debug::hooks::{InspectionHook, TelemetryHook};
use wobble_debug::snapshot::BodySnapshot;
use wobble_math::{Mat3, Vec3};
use wobble_solver::{Body, DeformationParams};
use wobble_telemetry::events::EventKind;
use wobble_types::{ParticleId, WobbleError};

fn tetra() -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ]
}

fn stepped_body() -> Body {
    let rest = tetra();
    let mut body = Body::new(&rest, Some(&[1.0, 2.0, 1.0, 0.5])).unwrap();
    body.set_params(DeformationParams::linear(0.4)).unwrap();
    body.set_fixed(ParticleId(0), true).unwrap();
    let current: Vec<Vec3> = rest.iter().map(|&p| Mat3::from_rotation_z(0.2) * p).collect();
    for _ in 0..3 {
        body.step(&current, 0.01).unwrap();
    }
    body
}

// ─── Hook Tests ───────────────────────────────────────────────

#[test]
fn telemetry_hook_collects_events() {
    let mut body = Body::new(&tetra(), None).unwrap();
    let mut hook = TelemetryHook::new();

    hook.on_frame_begin(0, 0.01);
    let report = body.step(&tetra(), 0.01).unwrap();
    hook.on_report(&report);
    hook.on_frame_end(0, body.kinetic_energy());

    let events = hook.drain_events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].kind, EventKind::FrameBegin { dt: 0.01 });
    assert!(matches!(&events[1].kind, EventKind::FrameEnd { applied, .. } if applied == "rotation"));
    assert!(matches!(events[2].kind, EventKind::Energy { .. }));
}

#[test]
fn telemetry_hook_translates_warnings() {
    let rest = tetra();
    let mut body = Body::new(&rest, None).unwrap();
    for i in 0..4u32 {
        body.set_fixed(ParticleId(i), true).unwrap();
    }
    let mut hook = TelemetryHook::new();
    let report = body.step(&rest, 0.01).unwrap();
    hook.on_report(&report);

    let events = hook.drain_events();
    assert_eq!(
        events[0].kind,
        EventKind::DeformationSkipped {
            reason: "all_fixed".into()
        }
    );
    assert!(events[0].kind.is_warning());
}

#[test]
fn hook_drain_clears() {
    let mut hook = TelemetryHook::new();
    hook.on_frame_begin(0, 0.01);
    let _ = hook.drain_events();
    let events = hook.drain_events();
    assert!(events.is_empty());
}

#[test]
fn hook_name() {
    let hook = TelemetryHook::new();
    assert_eq!(hook.name(), "telemetry_hook");
}

// ─── Snapshot Tests ───────────────────────────────────────────

#[test]
fn snapshot_round_trip() {
    let body = stepped_body();
    let snap = BodySnapshot::from_body(&body, 0.03);

    let bytes = snap.to_bytes().unwrap();
    let recovered = BodySnapshot::from_bytes(&bytes).unwrap();

    assert_eq!(recovered, snap);
    assert_eq!(recovered.frame, 3);
    assert_eq!(recovered.particle_count(), 4);
    assert!((recovered.sim_time - 0.03).abs() < 1e-10);
    assert!(recovered.fixed[0]);
}

#[test]
fn restored_body_replays_identically() {
    let original = stepped_body();
    let snap = BodySnapshot::from_body(&original, 0.0);
    let mut replay = snap.to_body().unwrap();
    let mut original = original;

    let current: Vec<Vec3> = tetra().iter().map(|&p| p * 1.1).collect();
    original.step(&current, 0.01).unwrap();
    replay.step(&current, 0.01).unwrap();

    assert_eq!(original.positions(), replay.positions());
    assert_eq!(original.velocities(), replay.velocities());
    assert_eq!(original.frame(), replay.frame());
    assert_eq!(replay.params(), &DeformationParams::linear(0.4));
}

#[test]
fn snapshot_carries_last_rotation() {
    let original = stepped_body();
    assert_ne!(original.rotation(), Mat3::IDENTITY);

    let snap = BodySnapshot::from_body(&original, 0.0);
    let recovered = BodySnapshot::from_bytes(&snap.to_bytes().unwrap()).unwrap();
    assert_eq!(recovered.rotation, original.rotation());
    assert_eq!(recovered.to_body().unwrap().rotation(), original.rotation());
}

#[test]
fn restore_rejects_other_shapes() {
    let snap = BodySnapshot::from_body(&stepped_body(), 0.0);

    let mut smaller = Body::new(&tetra()[..3], None).unwrap();
    assert!(matches!(
        snap.restore_into(&mut smaller),
        Err(WobbleError::DimensionMismatch { .. })
    ));

    let moved: Vec<Vec3> = tetra().iter().map(|&p| p + Vec3::X).collect();
    let mut other = Body::new(&moved, None).unwrap();
    assert!(matches!(
        snap.restore_into(&mut other),
        Err(WobbleError::InvalidRestShape(_))
    ));
}

#[test]
fn corrupt_bytes_are_an_error() {
    let result = BodySnapshot::from_bytes(&[1, 2, 3]);
    assert!(matches!(result, Err(WobbleError::Serialization(_))));
}

#[test]
fn snapshot_file_round_trip() {
    let path = std::env::temp_dir().join(format!("wobble_snapshot_{}.bin", std::process::id()));
    let snap = BodySnapshot::from_body(&stepped_body(), 1.5);
    snap.save(&path).unwrap();
    let loaded = BodySnapshot::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, snap);
}
