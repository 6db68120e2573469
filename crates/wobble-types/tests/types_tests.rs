//! Integration tests for wobble-types.

use wobble_types::constants;
use wobble_types::{ParticleId, WobbleError};

// ─── ID Tests ──────────────────────────────────────────────────

#[test]
fn particle_id_index() {
    let id = ParticleId(42);
    assert_eq!(id.index(), 42);
}

#[test]
fn particle_id_from_usize() {
    let id: ParticleId = 7usize.into();
    assert_eq!(id, ParticleId(7));
    assert_eq!(id.to_string(), "#7");
}

#[test]
fn ids_are_serializable() {
    let id = ParticleId(100);
    let json = serde_json::to_string(&id).unwrap();
    let deserialized: ParticleId = serde_json::from_str(&json).unwrap();
    assert_eq!(id, deserialized);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn dimension_mismatch_display() {
    let err = WobbleError::DimensionMismatch {
        what: "current positions",
        expected: 8,
        actual: 7,
    };
    let msg = err.to_string();
    assert!(msg.contains("current positions"));
    assert!(msg.contains('8'));
    assert!(msg.contains('7'));
}

#[test]
fn index_out_of_range_display() {
    let err = WobbleError::IndexOutOfRange { index: 12, len: 8 };
    assert!(err.to_string().contains("12"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "scene.toml");
    let err: WobbleError = io.into();
    assert!(matches!(err, WobbleError::Io(_)));
}

// ─── Constant Tests ───────────────────────────────────────────

#[test]
fn tolerances_are_ordered() {
    assert!(constants::DEGENERATE_MAGNITUDE < constants::SINGULAR_DET_THRESHOLD);
    assert!(constants::VOLUME_SCALE_MIN < 1.0 && constants::VOLUME_SCALE_MAX > 1.0);
    assert!(constants::AXIS_SNAP_THRESHOLD > 0.5 && constants::AXIS_SNAP_THRESHOLD < 1.0);
}
