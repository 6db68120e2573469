//! Benchmark runner — the reference host frame loop.
//!
//! [`run_scene`] owns the host's point buffer and drives a [`Body`]
//! through it the way an animation host would: apply drags to the
//! buffer, queue gravity, step, then copy the integrated positions back
//! into the buffer for the next frame.

use std::path::Path;
use std::time::Instant;

use wobble_debug::hooks::InspectionHook;
use wobble_io::contract::{SceneInput, SceneMetrics, SceneOutput};
use wobble_material::PresetDatabase;
use wobble_math::Vec3;
use wobble_solver::{AppliedMode, Body};
use wobble_types::{ParticleId, WobbleResult};

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Everything a finished host loop produced.
#[derive(Debug, Clone)]
pub struct SceneRun {
    /// The body after the last frame.
    pub body: Body,
    /// Final positions and aggregate metrics.
    pub output: SceneOutput,
    /// Wall time of each step (seconds).
    pub step_times: Vec<f64>,
}

/// Builds a body from `scene` and runs the host loop to completion.
///
/// Relative mesh paths resolve against `base_dir`. Every hook sees the
/// full frame lifecycle.
pub fn run_scene(
    scene: &SceneInput,
    base_dir: &Path,
    presets: &PresetDatabase,
    hooks: &mut [&mut dyn InspectionHook],
) -> WobbleResult<SceneRun> {
    let rest = scene.shape.rest_points(base_dir)?;
    let n = rest.len();
    let masses = scene.resolve_masses(presets, n);
    let mut body = Body::new(&rest, masses.as_deref())?;
    body.set_params(scene.resolve_params(presets)?)?;
    for &index in &scene.fixed {
        body.set_fixed(ParticleId(index), true)?;
    }

    let drive = &scene.drive;
    let offset = Vec3::from_array(drive.initial_offset);
    let mut host: Vec<Vec3> = match &drive.initial_positions {
        Some(initial) => initial.iter().map(|&p| Vec3::from_array(p) + offset).collect(),
        None => rest.iter().map(|&p| p + offset).collect(),
    };
    let gravity = Vec3::from_array(drive.gravity);

    let mut metrics = SceneMetrics::default();
    let mut step_times = Vec::with_capacity(drive.frames as usize);
    let start = Instant::now();

    for frame in 0..drive.frames {
        for drag in drive.drags.iter().filter(|d| d.is_active(frame)) {
            if let Some(p) = host.get_mut(drag.particle as usize) {
                *p += Vec3::from_array(drag.velocity) * drive.dt;
            }
        }
        if gravity != Vec3::ZERO {
            for i in 0..n {
                let id = ParticleId::from(i);
                if body.is_fixed(id) {
                    continue;
                }
                let mass = body.masses()[i];
                body.add_force(id, gravity * mass)?;
            }
        }

        let frame_id = body.frame();
        for hook in hooks.iter_mut() {
            hook.on_frame_begin(frame_id, drive.dt);
        }

        let report = body.step(&host, drive.dt)?;
        step_times.push(report.wall_time);
        if report.fallbacks().next().is_some() {
            metrics.fallback_frames += 1;
        }
        if report.applied == AppliedMode::Skipped {
            metrics.skipped_frames += 1;
        }
        metrics.reset_particles += report.reset_count as u64;
        for hook in hooks.iter_mut() {
            hook.on_report(&report);
        }

        host.copy_from_slice(body.positions());

        let kinetic_energy = body.kinetic_energy();
        for hook in hooks.iter_mut() {
            hook.on_frame_end(frame_id, kinetic_energy);
        }
    }

    for hook in hooks.iter_mut() {
        hook.on_simulation_end();
    }

    metrics.wall_time_seconds = start.elapsed().as_secs_f64();
    metrics.frame_count = drive.frames;
    metrics.final_kinetic_energy = body.kinetic_energy();
    metrics.max_displacement = body
        .positions()
        .iter()
        .zip(body.rest_positions())
        .map(|(p, r)| p.distance(*r))
        .fold(0.0, f64::max);

    tracing::info!(
        particles = n,
        frames = drive.frames,
        wall_time = metrics.wall_time_seconds,
        fallback_frames = metrics.fallback_frames,
        "scene finished"
    );

    let output = SceneOutput {
        positions: host.iter().map(|p| p.to_array()).collect(),
        metrics,
    };
    Ok(SceneRun {
        body,
        output,
        step_times,
    })
}

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario.
    ///
    /// Returns metrics for the completed run.
    pub fn run(scenario: &Scenario) -> WobbleResult<BenchmarkMetrics> {
        let presets = PresetDatabase::with_defaults();
        let run = run_scene(&scenario.scene, Path::new("."), &presets, &mut [])?;
        Ok(BenchmarkMetrics::from_run(scenario.kind.name(), &run))
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> WobbleResult<Vec<BenchmarkMetrics>> {
        ScenarioKind::all()
            .iter()
            .map(|&kind| Self::run(&Scenario::from_kind(kind)))
            .collect()
    }
}
