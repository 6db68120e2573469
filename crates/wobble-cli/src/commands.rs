//! CLI command implementations.

use std::path::Path;

use wobble_bench::metrics::BenchmarkMetrics;
use wobble_bench::runner::{run_scene, BenchmarkRunner};
use wobble_bench::scenarios::{Scenario, ScenarioKind};
use wobble_debug::hooks::TelemetryHook;
use wobble_debug::snapshot::BodySnapshot;
use wobble_io::contract::SceneInput;
use wobble_io::validator::{validate_input, validate_mesh_json};
use wobble_material::PresetDatabase;
use wobble_telemetry::{EventBus, TracingSink};

/// Run a scene from a TOML config file.
pub fn simulate(
    config_path: &str,
    output_path: Option<&str>,
    snapshot_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wobble Simulation");
    println!("─────────────────");
    println!("Config: {config_path}");
    println!();

    let path = Path::new(config_path);
    let base_dir = path.parent().unwrap_or(Path::new("."));
    let presets = PresetDatabase::with_defaults();
    let scene = SceneInput::from_toml_file(path)?;
    let particle_count = validate_input(&scene, base_dir, &presets)?;
    let params = scene.resolve_params(&presets)?;

    println!("Particles:  {particle_count}");
    println!("Pinned:     {}", scene.fixed.len());
    println!("Mode:       {}", params.mode.name());
    println!(
        "Frames:     {} (dt = {:.4}s)",
        scene.drive.frames, scene.drive.dt
    );
    println!();

    let mut hook = TelemetryHook::new();
    let run = run_scene(&scene, base_dir, &presets, &mut [&mut hook])?;

    let mut bus = EventBus::new();
    bus.add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));
    for event in hook.drain_events() {
        bus.emit(event);
    }
    bus.finish();

    let metrics = &run.output.metrics;
    println!("  Wall time:       {:.3}s", metrics.wall_time_seconds);
    println!("  Final KE:        {:.6e}", metrics.final_kinetic_energy);
    println!("  Max displace:    {:.4}", metrics.max_displacement);
    println!("  Fallback frames: {}", metrics.fallback_frames);
    println!("  Skipped frames:  {}", metrics.skipped_frames);
    println!("  Reset particles: {}", metrics.reset_particles);
    println!();

    if let Some(out) = output_path {
        std::fs::write(out, serde_json::to_string_pretty(&run.output)?)?;
        println!("Output written to: {out}");
    }
    if let Some(snap) = snapshot_path {
        let sim_time = f64::from(scene.drive.frames) * scene.drive.dt;
        BodySnapshot::from_body(&run.body, sim_time).save(snap)?;
        println!("Snapshot written to: {snap}");
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(
    scenario_name: &str,
    frames: Option<u32>,
    output_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wobble Benchmark Suite");
    println!("══════════════════════");
    println!();

    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        let kind = ScenarioKind::from_name(scenario_name).ok_or_else(|| {
            let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
            format!(
                "Unknown scenario: '{scenario_name}'. Available: {}, all",
                available.join(", ")
            )
        })?;
        vec![kind]
    };

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let mut scenario = Scenario::from_kind(kind);
        if let Some(frames) = frames {
            scenario = scenario.with_frames(frames);
        }

        println!(
            "Running: {} ({} frames)",
            kind.name(),
            scenario.scene.drive.frames
        );

        let metrics = BenchmarkRunner::run(&scenario)
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Particles:     {}", metrics.particle_count);
        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Inspect a body snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wobble Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let snapshot = BodySnapshot::load(path)?;
    let body = snapshot.to_body()?;

    println!("Frame:        {}", snapshot.frame);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Particles:    {}", snapshot.particle_count());
    println!("Pinned:       {}", body.fixed_count());
    println!("Mode:         {}", snapshot.params.mode.name());
    println!("Kinetic E:    {:.6e}", body.kinetic_energy());

    let max_displacement = snapshot
        .positions
        .iter()
        .zip(&snapshot.rest)
        .map(|(p, r)| p.distance(*r))
        .fold(0.0, f64::max);
    println!("Max displace: {max_displacement:.4}");

    if !snapshot.positions.is_empty() {
        let min_y = snapshot.positions.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = snapshot.positions.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        println!("Y range:      [{min_y:.4}, {max_y:.4}]");
    }

    Ok(())
}

/// Validate a scene or mesh.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Wobble Validator");
    println!("────────────────");
    println!();

    let file = Path::new(path);
    match file.extension().and_then(|e| e.to_str()) {
        Some("toml") => {
            println!("Validating scene: {path}");
            let scene = SceneInput::from_toml_file(file)?;
            let base_dir = file.parent().unwrap_or(Path::new("."));
            let n = validate_input(&scene, base_dir, &PresetDatabase::with_defaults())?;
            println!("✅ Scene is valid ({n} particles).");
        }
        Some("json") => {
            println!("Validating mesh: {path}");
            let n = validate_mesh_json(&std::fs::read_to_string(file)?)?;
            println!("✅ Mesh is valid ({n} vertices).");
        }
        _ => {
            return Err("Unsupported file format. Use .toml (scene) or .json (mesh).".into());
        }
    }

    Ok(())
}

/// List the built-in material presets.
pub fn presets() -> Result<(), Box<dyn std::error::Error>> {
    let db = PresetDatabase::with_defaults();
    println!("{:<8} {:<10} {:>5} {:>6} {:>6}  description", "name", "mode", "beta", "tau", "mass");
    for name in db.names() {
        if let Some(p) = db.get(name) {
            println!(
                "{:<8} {:<10} {:>5.2} {:>6.3} {:>6.2}  {}",
                p.name,
                p.params.mode.name(),
                p.params.beta,
                p.params.tau,
                p.particle_mass,
                p.description
            );
        }
    }
    Ok(())
}
