//! Benchmark metrics — data collected during a benchmark run.

use serde::{Deserialize, Serialize};

use crate::runner::SceneRun;

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Particle count.
    pub particle_count: usize,
    /// Number of frames executed.
    pub frames: u32,
    /// Total wall-clock time of the host loop (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per step (seconds).
    pub avg_step_time: f64,
    /// Minimum step time.
    pub min_step_time: f64,
    /// Maximum step time.
    pub max_step_time: f64,
    /// Final kinetic energy (should approach zero once the body settles).
    pub final_kinetic_energy: f64,
    /// Maximum particle displacement from its rest position.
    pub max_displacement: f64,
    /// Frames on which the requested mode fell back.
    pub fallback_frames: u32,
    /// Particles reset to rest over the whole run.
    pub reset_particles: u64,
}

impl BenchmarkMetrics {
    /// Summarizes a finished run.
    pub fn from_run(scenario: &str, run: &SceneRun) -> Self {
        let times = &run.step_times;
        let avg_step_time = if times.is_empty() {
            0.0
        } else {
            times.iter().sum::<f64>() / times.len() as f64
        };
        let min_step_time = if times.is_empty() {
            0.0
        } else {
            times.iter().copied().fold(f64::MAX, f64::min)
        };
        let max_step_time = times.iter().copied().fold(0.0, f64::max);
        let m = &run.output.metrics;

        Self {
            scenario: scenario.to_string(),
            particle_count: run.body.particle_count(),
            frames: m.frame_count,
            total_wall_time: m.wall_time_seconds,
            avg_step_time,
            min_step_time,
            max_step_time,
            final_kinetic_energy: m.final_kinetic_energy,
            max_displacement: m.max_displacement,
            fallback_frames: m.fallback_frames,
            reset_particles: m.reset_particles,
        }
    }

    /// CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,particle_count,frames,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,max_displacement,fallback_frames,reset_particles".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6},{},{}",
            self.scenario,
            self.particle_count,
            self.frames,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.max_displacement,
            self.fallback_frames,
            self.reset_particles,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
