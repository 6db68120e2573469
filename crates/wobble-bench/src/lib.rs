//! # wobble-bench
//!
//! Benchmark suite for the Wobble deformation kernel.
//!
//! Provides five procedural scenarios, the reference host frame loop
//! that drives a [`Body`](wobble_solver::Body) from a scene, metric
//! collection, and CSV export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::{run_scene, BenchmarkRunner, SceneRun};
pub use scenarios::{Scenario, ScenarioKind};
