//! Inspection hooks for live debugging.
//!
//! Hooks are called by the host frame loop around each [`Body::step`]
//! to capture metrics or events without touching the solver itself.
//!
//! [`Body::step`]: wobble_solver::Body::step

use wobble_solver::{AppliedMode, StepReport, StepWarning};
use wobble_telemetry::events::{EventKind, SimulationEvent};

/// Trait for simulation inspection hooks.
///
/// # Lifecycle
///
/// ```text
/// for each frame:
///   hook.on_frame_begin(...)
///   let report = body.step(...)?;
///   hook.on_report(&report)
///   hook.on_frame_end(...)
/// hook.on_simulation_end()
/// ```
pub trait InspectionHook: Send {
    /// Called before the step.
    fn on_frame_begin(&mut self, frame: u64, dt: f64) {
        let _ = (frame, dt);
    }

    /// Called with the report of a successful step.
    fn on_report(&mut self, report: &StepReport) {
        let _ = report;
    }

    /// Called after the step with the body's kinetic energy.
    fn on_frame_end(&mut self, frame: u64, kinetic_energy: f64) {
        let _ = (frame, kinetic_energy);
    }

    /// Called when the simulation completes.
    fn on_simulation_end(&mut self) {}

    /// Returns the hook's name for logging.
    fn name(&self) -> &str;
}

/// Hook that bridges to the telemetry event bus.
///
/// Translates frame lifecycle calls and step reports into telemetry
/// events; the host drains them into an `EventBus`.
#[derive(Debug, Default)]
pub struct TelemetryHook {
    events: Vec<SimulationEvent>,
}

impl TelemetryHook {
    /// Creates a new telemetry hook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains collected events for dispatch.
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    fn push(&mut self, frame: u64, kind: EventKind) {
        self.events.push(SimulationEvent::new(frame, kind));
    }
}

impl InspectionHook for TelemetryHook {
    fn on_frame_begin(&mut self, frame: u64, dt: f64) {
        self.push(frame, EventKind::FrameBegin { dt });
    }

    fn on_report(&mut self, report: &StepReport) {
        let frame = report.frame;
        for warning in &report.warnings {
            let kind = match *warning {
                StepWarning::NonFiniteInput { count } => EventKind::NonFiniteInput { count },
                StepWarning::DegenerateConfiguration => EventKind::DeformationSkipped {
                    reason: "degenerate".into(),
                },
                StepWarning::AllFixed => EventKind::DeformationSkipped {
                    reason: "all_fixed".into(),
                },
                StepWarning::Fallback { from, to, reason } => EventKind::ModeFallback {
                    from: from.name().into(),
                    to: to.name().into(),
                    reason: format!("{reason:?}"),
                },
                StepWarning::ParticlesReset { count } => EventKind::ParticlesRecovered { count },
            };
            self.push(frame, kind);
        }

        if report.applied == AppliedMode::Skipped && report.warnings.is_empty() {
            tracing::debug!(frame, "skipped frame without warning");
        }

        self.push(
            frame,
            EventKind::FrameEnd {
                applied: report.applied.name().into(),
                wall_time: report.wall_time,
            },
        );
    }

    fn on_frame_end(&mut self, frame: u64, kinetic_energy: f64) {
        self.push(
            frame,
            EventKind::Energy {
                kinetic: kinetic_energy,
            },
        );
    }

    fn name(&self) -> &str {
        "telemetry_hook"
    }
}
