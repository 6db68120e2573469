//! Pluggable event sinks.
//!
//! Sinks consume events from the bus and process them
//! (collect for tests, forward to `tracing`, write to a file).

use std::sync::{Arc, Mutex};

use crate::events::SimulationEvent;

/// Trait for event consumers.
///
/// Implement this to create custom telemetry outputs.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends. Flush buffers, close files, etc.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Shared handle to the events collected by a [`VecSink`].
pub type EventLog = Arc<Mutex<Vec<SimulationEvent>>>;

/// Collects events into a shared `Vec` for testing and inspection.
///
/// The sink is boxed into the bus; keep the [`EventLog`] returned by
/// [`VecSink::log`] to read what it received.
#[derive(Default)]
pub struct VecSink {
    events: EventLog,
}

impl VecSink {
    /// Creates an empty vec sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the collected events.
    pub fn log(&self) -> EventLog {
        Arc::clone(&self.events)
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing`.
///
/// Warning events (fallbacks, skipped frames, resets) go out at `WARN`,
/// everything else at the level chosen at construction.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    /// Creates a new tracing sink at the given log level.
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let label = event.kind.label();
        if event.kind.is_warning() {
            tracing::warn!(frame = event.frame, event = ?event.kind, "{label}");
            return;
        }
        if self.level == tracing::Level::TRACE {
            tracing::trace!(frame = event.frame, event = ?event.kind, "{label}");
        } else if self.level == tracing::Level::DEBUG {
            tracing::debug!(frame = event.frame, event = ?event.kind, "{label}");
        } else {
            tracing::info!(frame = event.frame, event = ?event.kind, "{label}");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
