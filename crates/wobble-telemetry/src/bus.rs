//! Event bus — queued event dispatch with pluggable sinks.
//!
//! Producers hand events to the bus through an `mpsc` channel; sinks see
//! them when the owner calls [`EventBus::flush`], typically once per frame.
//! A [`Sender`](EventBus::sender) can be cloned out to other threads.

use std::sync::mpsc;

use crate::events::{EventKind, SimulationEvent};
use crate::sinks::EventSink;

/// Queued event bus for simulation telemetry.
///
/// Every flushed event is delivered to every registered sink in
/// registration order.
pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus drops events at the producer side.
    enabled: bool,
    /// Events delivered to sinks so far.
    delivered: u64,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
            delivered: 0,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus. Disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the bus is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queue an event. No-op while the bus is disabled.
    pub fn emit(&self, event: SimulationEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives as long as the bus; send cannot fail here.
        let _ = self.sender.send(event);
    }

    /// Shorthand for `emit(SimulationEvent::new(frame, kind))`.
    pub fn emit_kind(&self, frame: u64, kind: EventKind) {
        self.emit(SimulationEvent::new(frame, kind));
    }

    /// A producer handle for other threads.
    ///
    /// Events sent through it bypass the enabled flag.
    pub fn sender(&self) -> mpsc::Sender<SimulationEvent> {
        self.sender.clone()
    }

    /// Deliver all queued events to the registered sinks.
    ///
    /// Returns the number of events delivered.
    pub fn flush(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            count += 1;
        }
        self.delivered += count as u64;
        count
    }

    /// Flush pending events, then let every sink finalize.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Total events delivered since the bus was created.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Returns the names of the registered sinks, in registration order.
    pub fn sink_names(&self) -> Vec<&str> {
        self.sinks.iter().map(|s| s.name()).collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
