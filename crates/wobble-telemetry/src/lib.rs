//! # wobble-telemetry
//!
//! Event bus for simulation telemetry. Emits structured events
//! (frame timing, mode fallbacks, skipped frames, particle recovery,
//! energy) that can be consumed by pluggable sinks.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
