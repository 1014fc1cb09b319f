//! Control-loop pacing
//!
//! Two obligations share one hardware tick:
//!
//! - every tick: one control step ([`TickFlag`] carries the tick from the
//!   timer to the main loop)
//! - every Nth tick: one telemetry frame ([`TelemetryGate`])

pub mod telemetry;
pub mod tick;

pub use telemetry::TelemetryGate;
pub use tick::TickFlag;
