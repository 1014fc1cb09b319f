//! Telemetry rate divider

/// Counts control ticks and opens on every Nth one
///
/// The counter wraps silently; only `ticks % divisor` matters.
#[derive(Debug, Clone)]
pub struct TelemetryGate {
    ticks: u32,
    divisor: u32,
}

impl TelemetryGate {
    /// Create a gate that opens every `divisor` ticks
    ///
    /// A divisor of zero is treated as one.
    pub fn new(divisor: u32) -> Self {
        Self {
            ticks: 0,
            divisor: divisor.max(1),
        }
    }

    /// Count one tick; returns true when telemetry is due on this tick
    pub fn on_tick(&mut self) -> bool {
        self.ticks = self.ticks.wrapping_add(1);
        self.ticks % self.divisor == 0
    }

    /// Ticks counted since boot (wrapping)
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}
