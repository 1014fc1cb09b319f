//! State shared between tasks
//!
//! Both statics are lock-free or critical-section guarded, so the tick
//! and receive tasks can touch them at any point of a control step.

use thermoloop_core::link::SharedSetpoint;
use thermoloop_core::scheduler::TickFlag;

/// Setpoint until the host sends one (°C × 100); keeps the heater off
pub const INITIAL_SETPOINT: u16 = 0;

/// Raised by the tick task, consumed by the control loop
pub static TICK_DUE: TickFlag = TickFlag::new();

/// Written by the serial receive task, read once per control step
pub static SETPOINT: SharedSetpoint = SharedSetpoint::new(INITIAL_SETPOINT);
