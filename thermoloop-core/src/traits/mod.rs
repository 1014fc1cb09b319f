//! Port traits
//!
//! These traits define the interface between the control loop and the
//! hardware. The serial transmit port is [`thermoloop_hal::UartTx`].

pub mod display;
pub mod heater;

pub use display::SegmentDisplay;
pub use heater::{HeaterOutput, TemperatureSensor};
pub use thermoloop_hal::UartTx;
