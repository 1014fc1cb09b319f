//! RP2040 ports for the temperature regulator
//!
//! This crate provides RP2040-specific implementations of the port traits
//! from `thermoloop-core` and `thermoloop-hal`:
//!
//! - ADC temperature sensor (LM35-style analog output)
//! - PWM heater output
//! - Blocking UART transmitter for telemetry
//! - GPIO-multiplexed seven-segment display

#![no_std]

pub mod adc;
pub mod gpio;
pub mod pwm;
pub mod segment;
pub mod uart;

pub use adc::AdcSensor;
pub use gpio::Pin;
pub use pwm::PwmHeater;
pub use segment::GpioSegmentDisplay;
pub use uart::HostTx;
