//! Board-agnostic core logic for the temperature regulator
//!
//! This crate contains everything that does not touch a register:
//!
//! - Port traits (sensor, heater output, segment display)
//! - Configuration types and the embedded config parser
//! - PID controller with clamped integral and accumulated output
//! - Display buffer and round-robin digit refresh
//! - Tick flag and telemetry gate
//! - Shared setpoint and the serial receive path
//! - The cooperative main loop tying it all together

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod control_loop;
pub mod display;
pub mod link;
pub mod scheduler;
pub mod traits;

pub use control_loop::{ControlLoop, LoopEvent, Ports, TickReport};
