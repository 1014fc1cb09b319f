//! Thermoloop Hardware Abstraction Layer
//!
//! This crate defines the chip-level traits that the regulator's ports are
//! built on. A chip-specific HAL implements them once and the same control
//! code runs unchanged on top.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  thermoloop-core (control loop, ports)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thermoloop-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ thermoloop-hal-   │
//!           │      rp2040       │
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital outputs (segment and digit lines)
//! - [`uart::UartTx`] - Serial link to the host

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;

pub use gpio::OutputPin;
pub use uart::{UartConfig, UartTx};
