//! Thermoloop Host Link Protocol
//!
//! This crate defines the serial protocol between the regulator and its host
//! (a PC that sets the target temperature and records measurements).
//!
//! # Protocol Overview
//!
//! Every message is a fixed 5-byte frame, no escaping and no checksum:
//! ```text
//! ┌───────┬──────┬────────────┬────────────┬──────┐
//! │ START │ TYPE │ VALUE (hi) │ VALUE (lo) │ END  │
//! │ 0x55  │ 1B   │ 1B         │ 1B         │ 0xAA │
//! └───────┴──────┴────────────┴────────────┴──────┘
//! ```
//!
//! | Type | Direction     | Value                         |
//! |------|---------------|-------------------------------|
//! | 0x01 | host → device | setpoint, °C × 100            |
//! | 0x02 | device → host | latest sensor sample, °C × 100 |
//!
//! The receiver frames by byte count only. A lost or extra byte shifts every
//! following window until the stream happens to realign; there is no marker
//! search and no acknowledgement.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod host;
pub mod messages;

pub use frame::{
    encode_setpoint, encode_telemetry, FrameAccumulator, RxFrame, FRAME_END, FRAME_LEN,
    FRAME_START,
};
pub use host::{centi_to_celsius, decode_telemetry, RangeAlert, SetpointRequest};
pub use messages::{FrameError, HostCommand, MessageType};
