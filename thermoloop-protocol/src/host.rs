//! Host-side helpers
//!
//! Conversions a host application needs to talk to the regulator: turning a
//! typed-in temperature into a setpoint frame and reading telemetry back.

use crate::frame::{encode_setpoint, RxFrame, FRAME_LEN};
use crate::messages::MessageType;

/// Lowest setpoint a host accepts (°C)
pub const MIN_SETPOINT_C: f32 = 15.0;

/// Highest setpoint a host accepts (°C)
pub const MAX_SETPOINT_C: f32 = 150.0;

/// Setpoint substituted when a request is out of range (°C)
pub const FALLBACK_SETPOINT_C: f32 = 50.0;

/// Why a requested setpoint was replaced by the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeAlert {
    TooLow,
    TooHigh,
}

/// A setpoint ready to be sent to the device
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetpointRequest {
    /// Setpoint in °C × 100
    pub centi: u16,
    /// Set when the requested value was replaced by [`FALLBACK_SETPOINT_C`]
    pub alert: Option<RangeAlert>,
}

impl SetpointRequest {
    /// Build a request from degrees Celsius
    ///
    /// Values outside [`MIN_SETPOINT_C`]..=[`MAX_SETPOINT_C`] are replaced by
    /// the fallback. The scaled value is truncated, not rounded.
    pub fn from_celsius(celsius: f32) -> Self {
        let (accepted, alert) = if celsius < MIN_SETPOINT_C {
            (FALLBACK_SETPOINT_C, Some(RangeAlert::TooLow))
        } else if celsius > MAX_SETPOINT_C {
            (FALLBACK_SETPOINT_C, Some(RangeAlert::TooHigh))
        } else {
            (celsius, None)
        };

        Self {
            centi: (accepted * 100.0) as u16,
            alert,
        }
    }

    /// Wire bytes for this request
    pub fn to_frame(&self) -> [u8; FRAME_LEN] {
        encode_setpoint(self.centi)
    }
}

/// Extract the sample from a telemetry frame
///
/// Returns `None` for anything that is not a well-delimited telemetry frame.
pub fn decode_telemetry(bytes: &[u8; FRAME_LEN]) -> Option<u16> {
    let frame = RxFrame::from_bytes(*bytes);
    if frame.is_delimited() && frame.msg_type == MessageType::Telemetry as u8 {
        Some(frame.value())
    } else {
        None
    }
}

/// Convert a °C × 100 value to degrees
pub fn centi_to_celsius(centi: u16) -> f32 {
    centi as f32 / 100.0
}
