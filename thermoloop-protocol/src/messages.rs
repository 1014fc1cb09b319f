//! Message types carried inside frames

use crate::frame::{RxFrame, FRAME_END, FRAME_START};

/// Message type identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MessageType {
    /// Host → device: new setpoint
    Setpoint = 0x01,
    /// Device → host: latest sensor sample
    Telemetry = 0x02,
}

impl MessageType {
    /// Convert from byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Setpoint),
            0x02 => Some(Self::Telemetry),
            _ => None,
        }
    }
}

/// Reasons a received window is not a usable command
///
/// None of these are reported back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// First byte is not 0x55
    BadStart(u8),
    /// Last byte is not 0xAA
    BadEnd(u8),
    /// Type byte is not something the host may send
    UnexpectedType(u8),
}

/// Commands the host can send to the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostCommand {
    /// Replace the setpoint (°C × 100)
    SetSetpoint(u16),
}

impl HostCommand {
    /// Validate a received window
    ///
    /// Exactly three bytes are checked: START, TYPE and END. The value bytes
    /// are taken as-is.
    pub fn from_frame(frame: &RxFrame) -> Result<Self, FrameError> {
        if frame.start != FRAME_START {
            return Err(FrameError::BadStart(frame.start));
        }
        if frame.end != FRAME_END {
            return Err(FrameError::BadEnd(frame.end));
        }
        match MessageType::from_u8(frame.msg_type) {
            Some(MessageType::Setpoint) => Ok(Self::SetSetpoint(frame.value())),
            _ => Err(FrameError::UnexpectedType(frame.msg_type)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{encode_setpoint, encode_telemetry};

    #[test]
    fn test_setpoint_frame_accepted() {
        let frame = RxFrame::from_bytes([0x55, 0x01, 0x09, 0x19, 0xAA]);
        assert_eq!(
            HostCommand::from_frame(&frame),
            Ok(HostCommand::SetSetpoint(2329))
        );
    }

    #[test]
    fn test_bad_delimiters_rejected() {
        let frame = RxFrame::from_bytes([0x55, 0x01, 0x09, 0x19, 0xAB]);
        assert_eq!(HostCommand::from_frame(&frame), Err(FrameError::BadEnd(0xAB)));

        let frame = RxFrame::from_bytes([0x54, 0x01, 0x09, 0x19, 0xAA]);
        assert_eq!(
            HostCommand::from_frame(&frame),
            Err(FrameError::BadStart(0x54))
        );
    }

    #[test]
    fn test_telemetry_frame_is_not_a_command() {
        let frame = RxFrame::from_bytes(encode_telemetry(2329));
        assert_eq!(
            HostCommand::from_frame(&frame),
            Err(FrameError::UnexpectedType(0x02))
        );
    }

    #[test]
    fn test_value_bytes_are_not_checked() {
        let frame = RxFrame::from_bytes(encode_setpoint(0xAA55));
        assert_eq!(
            HostCommand::from_frame(&frame),
            Ok(HostCommand::SetSetpoint(0xAA55))
        );
    }

    #[test]
    fn test_message_type_from_u8() {
        assert_eq!(MessageType::from_u8(0x01), Some(MessageType::Setpoint));
        assert_eq!(MessageType::from_u8(0x02), Some(MessageType::Telemetry));
        assert_eq!(MessageType::from_u8(0x03), None);
    }
}
