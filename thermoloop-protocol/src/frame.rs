//! Frame encoding and count-based decoding for the host link.
//!
//! Frame format:
//! - START (1 byte): 0x55
//! - TYPE (1 byte): message type identifier
//! - VALUE (2 bytes): big-endian 16-bit value
//! - END (1 byte): 0xAA

use heapless::Vec;

use crate::messages::MessageType;

/// Frame start byte
pub const FRAME_START: u8 = 0x55;

/// Frame end byte
pub const FRAME_END: u8 = 0xAA;

/// Length of every frame in bytes
pub const FRAME_LEN: usize = 5;

/// A 5-byte window taken from the receive stream
///
/// Nothing about the content is checked when the window is assembled; see
/// [`crate::HostCommand::from_frame`] for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxFrame {
    pub start: u8,
    pub msg_type: u8,
    pub payload_hi: u8,
    pub payload_lo: u8,
    pub end: u8,
}

impl RxFrame {
    /// Interpret five raw bytes as a frame
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self {
            start: bytes[0],
            msg_type: bytes[1],
            payload_hi: bytes[2],
            payload_lo: bytes[3],
            end: bytes[4],
        }
    }

    /// Raw bytes in wire order
    pub const fn to_bytes(&self) -> [u8; FRAME_LEN] {
        [
            self.start,
            self.msg_type,
            self.payload_hi,
            self.payload_lo,
            self.end,
        ]
    }

    /// Big-endian value carried in the two payload bytes
    pub const fn value(&self) -> u16 {
        ((self.payload_hi as u16) << 8) | self.payload_lo as u16
    }

    /// True when both delimiters sit where they belong
    pub const fn is_delimited(&self) -> bool {
        self.start == FRAME_START && self.end == FRAME_END
    }
}

/// Build a frame of the given type around a 16-bit value
const fn encode(msg_type: MessageType, value: u16) -> [u8; FRAME_LEN] {
    let [hi, lo] = value.to_be_bytes();
    [FRAME_START, msg_type as u8, hi, lo, FRAME_END]
}

/// Encode a device → host telemetry frame for a sensor sample
pub const fn encode_telemetry(sample: u16) -> [u8; FRAME_LEN] {
    encode(MessageType::Telemetry, sample)
}

/// Encode a host → device setpoint frame
pub const fn encode_setpoint(setpoint: u16) -> [u8; FRAME_LEN] {
    encode(MessageType::Setpoint, setpoint)
}

/// Incremental receiver that frames by byte count
///
/// Bytes are collected until five have arrived, then the window is handed
/// out and collection starts over. Content never influences framing, so a
/// dropped byte misaligns the stream for good: later windows straddle two
/// frames and are rejected (or, by coincidence, accepted) downstream.
#[derive(Debug, Clone, Default)]
pub struct FrameAccumulator {
    buffer: Vec<u8, FRAME_LEN>,
}

impl FrameAccumulator {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Feed a single byte
    ///
    /// Returns the assembled window on every fifth byte, `None` otherwise.
    pub fn feed(&mut self, byte: u8) -> Option<RxFrame> {
        // Cannot overflow: the buffer is drained as soon as it fills
        let _ = self.buffer.push(byte);
        if !self.buffer.is_full() {
            return None;
        }

        let mut bytes = [0u8; FRAME_LEN];
        bytes.copy_from_slice(&self.buffer);
        self.buffer.clear();
        Some(RxFrame::from_bytes(bytes))
    }

    /// Number of bytes collected towards the next window
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_telemetry() {
        assert_eq!(encode_telemetry(2329), [0x55, 0x02, 0x09, 0x19, 0xAA]);
        assert_eq!(encode_telemetry(0), [0x55, 0x02, 0x00, 0x00, 0xAA]);
        assert_eq!(encode_telemetry(u16::MAX), [0x55, 0x02, 0xFF, 0xFF, 0xAA]);
    }

    #[test]
    fn test_encode_setpoint() {
        assert_eq!(encode_setpoint(5000), [0x55, 0x01, 0x13, 0x88, 0xAA]);
    }

    #[test]
    fn test_accumulator_yields_on_fifth_byte() {
        let mut acc = FrameAccumulator::new();
        for &b in &[0x55, 0x01, 0x09, 0x19] {
            assert_eq!(acc.feed(b), None);
        }
        assert_eq!(acc.pending(), 4);

        let frame = acc.feed(0xAA).unwrap();
        assert_eq!(frame.to_bytes(), [0x55, 0x01, 0x09, 0x19, 0xAA]);
        assert_eq!(frame.value(), 2329);
        assert_eq!(acc.pending(), 0);
    }

    #[test]
    fn test_accumulator_ignores_content() {
        let mut acc = FrameAccumulator::new();
        let mut frames = 0;
        for b in [0x00, 0xFF, 0x12, 0x34, 0x56] {
            if acc.feed(b).is_some() {
                frames += 1;
            }
        }
        assert_eq!(frames, 1);
    }

    #[test]
    fn test_dropped_byte_misaligns_following_windows() {
        let mut acc = FrameAccumulator::new();
        // First frame lost its START byte
        let mut stream = [0u8; 9];
        stream[..4].copy_from_slice(&[0x01, 0x09, 0x19, 0xAA]);
        stream[4..].copy_from_slice(&encode_setpoint(1000));

        let mut frames = [None; 2];
        let mut n = 0;
        for &b in &stream {
            if let Some(frame) = acc.feed(b) {
                frames[n] = Some(frame);
                n += 1;
            }
        }

        assert_eq!(n, 1);
        let window = frames[0].unwrap();
        assert_eq!(window.to_bytes(), [0x01, 0x09, 0x19, 0xAA, 0x55]);
        assert!(!window.is_delimited());
        // Remainder of the good frame is stuck in the next window
        assert_eq!(acc.pending(), 4);
    }
}
