//! Serial receive path
//!
//! Bytes go through the count-based [`FrameAccumulator`]; every completed
//! window is validated and, if it is a setpoint command, applied to the
//! [`SharedSetpoint`] immediately, still in the receive context.

use thermoloop_protocol::{FrameAccumulator, HostCommand, RxFrame};

use super::setpoint::SharedSetpoint;

/// What a received byte led to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiveEvent {
    /// Window not complete yet
    Pending,
    /// A setpoint command was applied
    SetpointApplied(u16),
    /// A complete window failed validation and was dropped
    Discarded(RxFrame),
}

/// Validate a frame and apply it to the setpoint
///
/// Returns the new setpoint, or `None` when the frame was dropped. Nothing
/// is reported back to the host either way.
pub fn dispatch(frame: &RxFrame, setpoint: &SharedSetpoint) -> Option<u16> {
    match HostCommand::from_frame(frame) {
        Ok(HostCommand::SetSetpoint(value)) => {
            setpoint.store(value);
            Some(value)
        }
        Err(_) => None,
    }
}

/// Receive-side state: the frame accumulator plus the setpoint it feeds
pub struct ReceivePath<'a> {
    accumulator: FrameAccumulator,
    setpoint: &'a SharedSetpoint,
}

impl<'a> ReceivePath<'a> {
    pub fn new(setpoint: &'a SharedSetpoint) -> Self {
        Self {
            accumulator: FrameAccumulator::new(),
            setpoint,
        }
    }

    /// Handle one received byte
    pub fn on_receive(&mut self, byte: u8) -> ReceiveEvent {
        let Some(frame) = self.accumulator.feed(byte) else {
            return ReceiveEvent::Pending;
        };

        match dispatch(&frame, self.setpoint) {
            Some(value) => ReceiveEvent::SetpointApplied(value),
            None => ReceiveEvent::Discarded(frame),
        }
    }

    /// Bytes collected towards the next window
    pub fn pending(&self) -> usize {
        self.accumulator.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thermoloop_protocol::{encode_setpoint, encode_telemetry};

    fn feed_all(path: &mut ReceivePath<'_>, bytes: &[u8]) -> ReceiveEvent {
        let mut last = ReceiveEvent::Pending;
        for &b in bytes {
            last = path.on_receive(b);
        }
        last
    }

    #[test]
    fn test_setpoint_frame_applied() {
        let setpoint = SharedSetpoint::new(0);
        let mut path = ReceivePath::new(&setpoint);

        let event = feed_all(&mut path, &[0x55, 0x01, 0x09, 0x19, 0xAA]);
        assert_eq!(event, ReceiveEvent::SetpointApplied(2329));
        assert_eq!(setpoint.load(), 0x0919);
    }

    #[test]
    fn test_any_altered_framing_byte_is_dropped() {
        let good = [0x55, 0x01, 0x09, 0x19, 0xAA];
        for (index, replacement) in [(0, 0x54), (1, 0x03), (4, 0xAB)] {
            let setpoint = SharedSetpoint::new(1234);
            let mut path = ReceivePath::new(&setpoint);

            let mut bytes = good;
            bytes[index] = replacement;
            let event = feed_all(&mut path, &bytes);

            assert_eq!(event, ReceiveEvent::Discarded(RxFrame::from_bytes(bytes)));
            assert_eq!(setpoint.load(), 1234);
        }
    }

    #[test]
    fn test_telemetry_echo_is_not_applied() {
        let setpoint = SharedSetpoint::new(2500);
        let mut path = ReceivePath::new(&setpoint);

        let event = feed_all(&mut path, &encode_telemetry(2329));
        assert!(matches!(event, ReceiveEvent::Discarded(_)));
        assert_eq!(setpoint.load(), 2500);
    }

    #[test]
    fn test_pending_until_fifth_byte() {
        let setpoint = SharedSetpoint::new(0);
        let mut path = ReceivePath::new(&setpoint);

        for &b in &encode_setpoint(3000)[..4] {
            assert_eq!(path.on_receive(b), ReceiveEvent::Pending);
        }
        assert_eq!(path.pending(), 4);
        assert_eq!(setpoint.load(), 0);
    }

    #[test]
    fn test_misalignment_is_not_repaired() {
        let setpoint = SharedSetpoint::new(100);
        let mut path = ReceivePath::new(&setpoint);

        // One stray byte, then two valid frames: both windows straddle
        let mut stream = [0u8; 11];
        stream[1..6].copy_from_slice(&encode_setpoint(2000));
        stream[6..].copy_from_slice(&encode_setpoint(3000));

        let mut discarded = 0;
        for &b in &stream {
            match path.on_receive(b) {
                ReceiveEvent::Discarded(_) => discarded += 1,
                ReceiveEvent::SetpointApplied(v) => panic!("applied {v} from a shifted window"),
                ReceiveEvent::Pending => {}
            }
        }

        assert_eq!(discarded, 2);
        assert_eq!(path.pending(), 1);
        assert_eq!(setpoint.load(), 100);
    }

    #[test]
    fn test_direct_dispatch() {
        let setpoint = SharedSetpoint::new(0);
        let frame = RxFrame::from_bytes(encode_setpoint(4200));
        assert_eq!(dispatch(&frame, &setpoint), Some(4200));
        assert_eq!(setpoint.load(), 4200);

        let frame = RxFrame::from_bytes(encode_telemetry(4300));
        assert_eq!(dispatch(&frame, &setpoint), None);
        assert_eq!(setpoint.load(), 4200);
    }
}
