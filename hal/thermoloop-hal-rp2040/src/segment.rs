//! Seven-segment display on plain GPIOs
//!
//! Eight segment lines (a-g, dp) and eight digit select lines, all active
//! high. Any [`OutputPin`] works, so the same driver serves expander chips.

use thermoloop_core::traits::SegmentDisplay;
use thermoloop_hal::OutputPin;

/// Multiplexed display driven bit-by-bit from two pin banks
pub struct GpioSegmentDisplay<P> {
    segments: [P; 8],
    digits: [P; 8],
}

impl<P: OutputPin> GpioSegmentDisplay<P> {
    /// `segments[0]` is segment a, `digits[0]` the leftmost digit
    pub fn new(segments: [P; 8], digits: [P; 8]) -> Self {
        let mut display = Self { segments, digits };
        display.set_select(0);
        display
    }
}

fn write_bank<P: OutputPin>(pins: &mut [P; 8], bits: u8) {
    for (bit, pin) in pins.iter_mut().enumerate() {
        pin.set_state(bits & (1 << bit) != 0);
    }
}

impl<P: OutputPin> SegmentDisplay for GpioSegmentDisplay<P> {
    fn set_select(&mut self, select: u8) {
        write_bank(&mut self.digits, select);
    }

    fn set_segments(&mut self, segments: u8) {
        write_bank(&mut self.segments, segments);
    }
}
