//! Eight-digit seven-segment display
//!
//! Layout, left to right:
//! ```text
//! ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! │ P │ P │ P │ P │ T │ H │ t │ U │
//! └───┴───┴───┴───┴───┴───┴───┴───┘
//!   fixed prefix    thousands … units of (sample / 100)
//! ```
//!
//! The buffer holds digit values; conversion to segment patterns happens
//! only when a position is refreshed.

use crate::config::PREFIX_DIGITS;
use crate::traits::SegmentDisplay;

/// Number of display positions
pub const DIGIT_COUNT: usize = 8;

/// Segment patterns (`.gfedcba`) for digits 0-9
pub const SEGMENT_CODES: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Digits shown in the temperature field before the first sample
const BOOT_READING: [u8; DIGIT_COUNT - PREFIX_DIGITS] = [1, 1, 1, 7];

/// Split a °C × 100 sample into thousands, hundreds, tens and units of
/// whole degrees
///
/// Truncates twice: once when dropping the hundredths, once per digit.
/// Values of 10000°C and above lose their leading digits.
pub fn sample_digits(sample: u32) -> [u8; 4] {
    let mut value = sample / 100;
    let thousands = (value / 1000) % 10;
    value %= 1000;
    let hundreds = value / 100;
    value %= 100;
    let tens = value / 10;
    let units = value % 10;
    [thousands as u8, hundreds as u8, tens as u8, units as u8]
}

/// Digit values for every display position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayBuffer {
    digits: [u8; DIGIT_COUNT],
}

impl DisplayBuffer {
    /// Create a buffer with the given fixed prefix and the boot reading
    pub fn new(prefix: [u8; PREFIX_DIGITS]) -> Self {
        let mut digits = [0u8; DIGIT_COUNT];
        digits[..PREFIX_DIGITS].copy_from_slice(&prefix);
        digits[PREFIX_DIGITS..].copy_from_slice(&BOOT_READING);
        Self { digits }
    }

    /// Show a new sample in the temperature field
    pub fn show_sample(&mut self, sample: u32) {
        self.digits[PREFIX_DIGITS..].copy_from_slice(&sample_digits(sample));
    }

    /// Digit values, left to right
    pub fn digits(&self) -> &[u8; DIGIT_COUNT] {
        &self.digits
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new([0; PREFIX_DIGITS])
    }
}

/// Round-robin multiplexing state
///
/// Each call to [`DisplayRefresh::refresh`] lights exactly one position.
/// The refresh rate therefore follows the main loop rate, not the control
/// tick.
#[derive(Debug, Clone, Default)]
pub struct DisplayRefresh {
    position: u8,
}

impl DisplayRefresh {
    pub const fn new() -> Self {
        Self { position: 0 }
    }

    /// Position that the next refresh will light
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Light the current position and advance to the next one
    pub fn refresh<D: SegmentDisplay>(&mut self, buffer: &DisplayBuffer, display: &mut D) {
        let digit = buffer.digits[self.position as usize];
        let segments = SEGMENT_CODES.get(digit as usize).copied().unwrap_or(0);

        // Select lines drop before the segment lines change
        display.set_select(0);
        display.set_segments(segments);
        display.set_select(1 << self.position);

        self.position = (self.position + 1) % DIGIT_COUNT as u8;
    }
}
