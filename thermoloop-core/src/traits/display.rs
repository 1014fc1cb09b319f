//! Seven-segment display trait

/// Multiplexed seven-segment display
///
/// One digit is lit at a time. `select` is a one-hot mask of digit lines
/// (bit 0 = leftmost), `segments` the usual `.gfedcba` pattern.
pub trait SegmentDisplay {
    /// Drive the digit select lines; `0` blanks every digit
    fn set_select(&mut self, select: u8);

    /// Drive the segment lines
    fn set_segments(&mut self, segments: u8);
}
