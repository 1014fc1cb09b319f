//! UART serial communication abstractions
//!
//! The device transmits telemetry one byte at a time, busy-waiting on each.
//! Reception is interrupt driven and handled by the chip HAL directly.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Write a single byte, waiting until the previous byte has left
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.write_blocking(&[byte])?;
        self.flush()
    }

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART configuration
///
/// The link always runs 8 data bits, no parity, one stop bit; only the baud
/// rate is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
}

impl UartConfig {
    /// Default host link baud rate
    pub const DEFAULT_BAUDRATE: u32 = 9600;
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: Self::DEFAULT_BAUDRATE,
        }
    }
}
