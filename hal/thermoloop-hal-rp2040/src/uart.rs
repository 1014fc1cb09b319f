//! Host link UART
//!
//! Reception stays on embassy's buffered UART (interrupt driven, read from
//! an async task). Transmission goes through [`HostTx`], which blocks until
//! each byte has been handed to the hardware.

use embassy_rp::uart::{BufferedUartTx, Config, Error};
use embedded_io::Write;
use thermoloop_hal::{UartConfig, UartTx};

/// Convert the link settings to an embassy UART configuration (8N1)
pub fn uart_config(config: &UartConfig) -> Config {
    let mut cfg = Config::default();
    cfg.baudrate = config.baudrate;
    cfg
}

/// Blocking telemetry transmitter
pub struct HostTx {
    tx: BufferedUartTx,
}

impl HostTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl UartTx for HostTx {
    type Error = Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Error> {
        self.tx.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Error> {
        Write::flush(&mut self.tx)
    }
}
