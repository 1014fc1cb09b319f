//! GPIO output wrapper
//!
//! Bridges embassy-rp outputs to the `thermoloop-hal` pin trait.

use embassy_rp::gpio::Output;
use thermoloop_hal::OutputPin;

/// Push-pull output pin
pub struct Pin(Output<'static>);

impl Pin {
    pub fn new(output: Output<'static>) -> Self {
        Self(output)
    }
}

impl OutputPin for Pin {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }
}
