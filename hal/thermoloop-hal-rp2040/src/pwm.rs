//! PWM heater output
//!
//! The slice counter wraps at 255 so the duty value maps 1:1 onto the
//! compare register.

use embassy_rp::pwm::{Config, Pwm, SetDutyCycle};
use thermoloop_core::traits::HeaterOutput;

/// PWM counter top; one count per duty step
pub const PWM_TOP: u16 = 255;

/// PWM configuration for a heater output, starting switched off
pub fn heater_pwm_config() -> Config {
    let mut config = Config::default();
    config.top = PWM_TOP;
    config.compare_a = 0;
    config
}

/// Heater driven from PWM channel A of one slice
pub struct PwmHeater {
    pwm: Pwm<'static>,
}

impl PwmHeater {
    /// Wrap a PWM slice configured with [`heater_pwm_config`]
    pub fn new(pwm: Pwm<'static>) -> Self {
        Self { pwm }
    }
}

impl HeaterOutput for PwmHeater {
    fn set_duty(&mut self, duty: u8) {
        // Cannot fail: duty never exceeds PWM_TOP
        self.pwm.set_duty_cycle(u16::from(duty)).ok();
    }
}
