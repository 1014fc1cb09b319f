//! PID heater controller
//!
//! Incremental ("velocity form") PID: every step adds the PID correction to
//! the previous output instead of recomputing it, so the heater duty moves
//! continuously even when gains are retuned at runtime. The integral is
//! clamped after accumulation on every step, which bounds windup while the
//! heater cannot keep up with the setpoint.
//!
//! Error terms are whole °C × 100 counts; gains and accumulators are `f32`.
//! The actuator command and the displayed value are truncating casts.

use crate::config::{ControlConfig, PidGains};

/// Controller state
///
/// `setpoint` is a private copy refreshed from the shared setpoint before
/// each step; everything else is only touched by [`PidController::step`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlState {
    /// Target temperature (°C × 100, raw wire value)
    pub setpoint: i32,
    /// Error of the current step
    pub error_now: i32,
    /// Error of the previous step
    pub error_prev: i32,
    /// Error two steps back
    pub error_prev2: i32,
    /// Clamped error sum
    pub integral: f32,
    /// First difference of the error
    pub derivative: f32,
    /// Accumulated output, clamped to the configured range
    pub output: f32,
}

/// PID controller configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidConfig {
    /// PID gains
    pub gains: PidGains,
    /// Integral windup limit
    pub integral_limit: f32,
    /// Output lower bound
    pub output_min: f32,
    /// Output upper bound
    pub output_max: f32,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self::from(&ControlConfig::default())
    }
}

impl From<&ControlConfig> for PidConfig {
    fn from(config: &ControlConfig) -> Self {
        Self {
            gains: config.gains,
            integral_limit: config.integral_limit,
            output_min: config.output_min,
            output_max: config.output_max,
        }
    }
}

/// Result of one control step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepOutput {
    /// Heater duty, the accumulated output truncated to `u8`
    pub actuator: u8,
    /// Sample in whole degrees (sample / 100, truncated)
    pub display_value: u16,
}

/// Wire values are 16-bit and the error arithmetic treats them as signed
fn as_signed16(value: i32) -> i32 {
    i32::from(value as i16)
}

/// Limit `value` to `[min, max]`
///
/// Unlike `f32::clamp` this never panics; with inverted bounds `min` wins.
fn bound(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// PID controller
///
/// The configuration is not checked here; [`ControlConfig::validate`]
/// rejects bounds that would make the clamps meaningless.
pub struct PidController {
    config: PidConfig,
    state: ControlState,
}

impl PidController {
    /// Create a new PID controller with zeroed state and setpoint
    pub fn new(config: PidConfig) -> Self {
        Self {
            config,
            state: ControlState::default(),
        }
    }

    /// Replace the setpoint (°C × 100)
    ///
    /// History and accumulators are kept, so the output changes smoothly.
    pub fn set_setpoint(&mut self, setpoint: u16) {
        self.state.setpoint = i32::from(setpoint);
    }

    /// Update PID gains
    ///
    /// State is kept: because the output is accumulated, new gains only
    /// change the slope of future corrections, never the current duty.
    pub fn set_gains(&mut self, gains: PidGains) {
        self.config.gains = gains;
    }

    /// Current PID gains
    pub fn gains(&self) -> &PidGains {
        &self.config.gains
    }

    /// Controller state after the last step
    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Run one control step on a fresh sample
    pub fn step(&mut self, sample: u16) -> StepOutput {
        let state = &mut self.state;
        let config = &self.config;

        state.error_prev2 = state.error_prev;
        state.error_prev = state.error_now;
        state.error_now = as_signed16(state.setpoint) - as_signed16(i32::from(sample));

        // Anti-windup: clamp after accumulating, every step
        state.integral = bound(
            state.integral + state.error_now as f32,
            -config.integral_limit,
            config.integral_limit,
        );

        state.derivative = (state.error_now - state.error_prev) as f32;

        let gains = &config.gains;
        let correction = gains.kp * state.error_now as f32
            + gains.ki * state.integral
            + gains.kd * state.derivative;
        state.output = bound(
            state.output + correction,
            config.output_min,
            config.output_max,
        );

        StepOutput {
            actuator: state.output as u8,
            display_value: sample / 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> PidController {
        PidController::new(PidConfig::default())
    }

    #[test]
    fn test_error_history_shifts() {
        let mut pid = controller();
        pid.set_setpoint(2500);

        pid.step(2400);
        pid.step(2450);
        pid.step(2480);

        let state = pid.state();
        assert_eq!(state.error_now, 20);
        assert_eq!(state.error_prev, 50);
        assert_eq!(state.error_prev2, 100);
        assert_eq!(state.derivative, -30.0);
    }

    #[test]
    fn test_first_step_values() {
        let mut pid = controller();
        pid.set_setpoint(2500);

        let out = pid.step(2300);
        let state = pid.state();

        // e = 200, integral = 200, derivative = 200
        // correction = 0.5*200 + 0.017*200 + 0.3*200 = 163.4
        assert_eq!(state.integral, 200.0);
        assert_eq!(state.derivative, 200.0);
        assert!(state.output > 163.39 && state.output < 163.41);
        assert_eq!(out.actuator, 163);
        assert_eq!(out.display_value, 23);
    }

    #[test]
    fn test_integral_clamped_after_accumulation() {
        let mut pid = controller();
        pid.set_setpoint(5000);

        for _ in 0..10 {
            pid.step(2000);
        }
        assert_eq!(pid.state().integral, 1000.0);

        pid.set_setpoint(0);
        for _ in 0..10 {
            pid.step(2000);
        }
        assert_eq!(pid.state().integral, -1000.0);
    }

    #[test]
    fn test_output_saturates() {
        let mut pid = controller();
        pid.set_setpoint(9000);
        for _ in 0..5 {
            assert_eq!(pid.step(1000).actuator, 255);
        }

        pid.set_setpoint(1000);
        for _ in 0..20 {
            pid.step(9000);
        }
        assert_eq!(pid.state().output, 0.0);
        assert_eq!(pid.step(9000).actuator, 0);
    }

    #[test]
    fn test_output_accumulates() {
        let config = PidConfig {
            gains: PidGains {
                kp: 0.1,
                ki: 0.0,
                kd: 0.0,
            },
            ..Default::default()
        };
        let mut pid = PidController::new(config);
        pid.set_setpoint(2100);

        // Constant error of 100 adds 10 per step
        assert_eq!(pid.step(2000).actuator, 10);
        assert_eq!(pid.step(2000).actuator, 20);
        assert_eq!(pid.step(2000).actuator, 30);
    }

    #[test]
    fn test_gain_change_keeps_output() {
        let mut pid = controller();
        pid.set_setpoint(2400);
        pid.step(2300);
        let before = pid.state().output;

        pid.set_gains(PidGains {
            kp: 2.0,
            ki: 0.1,
            kd: 0.0,
        });
        assert_eq!(pid.state().output, before);
        assert_eq!(pid.gains().kp, 2.0);
    }

    #[test]
    fn test_wire_values_are_signed_16_bit() {
        let mut pid = controller();
        // 0xFFFF reads as -1
        pid.set_setpoint(0xFFFF);
        pid.step(1);
        assert_eq!(pid.state().error_now, -2);
    }

    #[test]
    fn test_configured_bounds() {
        let config = PidConfig {
            integral_limit: 50.0,
            output_max: 100.0,
            ..Default::default()
        };
        let mut pid = PidController::new(config);
        pid.set_setpoint(3000);
        for _ in 0..10 {
            pid.step(2000);
        }
        assert_eq!(pid.state().integral, 50.0);
        assert_eq!(pid.state().output, 100.0);
    }

    #[test]
    fn test_inverted_bounds_do_not_panic() {
        let config = PidConfig {
            integral_limit: -1.0,
            output_min: 200.0,
            output_max: 100.0,
            ..Default::default()
        };
        let mut pid = PidController::new(config);
        pid.set_setpoint(3000);

        let out = pid.step(2000);
        assert_eq!(pid.state().integral, 1.0);
        assert_eq!(pid.state().output, 200.0);
        assert_eq!(out.actuator, 200);
    }
}
