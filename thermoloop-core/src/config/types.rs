//! Configuration type definitions
//!
//! These types hold the tunable parameters of the regulator. They are filled
//! from the embedded `thermoloop.toml` at boot and never written back.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of fixed digits shown left of the temperature
pub const PREFIX_DIGITS: usize = 4;

/// Errors from parsing or validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Malformed or unknown `[section]` header
    InvalidSection { line: usize },
    /// Line is not `key = value`, or the key is unknown in its section
    UnknownKey { line: usize },
    /// Value could not be parsed as the expected type
    InvalidValue { line: usize },
    /// Value parsed but violates a constraint
    OutOfRange(ConfigField),
}

/// Configuration fields that carry range constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigField {
    Gains,
    IntegralLimit,
    OutputRange,
    TickPeriod,
    TelemetryDivisor,
    DisplayPrefix,
    Baudrate,
}

/// PID gains
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PidGains {
    /// Proportional gain (Kp)
    pub kp: f32,
    /// Integral gain (Ki)
    pub ki: f32,
    /// Derivative gain (Kd)
    pub kd: f32,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 0.5,
            ki: 0.017,
            kd: 0.30,
        }
    }
}

/// Regulator configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// PID gains
    pub gains: PidGains,
    /// Anti-windup bound, the integral is clamped to ±this after every step
    ///
    /// Expressed in accumulated error units (°C × 100 × ticks).
    pub integral_limit: f32,
    /// Lower bound of the accumulated output
    pub output_min: f32,
    /// Upper bound of the accumulated output
    pub output_max: f32,
    /// Control period in milliseconds
    pub tick_period_ms: u32,
    /// Telemetry is sent on every Nth control tick
    pub telemetry_divisor: u32,
    /// Digits shown on the four leftmost display positions
    pub display_prefix: [u8; PREFIX_DIGITS],
    /// Host link baud rate
    pub baudrate: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            gains: PidGains::default(),
            integral_limit: 1000.0,
            output_min: 0.0,
            output_max: 255.0,
            tick_period_ms: 50,
            telemetry_divisor: 5,
            display_prefix: [0; PREFIX_DIGITS],
            baudrate: 9600,
        }
    }
}

impl ControlConfig {
    /// Check every range constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gains = &self.gains;
        if !(gains.kp.is_finite() && gains.ki.is_finite() && gains.kd.is_finite()) {
            return Err(ConfigError::OutOfRange(ConfigField::Gains));
        }
        if !self.integral_limit.is_finite() || self.integral_limit <= 0.0 {
            return Err(ConfigError::OutOfRange(ConfigField::IntegralLimit));
        }
        // Output is truncated into a u8 duty
        let in_duty_range = |v: f32| (0.0..=255.0).contains(&v);
        if !in_duty_range(self.output_min)
            || !in_duty_range(self.output_max)
            || self.output_min >= self.output_max
        {
            return Err(ConfigError::OutOfRange(ConfigField::OutputRange));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::OutOfRange(ConfigField::TickPeriod));
        }
        if self.telemetry_divisor == 0 {
            return Err(ConfigError::OutOfRange(ConfigField::TelemetryDivisor));
        }
        if self.display_prefix.iter().any(|&d| d > 9) {
            return Err(ConfigError::OutOfRange(ConfigField::DisplayPrefix));
        }
        if self.baudrate == 0 {
            return Err(ConfigError::OutOfRange(ConfigField::Baudrate));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ControlConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.gains.kp, 0.5);
        assert_eq!(config.telemetry_divisor, 5);
    }

    #[test]
    fn test_inverted_output_range_rejected() {
        let config = ControlConfig {
            output_min: 200.0,
            output_max: 100.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange(ConfigField::OutputRange))
        );
    }

    #[test]
    fn test_output_above_duty_range_rejected() {
        let config = ControlConfig {
            output_max: 300.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange(ConfigField::OutputRange))
        );
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let config = ControlConfig {
            telemetry_divisor: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange(ConfigField::TelemetryDivisor))
        );
    }

    #[test]
    fn test_non_finite_gain_rejected() {
        let mut config = ControlConfig::default();
        config.gains.kd = f32::NAN;
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutOfRange(ConfigField::Gains))
        );
    }
}
