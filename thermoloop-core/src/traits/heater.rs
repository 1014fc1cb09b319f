//! Heater and temperature sensor traits

/// Trait for temperature sensors
///
/// Readings are °C × 100 (2350 = 23.50°C), the same unit the host link
/// carries. The read is assumed instantaneous and cannot fail; an
/// implementation with a fallible bus must decide what to report itself.
pub trait TemperatureSensor {
    /// Read the current temperature
    fn read_centi(&mut self) -> u16;
}

/// Trait for the heater drive
///
/// Implementations map the duty onto PWM, an SSR, a DAC, ...
pub trait HeaterOutput {
    /// Apply a duty value, 0 = off, 255 = full power
    fn set_duty(&mut self, duty: u8);
}
