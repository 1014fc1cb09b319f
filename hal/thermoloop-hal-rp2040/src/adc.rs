//! ADC temperature sensor
//!
//! The sensor is an LM35-style analog part (10 mV/°C) on one of the RP2040
//! ADC inputs:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29

use embassy_rp::adc::{Adc, Blocking, Channel};
use thermoloop_core::traits::TemperatureSensor;

/// ADC full-scale count (12-bit)
pub const ADC_MAX: u32 = 4096;

/// ADC reference voltage in millivolts
pub const ADC_VREF_MV: u32 = 3300;

/// Sensor slope in millivolts per °C
pub const SENSOR_MV_PER_C: u32 = 10;

/// Convert a raw ADC count to °C × 100
///
/// °C × 100 = mV × 100 / slope, mV = count × vref / full-scale.
pub const fn adc_to_centi(count: u16) -> u16 {
    let centi = (count as u32 * ADC_VREF_MV * 100) / (ADC_MAX * SENSOR_MV_PER_C);
    if centi > u16::MAX as u32 {
        u16::MAX
    } else {
        centi as u16
    }
}

/// Temperature sensor on an ADC channel
///
/// A failed conversion repeats the previous sample so the control loop
/// always gets a reading.
pub struct AdcSensor {
    adc: Adc<'static, Blocking>,
    channel: Channel<'static>,
    last_centi: u16,
}

impl AdcSensor {
    pub fn new(adc: Adc<'static, Blocking>, channel: Channel<'static>) -> Self {
        Self {
            adc,
            channel,
            last_centi: 0,
        }
    }
}

impl TemperatureSensor for AdcSensor {
    fn read_centi(&mut self) -> u16 {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(count) => {
                self.last_centi = adc_to_centi(count);
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ADC read error: {:?}, repeating last sample", _e);
            }
        }
        self.last_centi
    }
}
