//! Thermoloop - Closed-Loop Temperature Regulator Firmware
//!
//! Samples an analog temperature sensor every control tick, drives a PWM
//! heater through a PID controller, shows the reading on an 8-digit
//! seven-segment display and exchanges framed setpoint/telemetry messages
//! with a host over UART0.
//!
//! Board wiring:
//! - UART0: GPIO0 TX, GPIO1 RX
//! - Segments a-g, dp: GPIO2-9
//! - Digit selects 0-7: GPIO10-17
//! - Heater PWM: GPIO18 (slice 1, channel A)
//! - Sensor: GPIO26 (ADC0)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use embassy_time::{Duration, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use thermoloop_core::config::{parse_config, ControlConfig};
use thermoloop_core::{ControlLoop, LoopEvent, Ports};
use thermoloop_hal::UartConfig;
use thermoloop_hal_rp2040::pwm::heater_pwm_config;
use thermoloop_hal_rp2040::uart::uart_config;
use thermoloop_hal_rp2040::{AdcSensor, GpioSegmentDisplay, HostTx, Pin, PwmHeater};

mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit thermoloop.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../thermoloop.toml");

/// Main loop pacing; one display position is lit per iteration
const REFRESH_INTERVAL: Duration = Duration::from_micros(1000);

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 32]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 32]> = StaticCell::new();

/// Low-level GPIO outputs, all starting low
macro_rules! outputs {
    ($($pin:expr),+ $(,)?) => {
        [$(Pin::new(Output::new($pin, Level::Low))),+]
    };
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thermoloop firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "PID gains kp={} ki={} kd={}, tick {} ms, telemetry every {} ticks",
        config.gains.kp,
        config.gains.ki,
        config.gains.kd,
        config.tick_period_ms,
        config.telemetry_divisor
    );

    // Host link, 8N1
    let link = UartConfig {
        baudrate: config.baudrate,
    };
    let tx_buf = TX_BUF.init([0u8; 32]);
    let rx_buf = RX_BUF.init([0u8; 32]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config(&link));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    info!("UART initialized at {} baud", link.baudrate);

    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let sensor_channel = Channel::new_pin(p.PIN_26, Pull::None);
    let sensor = AdcSensor::new(adc, sensor_channel);

    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_18, heater_pwm_config());
    let heater = PwmHeater::new(pwm);

    let segments = outputs![
        p.PIN_2, p.PIN_3, p.PIN_4, p.PIN_5, p.PIN_6, p.PIN_7, p.PIN_8, p.PIN_9,
    ];
    let digits = outputs![
        p.PIN_10, p.PIN_11, p.PIN_12, p.PIN_13, p.PIN_14, p.PIN_15, p.PIN_16, p.PIN_17,
    ];
    let display = GpioSegmentDisplay::new(segments, digits);
    info!("Sensor, heater and display initialized");

    spawner.spawn(tasks::tick_task(config.tick_period_ms)).unwrap();
    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();

    let ports = Ports {
        sensor,
        heater,
        tx: HostTx::new(tx),
        display,
    };
    let mut control = unwrap!(ControlLoop::new(
        &config,
        ports,
        &channels::TICK_DUE,
        &channels::SETPOINT
    ));

    info!("Control loop running");

    loop {
        match control.poll() {
            Ok(LoopEvent::Idle) => {}
            Ok(LoopEvent::Stepped(report)) => {
                trace!("Step: {:?}", report);
            }
            Err(e) => {
                warn!("Telemetry write failed: {:?}", e);
            }
        }

        Timer::after(REFRESH_INTERVAL).await;
    }
}

/// Parse the embedded configuration
///
/// Falls back to the built-in defaults if the file does not parse; build.rs
/// catches most problems before they reach the target.
fn load_config() -> ControlConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded configuration");
            config
        }
        Err(e) => {
            warn!("Embedded configuration invalid ({:?}), using defaults", e);
            ControlConfig::default()
        }
    }
}
