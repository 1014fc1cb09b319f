//! Cooperative main loop
//!
//! [`ControlLoop::poll`] is one iteration of the firmware's main loop:
//!
//! 1. If the tick flag is due: copy the shared setpoint, read the sensor,
//!    run one PID step, drive the heater, update the display buffer, and on
//!    every Nth tick transmit the sample just taken.
//! 2. Always: refresh one display position.
//!
//! Telemetry therefore always carries the sample of the step that ran in
//! the same iteration.

use thermoloop_hal::UartTx;
use thermoloop_protocol::encode_telemetry;

use crate::config::{ConfigError, ControlConfig};
use crate::control::{PidConfig, PidController};
use crate::display::{DisplayBuffer, DisplayRefresh};
use crate::link::SharedSetpoint;
use crate::scheduler::{TelemetryGate, TickFlag};
use crate::traits::{HeaterOutput, SegmentDisplay, TemperatureSensor};

/// Hardware ports used by the loop
pub struct Ports<S, H, T, D> {
    pub sensor: S,
    pub heater: H,
    pub tx: T,
    pub display: D,
}

/// Summary of a control step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Setpoint used for this step (°C × 100)
    pub setpoint: u16,
    /// Sensor sample (°C × 100)
    pub sample: u16,
    /// Duty written to the heater
    pub actuator: u8,
    /// Whole degrees shown on the display
    pub display_value: u16,
    /// A telemetry frame was transmitted
    pub telemetry_sent: bool,
}

/// Outcome of one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopEvent {
    /// No tick was due, only the display was refreshed
    Idle,
    /// A control step ran
    Stepped(TickReport),
}

/// The regulator's main loop state
pub struct ControlLoop<'a, S, H, T, D> {
    ports: Ports<S, H, T, D>,
    controller: PidController,
    buffer: DisplayBuffer,
    refresh: DisplayRefresh,
    gate: TelemetryGate,
    tick: &'a TickFlag,
    setpoint: &'a SharedSetpoint,
}

impl<'a, S, H, T, D> ControlLoop<'a, S, H, T, D>
where
    S: TemperatureSensor,
    H: HeaterOutput,
    T: UartTx,
    D: SegmentDisplay,
{
    /// Build the loop from a configuration, rejecting one that fails
    /// [`ControlConfig::validate`]
    pub fn new(
        config: &ControlConfig,
        ports: Ports<S, H, T, D>,
        tick: &'a TickFlag,
        setpoint: &'a SharedSetpoint,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            ports,
            controller: PidController::new(PidConfig::from(config)),
            buffer: DisplayBuffer::new(config.display_prefix),
            refresh: DisplayRefresh::new(),
            gate: TelemetryGate::new(config.telemetry_divisor),
            tick,
            setpoint,
        })
    }

    /// Run one main-loop iteration
    ///
    /// A transmit error is returned after the display has been refreshed;
    /// the control step itself has already been applied.
    pub fn poll(&mut self) -> Result<LoopEvent, T::Error> {
        let event = if self.tick.take() {
            Some(self.control_step())
        } else {
            None
        };

        self.refresh.refresh(&self.buffer, &mut self.ports.display);

        match event {
            Some((report, sent)) => sent.map(|()| LoopEvent::Stepped(report)),
            None => Ok(LoopEvent::Idle),
        }
    }

    fn control_step(&mut self) -> (TickReport, Result<(), T::Error>) {
        // Single short critical section
        let setpoint = self.setpoint.load();
        self.controller.set_setpoint(setpoint);

        let sample = self.ports.sensor.read_centi();
        let output = self.controller.step(sample);
        self.ports.heater.set_duty(output.actuator);
        self.buffer.show_sample(u32::from(sample));

        let telemetry_sent = self.gate.on_tick();
        let sent = if telemetry_sent {
            self.send_telemetry(sample)
        } else {
            Ok(())
        };

        let report = TickReport {
            setpoint,
            sample,
            actuator: output.actuator,
            display_value: output.display_value,
            telemetry_sent,
        };
        (report, sent)
    }

    /// Transmit one telemetry frame, byte by byte
    fn send_telemetry(&mut self, sample: u16) -> Result<(), T::Error> {
        for byte in encode_telemetry(sample) {
            self.ports.tx.write_byte(byte)?;
        }
        Ok(())
    }

    /// PID controller (state inspection)
    pub fn controller(&self) -> &PidController {
        &self.controller
    }

    /// Current display contents
    pub fn display_buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    /// Hardware ports
    pub fn ports(&self) -> &Ports<S, H, T, D> {
        &self.ports
    }
}
