//! Host link: shared setpoint and the receive path
//!
//! The receive path runs in its own context (UART interrupt or task) and is
//! the only writer of the setpoint. The control loop is the only reader.

pub mod receive;
pub mod setpoint;

pub use receive::{dispatch, ReceiveEvent, ReceivePath};
pub use setpoint::SharedSetpoint;
