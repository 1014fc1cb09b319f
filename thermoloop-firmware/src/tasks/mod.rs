//! Embassy async tasks
//!
//! The control loop itself runs in the main task; these only feed it.

pub mod serial_rx;
pub mod tick;

pub use serial_rx::serial_rx_task;
pub use tick::tick_task;
