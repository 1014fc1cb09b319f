//! Host link receive task
//!
//! Feeds received bytes through the receive path, which applies setpoint
//! frames to the shared setpoint as soon as the fifth byte arrives.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use thermoloop_core::link::{ReceiveEvent, ReceivePath};

use crate::channels::SETPOINT;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut path = ReceivePath::new(&SETPOINT);
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                for &byte in &buf[..n] {
                    match path.on_receive(byte) {
                        ReceiveEvent::Pending => {}
                        ReceiveEvent::SetpointApplied(setpoint) => {
                            debug!("Setpoint: {}", setpoint);
                        }
                        ReceiveEvent::Discarded(frame) => {
                            trace!("Dropped frame {:?}", frame);
                        }
                    }
                }
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
