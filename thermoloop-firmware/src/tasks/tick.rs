//! Control period timer
//!
//! Only raises the tick flag; the control step runs in the main loop.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::TICK_DUE;

#[embassy_executor::task]
pub async fn tick_task(period_ms: u32) {
    info!("Tick task started ({} ms)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(period_ms)));

    loop {
        ticker.next().await;

        if TICK_DUE.is_due() {
            trace!("Tick overrun, coalescing");
        }
        TICK_DUE.raise();
    }
}
