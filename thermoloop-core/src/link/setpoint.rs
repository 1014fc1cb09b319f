//! Setpoint shared between the receive path and the control loop

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Setpoint cell guarded by a critical section
///
/// The value is two bytes wide; every access happens with interrupts masked
/// so the control step can never observe one new and one old byte. The
/// critical section covers a single load or store and nothing else.
pub struct SharedSetpoint {
    inner: Mutex<CriticalSectionRawMutex, Cell<u16>>,
}

impl SharedSetpoint {
    /// Create a cell holding `initial` (°C × 100)
    pub const fn new(initial: u16) -> Self {
        Self {
            inner: Mutex::new(Cell::new(initial)),
        }
    }

    /// Replace the setpoint
    pub fn store(&self, setpoint: u16) {
        self.inner.lock(|cell| cell.set(setpoint));
    }

    /// Read the setpoint
    pub fn load(&self) -> u16 {
        self.inner.lock(|cell| cell.get())
    }
}
