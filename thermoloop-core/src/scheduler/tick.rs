//! Tick hand-off from the timer context to the main loop

use portable_atomic::{AtomicBool, Ordering};

/// "Control step due" flag
///
/// The timer side only raises the flag; the main loop consumes it and does
/// the work. Ticks that arrive before the previous one was consumed are
/// coalesced into one.
#[derive(Debug, Default)]
pub struct TickFlag {
    due: AtomicBool,
}

impl TickFlag {
    pub const fn new() -> Self {
        Self {
            due: AtomicBool::new(false),
        }
    }

    /// Mark a control step as due (timer context)
    pub fn raise(&self) {
        self.due.store(true, Ordering::Release);
    }

    /// Consume the flag, returning whether a step was due (main loop)
    pub fn take(&self) -> bool {
        self.due.swap(false, Ordering::AcqRel)
    }

    /// Check without consuming
    pub fn is_due(&self) -> bool {
        self.due.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes() {
        let flag = TickFlag::new();
        assert!(!flag.take());

        flag.raise();
        assert!(flag.is_due());
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn test_missed_ticks_coalesce() {
        let flag = TickFlag::new();
        flag.raise();
        flag.raise();
        flag.raise();
        assert!(flag.take());
        assert!(!flag.take());
    }
}
