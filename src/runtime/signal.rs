//! Ctrl-C handling. The handler only sets a flag; the capture loop checks
//! it between reads and then finishes normally so the report still prints.
//! A second Ctrl-C exits immediately, for reads that block until the next
//! frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status after a forced second interrupt (128 + SIGINT).
pub const EXIT_INTERRUPTED: i32 = 130;

pub trait ShutdownCheck {
    fn should_stop(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct ShutdownFlag {
    flag: Arc<AtomicBool>,
}

impl ShutdownFlag {
    /// Create a flag and install it as the process Ctrl-C handler.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let flag = Self::manual();
        let handler_flag = flag.clone();
        ctrlc::set_handler(move || {
            if handler_flag.request() {
                std::process::exit(EXIT_INTERRUPTED);
            }
        })?;
        Ok(flag)
    }

    /// A flag that only changes through [`ShutdownFlag::trigger`].
    pub fn manual() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Record an interrupt. Returns true when one was already pending.
    pub fn request(&self) -> bool {
        self.flag.swap(true, Ordering::SeqCst)
    }
}

impl ShutdownCheck for ShutdownFlag {
    fn should_stop(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_flag() {
        let flag = ShutdownFlag::manual();
        assert!(!flag.should_stop());

        let clone = flag.clone();
        clone.trigger();
        assert!(flag.should_stop());
    }

    #[test]
    fn test_second_request_is_reported() {
        let flag = ShutdownFlag::manual();
        assert!(!flag.request());
        assert!(flag.should_stop());
        assert!(flag.request());
    }
}
