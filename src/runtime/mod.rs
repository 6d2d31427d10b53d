pub mod monitor;
pub mod signal;

pub use monitor::{Monitor, StopReason};
pub use signal::{ShutdownCheck, ShutdownFlag, EXIT_INTERRUPTED};
