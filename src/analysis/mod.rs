pub mod aggregator;
pub mod classifier;
pub mod stats;
pub mod tally;

pub use aggregator::{Aggregator, TallySnapshot};
pub use classifier::{classify, Classification, FrameClass};
pub use stats::CaptureStats;
pub use tally::{Ssid, Tally};
