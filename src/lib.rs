// Library exports for ssid-counter
pub mod analysis;
pub mod capture;
pub mod config;
pub mod dot11;
pub mod report;
pub mod runtime;
pub mod utils;

pub use analysis::{aggregator, classifier, stats, tally};
pub use capture::{pcap_engine, source};
pub use config::settings;
pub use dot11::{decoder, frame};
pub use report::render;
pub use runtime::{monitor, signal};
pub use utils::formatting;

// Result type used by the binary
pub use anyhow::Result;
