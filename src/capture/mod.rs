pub mod pcap_engine;
pub mod source;

pub use pcap_engine::{CaptureError, PcapEngine};
pub use source::{FrameSource, IterSource, SourceEvent};
