use crate::analysis::{classify, Aggregator, CaptureStats, TallySnapshot};
use crate::capture::{FrameSource, SourceEvent};
use crate::runtime::signal::ShutdownCheck;

/// Why the capture loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The source reported end of stream.
    EndOfStream,
    /// Shutdown was requested.
    Interrupted,
    /// The source failed after it had been opened.
    SourceError(String),
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StopReason::EndOfStream => write!(f, "end of capture"),
            StopReason::Interrupted => write!(f, "interrupted"),
            StopReason::SourceError(e) => write!(f, "capture error: {}", e),
        }
    }
}

/// Drives frames from a source through the classifier into the aggregator.
#[derive(Debug, Default)]
pub struct Monitor {
    aggregator: Aggregator,
    stats: CaptureStats,
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `source` until it closes, fails, or `shutdown` fires.
    ///
    /// Errors from the source end the run rather than propagating: every
    /// count recorded so far stays valid and is still reported.
    pub fn run(&mut self, source: &mut dyn FrameSource, shutdown: &dyn ShutdownCheck) -> StopReason {
        log::info!("Counting SSIDs from {}", source.describe());

        let reason = loop {
            if shutdown.should_stop() {
                break StopReason::Interrupted;
            }

            match source.next_event() {
                Ok(SourceEvent::Frame { frame, length }) => {
                    let classification = classify(&frame);
                    self.stats.record_classified(length, &classification);
                    if classification.is_countable() {
                        if let Some(ssid) = &classification.ssid {
                            log::trace!("{} {:?} ({})", classification.class, ssid.to_text(), frame.kind);
                        }
                    }
                    self.aggregator.record_classification(classification);
                }
                Ok(SourceEvent::Undecodable { length }) => {
                    self.stats.record_undecodable(length);
                }
                Ok(SourceEvent::Idle) => {}
                Ok(SourceEvent::Closed) => break StopReason::EndOfStream,
                Err(e) => {
                    log::error!("{}", e);
                    break StopReason::SourceError(e.to_string());
                }
            }
        };

        self.stats.frames_dropped = source.dropped_frames();
        if let Some(dropped) = self.stats.frames_dropped.filter(|d| *d > 0) {
            log::warn!("{} frames were dropped before they could be read", dropped);
        }
        log::info!("Capture stopped ({}): {}", reason, self.stats.summary());
        log::info!(
            "{} distinct beacon SSIDs, {} distinct probe SSIDs",
            self.aggregator.beacon().len(),
            self.aggregator.probe().len()
        );

        reason
    }

    pub fn snapshot(&self) -> TallySnapshot {
        self.aggregator.snapshot()
    }

    pub fn stats(&self) -> &CaptureStats {
        &self.stats
    }
}
