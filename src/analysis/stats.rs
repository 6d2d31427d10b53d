use std::time::{Duration, Instant};

use crate::analysis::classifier::{Classification, FrameClass};
use crate::utils::formatting::{format_bytes, format_count, format_duration};

/// Counters describing how captured frames flowed through the pipeline.
#[derive(Debug, Clone)]
pub struct CaptureStats {
    pub frames_read: u64,
    pub bytes_read: u64,
    pub frames_undecodable: u64,
    pub frames_ignored: u64,
    pub frames_missing_ssid: u64,
    pub beacons_counted: u64,
    pub probes_counted: u64,
    pub frames_dropped: Option<u32>,
    started: Instant,
}

impl Default for CaptureStats {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureStats {
    pub fn new() -> Self {
        Self {
            frames_read: 0,
            bytes_read: 0,
            frames_undecodable: 0,
            frames_ignored: 0,
            frames_missing_ssid: 0,
            beacons_counted: 0,
            probes_counted: 0,
            frames_dropped: None,
            started: Instant::now(),
        }
    }

    pub fn record_undecodable(&mut self, length: usize) {
        self.frames_read += 1;
        self.bytes_read += length as u64;
        self.frames_undecodable += 1;
    }

    pub fn record_classified(&mut self, length: usize, classification: &Classification) {
        self.frames_read += 1;
        self.bytes_read += length as u64;

        match (classification.class, classification.ssid.is_some()) {
            (FrameClass::Ignore, _) => self.frames_ignored += 1,
            (_, false) => self.frames_missing_ssid += 1,
            (FrameClass::Beacon, true) => self.beacons_counted += 1,
            (FrameClass::ProbeRequest, true) => self.probes_counted += 1,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn frames_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.frames_read as f64 / secs
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} frames ({}) in {} ({:.1}/s): {} beacons, {} probe requests, {} without SSID, {} ignored, {} undecodable",
            format_count(self.frames_read),
            format_bytes(self.bytes_read),
            format_duration(self.elapsed().as_secs()),
            self.frames_per_second(),
            format_count(self.beacons_counted),
            format_count(self.probes_counted),
            format_count(self.frames_missing_ssid),
            format_count(self.frames_ignored),
            format_count(self.frames_undecodable),
        );
        if let Some(dropped) = self.frames_dropped {
            summary.push_str(&format!(", {} dropped by kernel", dropped));
        }
        summary
    }
}
