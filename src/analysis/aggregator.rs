use crate::analysis::classifier::{Classification, FrameClass};
use crate::analysis::tally::{Ssid, Tally};

/// Point-in-time copy of both tallies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallySnapshot {
    pub beacon: Tally,
    pub probe: Tally,
}

impl TallySnapshot {
    pub fn is_empty(&self) -> bool {
        self.beacon.is_empty() && self.probe.is_empty()
    }
}

/// Owns the beacon and probe-request tallies.
#[derive(Debug, Default)]
pub struct Aggregator {
    beacon: Tally,
    probe: Tally,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `ssid` in the tally selected by `class`.
    ///
    /// Returns the updated count, or `None` when nothing was recorded
    /// (`Ignore` class or no SSID).
    pub fn record(&mut self, class: FrameClass, ssid: Option<Ssid>) -> Option<u64> {
        let ssid = ssid?;
        let tally = match class {
            FrameClass::Beacon => &mut self.beacon,
            FrameClass::ProbeRequest => &mut self.probe,
            FrameClass::Ignore => return None,
        };
        Some(tally.increment(ssid))
    }

    pub fn record_classification(&mut self, classification: Classification) -> Option<u64> {
        self.record(classification.class, classification.ssid)
    }

    pub fn beacon(&self) -> &Tally {
        &self.beacon
    }

    pub fn probe(&self) -> &Tally {
        &self.probe
    }

    /// Copy both tallies without resetting them.
    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            beacon: self.beacon.clone(),
            probe: self.probe.clone(),
        }
    }
}
