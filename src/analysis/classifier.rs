use crate::analysis::tally::Ssid;
use crate::dot11::{DecodedFrame, FrameKind};

/// The two frame classes that feed a tally, plus everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameClass {
    Beacon,
    ProbeRequest,
    Ignore,
}

impl std::fmt::Display for FrameClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameClass::Beacon => write!(f, "BEACON"),
            FrameClass::ProbeRequest => write!(f, "PROBE"),
            FrameClass::Ignore => write!(f, "IGNORE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub class: FrameClass,
    /// First SSID element of the frame, `None` when the frame has none.
    pub ssid: Option<Ssid>,
}

impl Classification {
    pub fn ignored() -> Self {
        Self {
            class: FrameClass::Ignore,
            ssid: None,
        }
    }

    /// True when this result would change a tally.
    pub fn is_countable(&self) -> bool {
        self.class != FrameClass::Ignore && self.ssid.is_some()
    }
}

pub fn classify(frame: &DecodedFrame) -> Classification {
    let class = match frame.kind {
        FrameKind::Beacon => FrameClass::Beacon,
        FrameKind::ProbeRequest => FrameClass::ProbeRequest,
        _ => return Classification::ignored(),
    };

    let ssid = frame
        .elements
        .iter()
        .find(|element| element.is_ssid())
        .map(|element| Ssid::new(element.data.as_slice()));

    Classification { class, ssid }
}
