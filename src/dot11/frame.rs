/// Element ID of the SSID information element.
pub const ELEMENT_ID_SSID: u8 = 0;

/// Frame type as carried in the 802.11 frame control field.
///
/// Only the management subtypes this crate cares about get their own
/// variant; everything else keeps its raw subtype number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Beacon,
    ProbeRequest,
    ProbeResponse,
    Management(u8),
    Control(u8),
    Data(u8),
    Extension(u8),
}

impl FrameKind {
    /// Build a kind from the 2-bit type and 4-bit subtype fields.
    pub fn from_type_subtype(frame_type: u8, subtype: u8) -> Self {
        match (frame_type & 0x03, subtype & 0x0f) {
            (0, 4) => FrameKind::ProbeRequest,
            (0, 5) => FrameKind::ProbeResponse,
            (0, 8) => FrameKind::Beacon,
            (0, s) => FrameKind::Management(s),
            (1, s) => FrameKind::Control(s),
            (2, s) => FrameKind::Data(s),
            (_, s) => FrameKind::Extension(s),
        }
    }

    pub fn is_management(&self) -> bool {
        matches!(
            self,
            FrameKind::Beacon
                | FrameKind::ProbeRequest
                | FrameKind::ProbeResponse
                | FrameKind::Management(_)
        )
    }

    /// Length of the fixed parameters between the management header and
    /// the first information element.
    pub fn fixed_parameters_len(&self) -> usize {
        match self {
            // timestamp (8) + beacon interval (2) + capability info (2)
            FrameKind::Beacon | FrameKind::ProbeResponse => 12,
            FrameKind::ProbeRequest => 0,
            // association request: capability (2) + listen interval (2)
            FrameKind::Management(0) => 4,
            // association / reassociation response: capability + status + AID
            FrameKind::Management(1) | FrameKind::Management(3) => 6,
            // reassociation request: capability + listen interval + current AP
            FrameKind::Management(2) => 10,
            _ => 0,
        }
    }
}

impl std::fmt::Display for FrameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameKind::Beacon => write!(f, "beacon"),
            FrameKind::ProbeRequest => write!(f, "probe-request"),
            FrameKind::ProbeResponse => write!(f, "probe-response"),
            FrameKind::Management(s) => write!(f, "mgmt-{}", s),
            FrameKind::Control(s) => write!(f, "ctrl-{}", s),
            FrameKind::Data(s) => write!(f, "data-{}", s),
            FrameKind::Extension(s) => write!(f, "ext-{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InformationElement {
    pub id: u8,
    pub data: Vec<u8>,
}

impl InformationElement {
    pub fn new(id: u8, data: impl Into<Vec<u8>>) -> Self {
        Self { id, data: data.into() }
    }

    pub fn is_ssid(&self) -> bool {
        self.id == ELEMENT_ID_SSID
    }
}

/// An 802.11 frame reduced to what the classifier reads: its kind and the
/// information elements that could be parsed, in wire order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub kind: FrameKind,
    pub elements: Vec<InformationElement>,
}

impl DecodedFrame {
    pub fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, id: u8, data: impl Into<Vec<u8>>) -> Self {
        self.elements.push(InformationElement::new(id, data));
        self
    }

    pub fn with_ssid(self, ssid: impl Into<Vec<u8>>) -> Self {
        self.with_element(ELEMENT_ID_SSID, ssid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_type_subtype() {
        assert_eq!(FrameKind::from_type_subtype(0, 8), FrameKind::Beacon);
        assert_eq!(FrameKind::from_type_subtype(0, 4), FrameKind::ProbeRequest);
        assert_eq!(FrameKind::from_type_subtype(0, 5), FrameKind::ProbeResponse);
        assert_eq!(FrameKind::from_type_subtype(0, 10), FrameKind::Management(10));
        assert_eq!(FrameKind::from_type_subtype(1, 11), FrameKind::Control(11));
        assert_eq!(FrameKind::from_type_subtype(2, 0), FrameKind::Data(0));
        assert_eq!(FrameKind::from_type_subtype(3, 1), FrameKind::Extension(1));
    }

    #[test]
    fn test_fixed_parameters() {
        assert_eq!(FrameKind::Beacon.fixed_parameters_len(), 12);
        assert_eq!(FrameKind::ProbeRequest.fixed_parameters_len(), 0);
        assert!(FrameKind::ProbeRequest.is_management());
        assert!(!FrameKind::Data(0).is_management());
    }

    #[test]
    fn test_frame_builder() {
        let frame = DecodedFrame::new(FrameKind::Beacon)
            .with_element(1, vec![0x82, 0x84])
            .with_ssid("Cafe");

        assert_eq!(frame.elements.len(), 2);
        assert!(!frame.elements[0].is_ssid());
        assert!(frame.elements[1].is_ssid());
        assert_eq!(frame.elements[1].data, b"Cafe".to_vec());
    }
}
