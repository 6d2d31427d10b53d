use radiotap::Radiotap;

use crate::dot11::frame::{DecodedFrame, FrameKind, InformationElement};

/// Frame control (2) + duration (2) + three addresses (18) + sequence (2).
const MANAGEMENT_HEADER_LEN: usize = 24;
/// HT Control field present when the Order flag is set.
const HT_CONTROL_LEN: usize = 4;
const FLAG_ORDER: u8 = 0x80;
const FCS_LEN: usize = 4;

/// Link-layer encapsulations the decoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    /// DLT_IEEE802_11_RADIO: radiotap header followed by the 802.11 frame.
    Radiotap,
    /// DLT_IEEE802_11: bare 802.11 frame.
    Ieee80211,
}

impl LinkType {
    pub const DLT_IEEE802_11: i32 = 105;
    pub const DLT_IEEE802_11_RADIO: i32 = 127;

    pub fn from_dlt(dlt: i32) -> Option<Self> {
        match dlt {
            Self::DLT_IEEE802_11_RADIO => Some(LinkType::Radiotap),
            Self::DLT_IEEE802_11 => Some(LinkType::Ieee80211),
            _ => None,
        }
    }

    pub fn dlt(&self) -> i32 {
        match self {
            LinkType::Radiotap => Self::DLT_IEEE802_11_RADIO,
            LinkType::Ieee80211 => Self::DLT_IEEE802_11,
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkType::Radiotap => write!(f, "IEEE802_11_RADIO"),
            LinkType::Ieee80211 => write!(f, "IEEE802_11"),
        }
    }
}

/// Decode one captured frame. Returns `None` when the buffer cannot hold
/// a usable 802.11 frame.
pub fn decode(link: LinkType, data: &[u8]) -> Option<DecodedFrame> {
    match link {
        LinkType::Ieee80211 => parse_mac_frame(data),
        LinkType::Radiotap => {
            let radiotap = Radiotap::from_bytes(data).ok()?;
            let payload = data.get(radiotap.header.length..)?;
            let has_fcs = radiotap.flags.map(|flags| flags.fcs).unwrap_or(false);
            let payload = if has_fcs && payload.len() >= FCS_LEN {
                &payload[..payload.len() - FCS_LEN]
            } else {
                payload
            };
            parse_mac_frame(payload)
        }
    }
}

/// Parse the 802.11 MAC header and, for management frames, the tagged
/// parameters that follow it.
pub fn parse_mac_frame(data: &[u8]) -> Option<DecodedFrame> {
    let fc = *data.first()?;
    let frame_type = (fc >> 2) & 0x03;
    let subtype = (fc >> 4) & 0x0f;
    let kind = FrameKind::from_type_subtype(frame_type, subtype);

    if !kind.is_management() {
        // Non-management frames carry no tagged parameters we can read.
        if data.len() < 2 {
            return None;
        }
        return Some(DecodedFrame::new(kind));
    }

    let flags = *data.get(1)?;
    let header_len = if flags & FLAG_ORDER != 0 {
        MANAGEMENT_HEADER_LEN + HT_CONTROL_LEN
    } else {
        MANAGEMENT_HEADER_LEN
    };

    if data.len() < header_len {
        return None;
    }

    let body = &data[header_len..];
    let elements = body
        .get(kind.fixed_parameters_len()..)
        .map(parse_elements)
        .unwrap_or_default();

    Some(DecodedFrame { kind, elements })
}

/// Walk a tagged-parameter block. Parsing stops at the first element whose
/// declared length runs past the end of the buffer.
pub fn parse_elements(mut data: &[u8]) -> Vec<InformationElement> {
    let mut elements = Vec::new();

    while data.len() >= 2 {
        let id = data[0];
        let len = data[1] as usize;
        let Some(payload) = data.get(2..2 + len) else {
            break;
        };
        elements.push(InformationElement::new(id, payload));
        data = &data[2 + len..];
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn management_frame(fc: u8, fixed: usize, elements: &[(u8, &[u8])]) -> Vec<u8> {
        let mut frame = vec![fc, 0x00];
        frame.extend_from_slice(&[0u8; MANAGEMENT_HEADER_LEN - 2]);
        frame.extend(std::iter::repeat(0u8).take(fixed));
        for (id, payload) in elements {
            frame.push(*id);
            frame.push(payload.len() as u8);
            frame.extend_from_slice(payload);
        }
        frame
    }

    #[test]
    fn test_link_type_from_dlt() {
        assert_eq!(LinkType::from_dlt(127), Some(LinkType::Radiotap));
        assert_eq!(LinkType::from_dlt(105), Some(LinkType::Ieee80211));
        assert_eq!(LinkType::from_dlt(1), None);
        assert_eq!(LinkType::Radiotap.dlt(), 127);
    }

    #[test]
    fn test_parse_beacon() {
        let raw = management_frame(0x80, 12, &[(0, &b"Cafe"[..]), (1, &[0x82, 0x84][..])]);
        let frame = parse_mac_frame(&raw).unwrap();

        assert_eq!(frame.kind, FrameKind::Beacon);
        assert_eq!(frame.elements.len(), 2);
        assert_eq!(frame.elements[0], InformationElement::new(0, "Cafe"));
    }

    #[test]
    fn test_parse_probe_request_has_no_fixed_parameters() {
        let raw = management_frame(0x40, 0, &[(0, &b""[..]), (1, &[0x02][..])]);
        let frame = parse_mac_frame(&raw).unwrap();

        assert_eq!(frame.kind, FrameKind::ProbeRequest);
        assert_eq!(frame.elements[0], InformationElement::new(0, Vec::<u8>::new()));
    }

    #[test]
    fn test_order_flag_skips_ht_control() {
        let mut raw = vec![0x80, 0x80];
        raw.extend_from_slice(&[0u8; MANAGEMENT_HEADER_LEN - 2]);
        raw.extend_from_slice(&[0x64, 0x00, 0x11, 0x04]); // HT Control
        raw.extend_from_slice(&[0u8; 12]);
        raw.extend_from_slice(&[0x00, 0x04, b'C', b'a', b'f', b'e']);

        let frame = parse_mac_frame(&raw).unwrap();
        assert_eq!(frame.kind, FrameKind::Beacon);
        assert_eq!(frame.elements, vec![InformationElement::new(0, "Cafe")]);
        assert!(parse_mac_frame(&raw[..26]).is_none());
    }

    #[test]
    fn test_truncated_element_is_omitted() {
        let mut raw = management_frame(0x80, 12, &[(0, &b"Home"[..])]);
        // Declares 10 bytes but only 3 follow.
        raw.extend_from_slice(&[221, 10, 0x00, 0x50, 0xf2]);
        let frame = parse_mac_frame(&raw).unwrap();

        assert_eq!(frame.elements.len(), 1);
        assert_eq!(frame.elements[0].data, b"Home".to_vec());
    }

    #[test]
    fn test_short_management_frame_is_rejected() {
        assert!(parse_mac_frame(&[0x80, 0x00, 0x00]).is_none());
        assert!(parse_mac_frame(&[]).is_none());
    }

    #[test]
    fn test_beacon_without_room_for_fixed_parameters() {
        let raw = management_frame(0x80, 4, &[]);
        let frame = parse_mac_frame(&raw).unwrap();
        assert_eq!(frame.kind, FrameKind::Beacon);
        assert!(frame.elements.is_empty());
    }

    #[test]
    fn test_data_frame_has_no_elements() {
        let mut raw = vec![0x08, 0x01];
        raw.extend_from_slice(&[0u8; 30]);
        let frame = parse_mac_frame(&raw).unwrap();
        assert_eq!(frame.kind, FrameKind::Data(0));
        assert!(frame.elements.is_empty());
    }

    #[test]
    fn test_decode_radiotap_strips_header() {
        // version 0, pad, length 8, no fields present
        let mut raw = vec![0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00];
        raw.extend(management_frame(0x40, 0, &[(0, &b"Guest"[..])]));

        let frame = decode(LinkType::Radiotap, &raw).unwrap();
        assert_eq!(frame.kind, FrameKind::ProbeRequest);
        assert_eq!(frame.elements[0].data, b"Guest".to_vec());
    }

    #[test]
    fn test_decode_radiotap_strips_fcs() {
        // length 9, flags field present with the FCS bit set
        let mut raw = vec![0x00, 0x00, 0x09, 0x00, 0x02, 0x00, 0x00, 0x00, 0x10];
        raw.extend(management_frame(0x80, 12, &[(0, &b"Lab"[..])]));
        raw.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);

        let frame = decode(LinkType::Radiotap, &raw).unwrap();
        assert_eq!(frame.elements.len(), 1);
        assert_eq!(frame.elements[0].data, b"Lab".to_vec());
    }

    #[test]
    fn test_decode_garbage_radiotap() {
        assert!(decode(LinkType::Radiotap, &[0x00, 0x00]).is_none());
    }
}
