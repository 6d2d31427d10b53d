pub mod decoder;
pub mod frame;

pub use decoder::{decode, parse_elements, parse_mac_frame, LinkType};
pub use frame::{DecodedFrame, FrameKind, InformationElement, ELEMENT_ID_SSID};
