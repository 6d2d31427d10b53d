use pcap::{Activated, Active, Capture, Device, Linktype};
use std::path::Path;

use thiserror::Error;

use crate::capture::source::{FrameSource, SourceEvent};
use crate::config::CaptureConfig;
use crate::dot11::{decode, LinkType};

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Insufficient privileges. Try: sudo setcap cap_net_raw,cap_net_admin=eip ./ssid-counter")]
    InsufficientPrivileges,
    
    #[error("Network interface '{0}' not found. Available interfaces: {1:?}")]
    InterfaceNotFound(String, Vec<String>),
    
    #[error("Link type {0} is not 802.11. Put the interface in monitor mode (or pass --monitor)")]
    UnsupportedLinkType(i32),
    
    #[error("No capture source configured")]
    NoSource,
    
    #[error("Packet capture failed: {0}")]
    CaptureError(String),
    
    #[error("Device error: {0}")]
    DeviceError(String),
}

/// libpcap-backed frame source for a live interface or a savefile.
pub struct PcapEngine {
    capture: Capture<dyn Activated>,
    link: LinkType,
    source: String,
    live: bool,
}

impl PcapEngine {
    /// Open whichever source the configuration names.
    pub fn open(config: &CaptureConfig) -> Result<Self, CaptureError> {
        match (&config.read_file, &config.interface) {
            (Some(path), _) => Self::open_file(path, config.filter.as_deref()),
            (None, Some(_)) => Self::open_live(config),
            (None, None) => Err(CaptureError::NoSource),
        }
    }
    
    pub fn open_live(config: &CaptureConfig) -> Result<Self, CaptureError> {
        let interface = config.interface.clone().ok_or(CaptureError::NoSource)?;
        let available_devices = Self::list_devices()?;
        
        if !available_devices.iter().any(|d| d.name == interface) {
            let device_names: Vec<String> = available_devices.iter()
                .map(|d| d.name.clone())
                .collect();
            return Err(CaptureError::InterfaceNotFound(interface, device_names));
        }
        
        log::info!(
            "Opening {} (snaplen {}, promiscuous {}, monitor mode {})",
            interface, config.snaplen, config.promiscuous, config.monitor_mode
        );
        
        let device = Device::from(interface.as_str());
        let inactive = Capture::from_device(device)
            .map_err(|e| CaptureError::DeviceError(e.to_string()))?
            .snaplen(config.snaplen)
            .promisc(config.promiscuous)
            .timeout(config.timeout_ms);
        
        #[cfg(not(windows))]
        let inactive = if config.monitor_mode { inactive.rfmon(true) } else { inactive };
        #[cfg(windows)]
        if config.monitor_mode {
            log::warn!("Monitor mode cannot be requested through libpcap on this platform");
        }
        
        let mut active = inactive.open().map_err(Self::open_error)?;
        Self::select_link_type(&mut active)?;
        
        Self::from_capture(active.into(), interface, config.filter.as_deref(), true)
    }
    
    pub fn open_file(path: &Path, filter: Option<&str>) -> Result<Self, CaptureError> {
        log::info!("Reading frames from {}", path.display());
        
        let capture = Capture::from_file(path)
            .map_err(|e| CaptureError::DeviceError(format!("{}: {}", path.display(), e)))?;
        
        Self::from_capture(capture.into(), path.display().to_string(), filter, false)
    }
    
    pub fn list_devices() -> Result<Vec<Device>, CaptureError> {
        Device::list().map_err(|e| CaptureError::DeviceError(format!("Failed to list devices: {}", e)))
    }
    
    pub fn link_type(&self) -> LinkType {
        self.link
    }
    
    fn from_capture(
        mut capture: Capture<dyn Activated>,
        source: String,
        filter: Option<&str>,
        live: bool,
    ) -> Result<Self, CaptureError> {
        let datalink = capture.get_datalink();
        let link = LinkType::from_dlt(datalink.0)
            .ok_or(CaptureError::UnsupportedLinkType(datalink.0))?;
        
        if let Some(filter) = filter {
            capture.filter(filter, true)
                .map_err(|e| CaptureError::CaptureError(format!("Invalid filter '{}': {}", filter, e)))?;
            log::debug!("Applied capture filter: {}", filter);
        }
        
        log::info!("Capturing from {} with link type {}", source, link);
        
        Ok(Self {
            capture,
            link,
            source,
            live,
        })
    }
    
    /// Interfaces already in monitor mode often default to a non-radiotap
    /// link type; switch to one the decoder understands when offered.
    fn select_link_type(capture: &mut Capture<Active>) -> Result<(), CaptureError> {
        let current = capture.get_datalink();
        if LinkType::from_dlt(current.0).is_some() {
            return Ok(());
        }
        
        let offered = capture.list_datalinks().unwrap_or_default();
        let preferred = [LinkType::Radiotap, LinkType::Ieee80211]
            .into_iter()
            .map(|link| Linktype(link.dlt()))
            .find(|link| offered.contains(link));
        
        match preferred {
            Some(link) => {
                log::debug!("Switching link type from {} to {}", current.0, link.0);
                capture.set_datalink(link)
                    .map_err(|e| CaptureError::DeviceError(format!("Cannot set link type: {}", e)))
            }
            None => Err(CaptureError::UnsupportedLinkType(current.0)),
        }
    }
    
    fn open_error(error: pcap::Error) -> CaptureError {
        let message = error.to_string();
        let lower = message.to_lowercase();
        if lower.contains("permission") || lower.contains("not permitted") {
            CaptureError::InsufficientPrivileges
        } else {
            CaptureError::DeviceError(message)
        }
    }
}

impl FrameSource for PcapEngine {
    fn next_event(&mut self) -> Result<SourceEvent, CaptureError> {
        let link = self.link;
        match self.capture.next_packet() {
            Ok(packet) => {
                let length = packet.header.len as usize;
                match decode(link, packet.data) {
                    Some(frame) => Ok(SourceEvent::Frame { frame, length }),
                    None => Ok(SourceEvent::Undecodable { length }),
                }
            },
            Err(pcap::Error::TimeoutExpired) => Ok(SourceEvent::Idle),
            Err(pcap::Error::NoMorePackets) => Ok(SourceEvent::Closed),
            Err(e) => Err(CaptureError::CaptureError(format!("Packet capture error: {}", e))),
        }
    }
    
    fn dropped_frames(&mut self) -> Option<u32> {
        if !self.live {
            return None;
        }
        self.capture.stats().ok().map(|stat| stat.dropped)
    }
    
    fn describe(&self) -> String {
        self.source.clone()
    }
}
