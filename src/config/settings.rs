use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_SNAPLEN: i32 = 1024;
pub const DEFAULT_TIMEOUT_MS: i32 = 1000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    
    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    
    #[error("No capture source configured. Pass --interface <name> or --read <file>")]
    NoSource,
    
    #[error("Both an interface ({0}) and a capture file ({1}) are configured; pick one")]
    ConflictingSources(String, String),
    
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Live capture device, e.g. `wlan0mon`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    /// Recorded pcap file to replay instead of a live device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_file: Option<PathBuf>,
    /// Bytes kept per frame; longer frames are truncated by libpcap.
    pub snaplen: i32,
    pub promiscuous: bool,
    /// Ask libpcap to put the device into monitor (rfmon) mode.
    pub monitor_mode: bool,
    /// Read timeout. 0 blocks until the next frame, which also delays
    /// noticing Ctrl-C until a frame arrives.
    pub timeout_ms: i32,
    /// BPF filter applied to the capture handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Highest count first, ties broken by name.
    #[default]
    Count,
    /// Bytewise SSID order.
    Name,
    /// Whatever order the tally yields.
    #[serde(rename = "none")]
    #[value(name = "none")]
    Unsorted,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            interface: None,
            read_file: None,
            snaplen: DEFAULT_SNAPLEN,
            promiscuous: false,
            monitor_mode: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            filter: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
    
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
    
    pub fn validate(&self) -> Result<(), ConfigError> {
        let capture = &self.capture;
        
        match (&capture.interface, &capture.read_file) {
            (None, None) => return Err(ConfigError::NoSource),
            (Some(interface), Some(file)) => {
                return Err(ConfigError::ConflictingSources(
                    interface.clone(),
                    file.display().to_string(),
                ));
            }
            (Some(interface), None) if interface.trim().is_empty() => {
                return Err(ConfigError::Invalid("interface name is empty".to_string()));
            }
            _ => {}
        }
        
        if capture.snaplen <= 0 {
            return Err(ConfigError::Invalid(format!(
                "snaplen must be positive, got {}",
                capture.snaplen
            )));
        }
        
        if capture.timeout_ms < 0 {
            return Err(ConfigError::Invalid(format!(
                "timeout_ms must not be negative, got {}",
                capture.timeout_ms
            )));
        }
        
        if let Some(filter) = &capture.filter {
            if filter.trim().is_empty() {
                return Err(ConfigError::Invalid("capture filter is empty".to_string()));
            }
        }
        
        Ok(())
    }
}
