pub mod settings;

pub use settings::{CaptureConfig, Config, ConfigError, ReportConfig, ReportFormat, SortOrder};
