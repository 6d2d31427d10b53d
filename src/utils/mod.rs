pub mod formatting;

pub use formatting::{format_bytes, format_count, format_duration, truncate_string};
