pub mod render;

pub use render::{render, render_json, render_text, sorted_entries, write_report};
