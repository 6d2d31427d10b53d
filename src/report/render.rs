use serde::Serialize;
use std::io::Write;

use crate::analysis::{Ssid, Tally, TallySnapshot};
use crate::config::{ReportConfig, ReportFormat, SortOrder};

pub const BEACON_HEADER: &str = "Beacon SSID:";
pub const PROBE_HEADER: &str = "Probe SSID:";

#[derive(Debug, Serialize)]
struct JsonEntry {
    ssid: String,
    hidden: bool,
    count: u64,
}

#[derive(Debug, Serialize)]
struct JsonReport {
    beacon: Vec<JsonEntry>,
    probe: Vec<JsonEntry>,
}

/// Tally entries in the requested order.
pub fn sorted_entries(tally: &Tally, sort: SortOrder) -> Vec<(&Ssid, u64)> {
    let mut entries: Vec<_> = tally.iter().collect();
    match sort {
        SortOrder::Count => entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))),
        SortOrder::Name => entries.sort_by(|a, b| a.0.cmp(b.0)),
        SortOrder::Unsorted => {}
    }
    entries
}

fn push_section(out: &mut String, header: &str, tally: &Tally, sort: SortOrder) {
    out.push_str(header);
    out.push('\n');
    for (ssid, count) in sorted_entries(tally, sort) {
        out.push_str(&format!("{} ({})\n", ssid, count));
    }
}

/// Plain-text report: a `Beacon SSID:` section, a blank line, then a
/// `Probe SSID:` section, one `<ssid> (<count>)` line per SSID.
pub fn render_text(snapshot: &TallySnapshot, sort: SortOrder) -> String {
    let mut out = String::new();
    push_section(&mut out, BEACON_HEADER, &snapshot.beacon, sort);
    out.push('\n');
    push_section(&mut out, PROBE_HEADER, &snapshot.probe, sort);
    out
}

pub fn render_json(snapshot: &TallySnapshot, sort: SortOrder) -> Result<String, serde_json::Error> {
    let entries = |tally: &Tally| -> Vec<JsonEntry> {
        sorted_entries(tally, sort)
            .into_iter()
            .map(|(ssid, count)| JsonEntry {
                ssid: ssid.to_text(),
                hidden: ssid.is_hidden(),
                count,
            })
            .collect()
    };

    let report = JsonReport {
        beacon: entries(&snapshot.beacon),
        probe: entries(&snapshot.probe),
    };
    serde_json::to_string_pretty(&report)
}

pub fn render(snapshot: &TallySnapshot, config: &ReportConfig) -> Result<String, serde_json::Error> {
    match config.format {
        ReportFormat::Text => Ok(render_text(snapshot, config.sort)),
        ReportFormat::Json => render_json(snapshot, config.sort).map(|mut json| {
            json.push('\n');
            json
        }),
    }
}

pub fn write_report<W: Write>(
    writer: &mut W,
    snapshot: &TallySnapshot,
    config: &ReportConfig,
) -> anyhow::Result<()> {
    let report = render(snapshot, config)?;
    writer.write_all(report.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Aggregator, FrameClass};

    fn snapshot() -> TallySnapshot {
        let mut aggregator = Aggregator::new();
        for ssid in ["Cafe", "Cafe", "Airport", ""] {
            aggregator.record(FrameClass::Beacon, Some(Ssid::from(ssid)));
        }
        aggregator.record(FrameClass::ProbeRequest, Some(Ssid::from("Cafe")));
        aggregator.snapshot()
    }

    #[test]
    fn test_text_report_layout() {
        let text = render_text(&snapshot(), SortOrder::Count);
        assert_eq!(
            text,
            "Beacon SSID:\nCafe (2)\n (1)\nAirport (1)\n\nProbe SSID:\nCafe (1)\n"
        );
    }

    #[test]
    fn test_text_report_sorted_by_name() {
        let text = render_text(&snapshot(), SortOrder::Name);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[..4], &["Beacon SSID:", " (1)", "Airport (1)", "Cafe (2)"]);
    }

    #[test]
    fn test_unsorted_report_has_every_line() {
        let text = render_text(&snapshot(), SortOrder::Unsorted);
        assert!(text.starts_with("Beacon SSID:\n"));
        assert!(text.contains("Cafe (2)\n"));
        assert!(text.contains("Airport (1)\n"));
        assert!(text.contains("\nProbe SSID:\nCafe (1)\n"));
    }

    #[test]
    fn test_empty_report() {
        let text = render_text(&TallySnapshot::default(), SortOrder::Count);
        assert_eq!(text, "Beacon SSID:\n\nProbe SSID:\n");
    }

    #[test]
    fn test_json_report() {
        let json = render_json(&snapshot(), SortOrder::Count).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["beacon"][0]["ssid"], "Cafe");
        assert_eq!(value["beacon"][0]["count"], 2);
        assert_eq!(value["beacon"][1]["hidden"], true);
        assert_eq!(value["probe"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_write_report() {
        let mut out = Vec::new();
        let config = ReportConfig::default();
        write_report(&mut out, &snapshot(), &config).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Probe SSID:"));
    }
}
