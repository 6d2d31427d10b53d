use anyhow::Context;
use clap::Parser;
use ssid_counter::{
    capture::{FrameSource, PcapEngine},
    config::{Config, ReportFormat, SortOrder},
    formatting::truncate_string,
    report::write_report,
    runtime::{Monitor, ShutdownFlag, StopReason},
    Result,
};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ssid-counter")]
#[command(version, about = "Count SSIDs seen in 802.11 beacon and probe-request frames")]
struct Cli {
    #[arg(short, long, help = "Wireless interface to capture from (monitor mode)")]
    interface: Option<String>,
    
    #[arg(short, long, conflicts_with = "interface", help = "Replay frames from a pcap file")]
    read: Option<PathBuf>,
    
    #[arg(short, long, help = "Configuration file path")]
    config: Option<PathBuf>,
    
    #[arg(short, long, help = "Maximum bytes captured per frame")]
    snaplen: Option<i32>,
    
    #[arg(short, long, help = "Enable promiscuous mode")]
    promiscuous: bool,
    
    #[arg(short, long, help = "Ask libpcap to enable monitor (rfmon) mode")]
    monitor: bool,
    
    #[arg(short, long, help = "BPF capture filter, e.g. \"type mgt\"")]
    filter: Option<String>,
    
    #[arg(long, value_enum, help = "Report format")]
    format: Option<ReportFormat>,
    
    #[arg(long, value_enum, help = "Order of SSID lines in the report")]
    sort: Option<SortOrder>,
    
    #[arg(long, help = "List capture devices and exit")]
    list_devices: bool,
    
    #[arg(short, long, help = "Enable debug logging")]
    debug: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(interface) = &self.interface {
            config.capture.interface = Some(interface.clone());
            config.capture.read_file = None;
        }
        if let Some(path) = &self.read {
            config.capture.read_file = Some(path.clone());
            config.capture.interface = None;
        }
        if let Some(snaplen) = self.snaplen {
            config.capture.snaplen = snaplen;
        }
        if self.promiscuous {
            config.capture.promiscuous = true;
        }
        if self.monitor {
            config.capture.monitor_mode = true;
        }
        if let Some(filter) = &self.filter {
            config.capture.filter = Some(filter.clone());
        }
        if let Some(format) = self.format {
            config.report.format = format;
        }
        if let Some(sort) = self.sort {
            config.report.sort = sort;
        }
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .init();
}

fn list_devices() -> Result<()> {
    let devices = PcapEngine::list_devices()?;
    if devices.is_empty() {
        eprintln!("Warning: No capture devices found");
    }
    for device in devices {
        match device.desc {
            Some(desc) => println!("{}\t{}", device.name, truncate_string(&desc, 60)),
            None => println!("{}", device.name),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    
    if cli.list_devices {
        return list_devices();
    }
    
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    cli.apply(&mut config);
    config.validate()?;
    
    let mut engine = PcapEngine::open(&config.capture).context("Failed to open capture source")?;
    
    let shutdown = match ShutdownFlag::install() {
        Ok(flag) => flag,
        Err(e) => {
            log::warn!("Could not install Ctrl-C handler: {}", e);
            ShutdownFlag::manual()
        }
    };
    
    if config.capture.read_file.is_none() {
        eprintln!("Capturing on {}. Press Ctrl-C to stop and print the counts.", engine.describe());
        if config.capture.timeout_ms == 0 {
            log::warn!("Reads block until the next frame; press Ctrl-C twice to quit without a report");
        }
    }
    
    let mut monitor = Monitor::new();
    let reason = monitor.run(&mut engine, &shutdown);
    
    let stdout = io::stdout();
    write_report(&mut stdout.lock(), &monitor.snapshot(), &config.report)?;
    
    if let StopReason::SourceError(e) = reason {
        log::warn!("Report covers frames read before the capture failed: {}", e);
    }
    
    Ok(())
}
