use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jerat::capture::{PacketCapture, PnetCapture};
use jerat::dispatch::{DEFAULT_QUEUE_CAPACITY, DEFAULT_WORKERS};
use jerat::reporter::{ConsoleReporter, ReportSink};
use jerat::{Classifier, Counters, Dispatcher};

#[derive(Parser)]
#[command(name = "jerat")]
#[command(about = "Network intrusion detection monitor")]
struct Cli {
    /// Interface to capture on (default: first suitable interface)
    #[arg(short, long)]
    interface: Option<String>,

    /// Print the parsed fields of every decoded layer
    #[arg(short, long)]
    verbose: bool,

    /// Number of analysis workers
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Work queue capacity; a full queue blocks capture until the
    /// analysis pool catches up
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    queue_capacity: usize,

    /// HTTP host to treat as blacklisted in port-80 payloads
    #[arg(long, default_value = "www.bbc.co.uk")]
    blacklist_host: String,

    /// List available network interfaces and exit
    #[arg(long)]
    list_interfaces: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "jerat=debug" } else { "jerat=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.list_interfaces {
        for line in PnetCapture::list_interfaces() {
            println!("{}", line);
        }
        return Ok(());
    }

    let mut capture = match &cli.interface {
        Some(name) => PnetCapture::new(name)?,
        None => PnetCapture::on_default_interface()?,
    };

    let counters = Arc::new(Counters::new());
    let classifier = Classifier::with_blacklist_host(&cli.blacklist_host);
    let dispatcher = Dispatcher::new(Arc::clone(&counters), classifier, cli.verbose)
        .with_workers(cli.workers)
        .with_queue_capacity(cli.queue_capacity);

    // SIGINT prints the report and exits; in-flight frames are not
    // drained.
    let report_counters = Arc::clone(&counters);
    ctrlc::set_handler(move || {
        ConsoleReporter::new().report(&report_counters.snapshot());
        process::exit(0);
    })
    .context("failed to install SIGINT handler")?;

    let reporter = ConsoleReporter::new();
    reporter.on_start(capture.interface_name());
    tracing::info!(interface = capture.interface_name(), "capture started");

    for frame in capture.capture_frames()? {
        dispatcher.submit_frame(frame);
    }

    Ok(())
}
