//! Report output.
//!
//! Defines the `ReportSink` trait (ISP, DIP) and the console
//! implementation, plus the verbose per-layer frame dumps.

mod console_reporter;
pub mod frame_dump;

pub use console_reporter::ConsoleReporter;

use crate::counters::Totals;

/// Sink for the termination report and lifecycle messages.
///
/// Intentionally minimal: it only renders, it does not read or reset
/// the counters. Implementations can target the console, files,
/// syslog, etc.
pub trait ReportSink: Send {
    /// Emit the intrusion-detection report.
    fn report(&self, totals: &Totals);

    /// Called when capture starts.
    fn on_start(&self, interface: &str);
}
