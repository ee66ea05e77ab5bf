//! Console report output.

use std::io::{self, Write};

use crate::counters::Totals;
use crate::reporter::ReportSink;

/// Prints the intrusion-detection report to stdout.
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    fn format_report(totals: &Totals) -> String {
        format!(
            "\nIntrusion Detection Report:\n \
             {} Xmas Scans (host fingerprinting)\n \
             {} ARP responses (cache poisoning)\n \
             {} URL Blacklist violations\n \
             {} Packet(s) Sniffed\n",
            totals.xmas_scans, totals.arp_responses, totals.blacklist_hits, totals.frames_seen
        )
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for ConsoleReporter {
    fn report(&self, totals: &Totals) {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{}", Self::format_report(totals));
        let _ = stdout.flush();
    }

    fn on_start(&self, interface: &str) {
        println!("Monitoring interface: {}", interface);
        println!("Press Ctrl+C for the intrusion report.\n");
    }
}
