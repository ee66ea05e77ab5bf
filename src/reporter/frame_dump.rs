//! Verbose per-layer field dumps.
//!
//! Diagnostic output only; the counted-signal contract does not
//! depend on anything printed here.

use std::fmt::Write as _;
use std::io::Write as _;

use crate::domain::{DecodedFrame, DecodedView, Frame};

/// Render the parsed fields of every decoded layer.
pub fn render(frame: &Frame, decoded: &DecodedFrame) -> String {
    let mut out = String::new();
    let meta = frame.metadata();

    let _ = writeln!(out, "Capture Header:");
    let _ = writeln!(out, "  Portion length: {}", meta.capture_len);
    let _ = writeln!(out, "  Packet length: {}", meta.wire_len);
    let _ = writeln!(
        out,
        "  Timestamp: {}.{:06}s",
        meta.timestamp_secs, meta.timestamp_micros
    );

    let eth = &decoded.ethernet;
    let _ = writeln!(out, "Ethernet Header:");
    let _ = writeln!(out, "  Type: {:#06x}", eth.ethertype);
    let _ = writeln!(out, "  Source MAC: {}", eth.src_mac);
    let _ = writeln!(out, "  Destination MAC: {}", eth.dst_mac);

    match &decoded.inner {
        DecodedView::Arp(arp) => {
            let _ = writeln!(out, "ARP Header:");
            let _ = writeln!(out, "  Sender Hardware Address: {}", arp.sender_hw);
            let _ = writeln!(out, "  Target Hardware Address: {}", arp.target_hw);
            let _ = writeln!(out, "  Sender Protocol Address: {}", arp.sender_proto);
            let _ = writeln!(out, "  Target Protocol Address: {}", arp.target_proto);
            let _ = writeln!(out, "  Operation: {}", arp.operation);
        }
        DecodedView::Ipv4Tcp(tcp) => {
            let _ = writeln!(out, "IP Header:");
            let _ = writeln!(out, "  Source Address: {}", tcp.src_addr);
            let _ = writeln!(out, "  Destination Address: {}", tcp.dst_addr);
            let _ = writeln!(out, "  Header Length: {} bytes", 4 * tcp.ihl as usize);
            let _ = writeln!(out, "TCP Header:");
            let _ = writeln!(out, "  Source Port: {}", tcp.src_port);
            let _ = writeln!(out, "  Destination Port: {}", tcp.dst_port);
            let _ = writeln!(out, "  Urgent Flag: {}", tcp.flags.urg as u8);
            let _ = writeln!(out, "  Push Flag: {}", tcp.flags.psh as u8);
            let _ = writeln!(out, "  Finish Flag: {}", tcp.flags.fin as u8);
            let _ = writeln!(
                out,
                "  Header Length: {} bytes",
                4 * tcp.data_offset as usize
            );
        }
        DecodedView::Unrecognized => {
            let _ = writeln!(out, "  (unrecognized ethertype)");
        }
    }

    out
}

/// Print the dump as one locked write, so frames from different
/// workers do not interleave.
pub fn print(frame: &Frame, decoded: &DecodedFrame) {
    let rendered = render(frame, decoded);
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{}", rendered);
}
