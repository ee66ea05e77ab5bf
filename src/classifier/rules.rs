//! Detection rules.

use crate::domain::{DecodedFrame, DecodedView, Frame, Ipv4TcpView, Signal};

/// Destination port the blacklist rule watches.
const HTTP_PORT: u16 = 80;

/// Host the blacklist rule matches by default.
const DEFAULT_BLACKLIST_HOST: &str = "www.bbc.co.uk";

/// Evaluates the detection rules over one decoded frame.
///
/// Stateless across frames; all state lives in the counters.
pub struct Classifier {
    blacklist_needle: Vec<u8>,
}

impl Classifier {
    /// Create a classifier with the default blacklist host.
    pub fn new() -> Self {
        Self::with_blacklist_host(DEFAULT_BLACKLIST_HOST)
    }

    /// Create a classifier matching requests for the given host.
    pub fn with_blacklist_host(host: &str) -> Self {
        Self {
            blacklist_needle: format!("Host: {}", host).into_bytes(),
        }
    }

    /// Evaluate every rule against a decoded frame.
    ///
    /// Returns zero or more signals; a single frame can match both the
    /// Xmas-scan and blacklist rules.
    pub fn classify(&self, frame: &Frame, decoded: &DecodedFrame) -> Vec<Signal> {
        let mut signals = Vec::new();

        match &decoded.inner {
            DecodedView::Arp(arp) => {
                // Every reply is flagged, solicited or not. A known
                // heuristic limitation of the rule.
                if arp.is_reply() {
                    signals.push(Signal::ArpResponse);
                }
            }
            DecodedView::Ipv4Tcp(tcp) => {
                if tcp.flags.urg && tcp.flags.psh && tcp.flags.fin {
                    signals.push(Signal::XmasScan);
                }
                if tcp.dst_port == HTTP_PORT && self.payload_matches(frame, tcp) {
                    signals.push(Signal::BlacklistHit);
                }
            }
            DecodedView::Unrecognized => {}
        }

        signals
    }

    /// Search the TCP payload for the blacklist needle.
    ///
    /// The search is bounded by the captured bytes; payloads are not
    /// text, so there is no terminator to seek.
    fn payload_matches(&self, frame: &Frame, view: &Ipv4TcpView) -> bool {
        let payload = frame
            .captured()
            .get(view.payload_offset..)
            .unwrap_or_default();
        contains(payload, &self.blacklist_needle)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::FrameDecoder;
    use crate::domain::{FrameMetadata, ETHERTYPE_ARP, ETHERTYPE_IPV4};

    fn frame_from(bytes: &[u8]) -> Frame {
        let metadata = FrameMetadata {
            capture_len: bytes.len() as u32,
            wire_len: bytes.len() as u32,
            timestamp_secs: 0,
            timestamp_micros: 0,
        };
        Frame::copied_from(metadata, bytes).unwrap()
    }

    fn classify(classifier: &Classifier, bytes: &[u8]) -> Vec<Signal> {
        let frame = frame_from(bytes);
        let decoded = FrameDecoder::new().decode(&frame).unwrap();
        classifier.classify(&frame, &decoded)
    }

    fn arp_frame(operation: u16) -> Vec<u8> {
        let mut buf = vec![0u8; 12];
        buf.extend_from_slice(&ETHERTYPE_ARP.to_be_bytes());
        buf.extend_from_slice(&[0u8; 20]); // hardware + protocol addresses
        buf.extend_from_slice(&operation.to_be_bytes());
        buf
    }

    fn tcp_frame(dst_port: u16, flag_bits: u8, payload: &[u8]) -> Vec<u8> {
        let mut buf = vec![0u8; 12];
        buf.extend_from_slice(&ETHERTYPE_IPV4.to_be_bytes());

        let mut ip = [0u8; 20];
        ip[0] = 0x45;
        buf.extend_from_slice(&ip);

        let mut tcp = [0u8; 20];
        tcp[2..4].copy_from_slice(&dst_port.to_be_bytes());
        tcp[12] = 5 << 4;
        tcp[13] = flag_bits;
        buf.extend_from_slice(&tcp);

        buf.extend_from_slice(payload);
        buf
    }

    const XMAS: u8 = 0x20 | 0x08 | 0x01; // URG | PSH | FIN

    #[test]
    fn xmas_scan_fires_on_all_three_flags() {
        let classifier = Classifier::new();
        let signals = classify(&classifier, &tcp_frame(443, XMAS, &[]));
        assert_eq!(signals, vec![Signal::XmasScan]);
    }

    #[test]
    fn xmas_scan_requires_every_flag() {
        let classifier = Classifier::new();
        for bits in [0x01u8, 0x08, 0x20, 0x09, 0x21, 0x28] {
            let signals = classify(&classifier, &tcp_frame(443, bits, &[]));
            assert!(signals.is_empty(), "flags {:#04x} should not fire", bits);
        }
    }

    #[test]
    fn xmas_scan_ignores_other_fields() {
        let classifier = Classifier::new();
        // SYN and ACK set alongside the three does not matter
        let signals = classify(&classifier, &tcp_frame(22, XMAS | 0x12, b"payload"));
        assert_eq!(signals, vec![Signal::XmasScan]);
    }

    #[test]
    fn arp_reply_fires() {
        let classifier = Classifier::new();
        let signals = classify(&classifier, &arp_frame(2));
        assert_eq!(signals, vec![Signal::ArpResponse]);
    }

    #[test]
    fn arp_request_does_not_fire() {
        let classifier = Classifier::new();
        let signals = classify(&classifier, &arp_frame(1));
        assert!(signals.is_empty());
    }

    #[test]
    fn blacklist_hit_on_port_80() {
        let classifier = Classifier::new();
        let payload = b"GET / HTTP/1.1\r\nHost: www.bbc.co.uk\r\n\r\n";
        let signals = classify(&classifier, &tcp_frame(80, 0x18, payload));
        assert_eq!(signals, vec![Signal::BlacklistHit]);
    }

    #[test]
    fn other_host_does_not_fire() {
        let classifier = Classifier::new();
        let payload = b"GET / HTTP/1.1\r\nHost: www.other.com\r\n\r\n";
        let signals = classify(&classifier, &tcp_frame(80, 0x18, payload));
        assert!(signals.is_empty());
    }

    #[test]
    fn blacklist_requires_port_80() {
        let classifier = Classifier::new();
        let payload = b"Host: www.bbc.co.uk";
        let signals = classify(&classifier, &tcp_frame(8080, 0x18, payload));
        assert!(signals.is_empty());
    }

    #[test]
    fn needle_split_by_capture_boundary_does_not_fire() {
        let classifier = Classifier::new();
        // Capture cuts the needle short; the bounded search must not
        // run past the captured bytes.
        let mut bytes = tcp_frame(80, 0x18, b"Host: www.bbc.co.uk");
        bytes.truncate(bytes.len() - 3);
        let signals = classify(&classifier, &bytes);
        assert!(signals.is_empty());
    }

    #[test]
    fn xmas_and_blacklist_can_both_fire() {
        let classifier = Classifier::new();
        let payload = b"Host: www.bbc.co.uk";
        let signals = classify(&classifier, &tcp_frame(80, XMAS, payload));
        assert_eq!(signals, vec![Signal::XmasScan, Signal::BlacklistHit]);
    }

    #[test]
    fn custom_blacklist_host() {
        let classifier = Classifier::with_blacklist_host("evil.example");
        let signals = classify(&classifier, &tcp_frame(80, 0, b"Host: evil.example\r\n"));
        assert_eq!(signals, vec![Signal::BlacklistHit]);

        let signals = classify(&classifier, &tcp_frame(80, 0, b"Host: www.bbc.co.uk\r\n"));
        assert!(signals.is_empty());
    }

    #[test]
    fn payload_offset_past_capture_is_empty_payload() {
        let classifier = Classifier::new();
        // Data offset claims a 60-byte TCP header but the capture ends
        // right after the 20 bytes present.
        let mut bytes = tcp_frame(80, 0, b"Host: www.bbc.co.uk");
        bytes[14 + 20 + 12] = 15 << 4;
        let signals = classify(&classifier, &bytes);
        assert!(signals.is_empty());
    }
}
