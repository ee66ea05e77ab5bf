//! Detection signals.

use std::fmt;

/// A signal emitted by classifying one frame.
///
/// Each emitted signal maps to exactly one counter increment. A single
/// frame can emit more than one signal (an Xmas probe to port 80 with
/// a blacklisted host in its payload fires two).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// TCP probe with URG, PSH and FIN all set
    XmasScan,
    /// ARP reply, treated as a cache-poisoning indicator
    ArpResponse,
    /// Port-80 request naming a blacklisted host
    BlacklistHit,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::XmasScan => write!(f, "xmas-scan"),
            Self::ArpResponse => write!(f, "arp-response"),
            Self::BlacklistHit => write!(f, "blacklist-hit"),
        }
    }
}
