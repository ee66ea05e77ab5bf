use std::fmt;

use thiserror::Error;

/// Errors opening or reading a capture source.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("failed to create capture channel: {0}")]
    ChannelCreation(String),

    #[error("insufficient permissions to capture packets (try running as root)")]
    InsufficientPermissions,
}

/// Error constructing a frame from a capture buffer.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("capture buffer too short: capture length {capture_len}, got {actual} bytes")]
    ShortBuffer { capture_len: usize, actual: usize },
}

/// The protocol layers the decoder walks, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Ethernet,
    Arp,
    Ipv4,
    Tcp,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ethernet => write!(f, "Ethernet"),
            Self::Arp => write!(f, "ARP"),
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Tcp => write!(f, "TCP"),
        }
    }
}

/// Errors decoding a captured frame.
///
/// Never fatal: a truncated frame abandons analysis at the layer where
/// the bytes ran out.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{layer} header truncated: need {needed} bytes, captured {captured}")]
    Truncated {
        layer: Layer,
        needed: usize,
        captured: usize,
    },
}

impl DecodeError {
    /// The layer at which decoding stopped.
    pub fn layer(&self) -> Layer {
        match self {
            Self::Truncated { layer, .. } => *layer,
        }
    }
}
