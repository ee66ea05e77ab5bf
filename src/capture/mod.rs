//! Packet capture abstraction.
//!
//! This module defines the `PacketCapture` trait (DIP) and provides
//! a pnet-based implementation. This allows for easy testing and
//! swapping implementations (OCP).

mod pnet_capture;

pub use pnet_capture::PnetCapture;

use crate::domain::Frame;
use crate::error::CaptureError;

/// Trait for packet capture implementations (Dependency Inversion
/// Principle).
///
/// The dispatcher depends on this abstraction rather than a concrete
/// backend, making it easy to:
/// - Drive the pipeline from synthetic frames in tests
/// - Switch capture backends (pnet, pcap, file replay)
pub trait PacketCapture: Send {
    /// Start capturing and return an iterator over owned frames.
    ///
    /// Every link-layer frame is yielded; classification decides what
    /// matters.
    fn capture_frames(&mut self) -> Result<Box<dyn Iterator<Item = Frame> + '_>, CaptureError>;

    /// Get the name of the interface being captured.
    fn interface_name(&self) -> &str;
}
