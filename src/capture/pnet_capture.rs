//! pnet-based packet capture implementation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use pnet::datalink::{self, Channel, Config, NetworkInterface};

use super::PacketCapture;
use crate::domain::{Frame, FrameMetadata};
use crate::error::CaptureError;

/// Packet capture using the pnet library.
pub struct PnetCapture {
    interface: NetworkInterface,
}

impl PnetCapture {
    /// Create a new capture on the specified interface.
    pub fn new(interface_name: &str) -> Result<Self, CaptureError> {
        let interface = datalink::interfaces()
            .into_iter()
            .find(|iface| iface.name == interface_name)
            .ok_or_else(|| CaptureError::InterfaceNotFound(interface_name.to_string()))?;

        Ok(Self { interface })
    }

    /// Create a capture on the first suitable interface.
    ///
    /// Looks for an interface that is up and not a loopback.
    pub fn on_default_interface() -> Result<Self, CaptureError> {
        let interface = datalink::interfaces()
            .into_iter()
            .find(|iface| iface.is_up() && !iface.is_loopback() && !iface.ips.is_empty())
            .ok_or_else(|| {
                CaptureError::InterfaceNotFound("no suitable interface found".to_string())
            })?;

        Ok(Self { interface })
    }

    /// List all available network interfaces.
    pub fn list_interfaces() -> Vec<String> {
        datalink::interfaces()
            .into_iter()
            .map(|iface| {
                let status = if iface.is_up() { "UP" } else { "DOWN" };
                let ips: Vec<_> = iface.ips.iter().map(|ip| ip.to_string()).collect();
                format!(
                    "{}: {} [{}]",
                    iface.name,
                    status,
                    if ips.is_empty() {
                        "no IP".to_string()
                    } else {
                        ips.join(", ")
                    }
                )
            })
            .collect()
    }
}

impl PacketCapture for PnetCapture {
    fn capture_frames(&mut self) -> Result<Box<dyn Iterator<Item = Frame> + '_>, CaptureError> {
        let config = Config {
            read_timeout: Some(Duration::from_millis(100)),
            ..Config::default()
        };

        let (_tx, rx) = match datalink::channel(&self.interface, config) {
            Ok(Channel::Ethernet(tx, rx)) => (tx, rx),
            Ok(_) => {
                return Err(CaptureError::ChannelCreation(
                    "unsupported channel type".to_string(),
                ))
            }
            Err(e) => {
                let msg = e.to_string();
                if msg.contains("permission") || msg.contains("Operation not permitted") {
                    return Err(CaptureError::InsufficientPermissions);
                }
                return Err(CaptureError::ChannelCreation(msg));
            }
        };

        Ok(Box::new(FrameIterator { rx }))
    }

    fn interface_name(&self) -> &str {
        &self.interface.name
    }
}

/// Iterator that yields captured frames from the network.
struct FrameIterator {
    rx: Box<dyn datalink::DataLinkReceiver>,
}

impl Iterator for FrameIterator {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.rx.next() {
                Ok(packet) => match Frame::copied_from(metadata_for(packet.len()), packet) {
                    Ok(frame) => return Some(frame),
                    Err(e) => {
                        tracing::debug!("discarding frame: {}", e);
                        continue;
                    }
                },
                Err(e) => {
                    // Timeout is expected, continue
                    if e.kind() == std::io::ErrorKind::TimedOut {
                        continue;
                    }
                    // For other errors, log and continue
                    tracing::debug!("capture error: {}", e);
                    continue;
                }
            }
        }
    }
}

/// The datalink channel hands over complete frames, so the captured
/// and wire lengths coincide and the timestamp is taken at receipt.
fn metadata_for(len: usize) -> FrameMetadata {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    FrameMetadata {
        capture_len: len as u32,
        wire_len: len as u32,
        timestamp_secs: now.as_secs() as i64,
        timestamp_micros: now.subsec_micros(),
    }
}
