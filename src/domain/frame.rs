//! Captured frame model.

use crate::error::FrameError;

/// Capture metadata for a single frame, as reported by the capture
/// source.
#[derive(Debug, Clone, Copy)]
pub struct FrameMetadata {
    /// Number of bytes actually captured
    pub capture_len: u32,
    /// Length of the frame on the wire (may exceed `capture_len`)
    pub wire_len: u32,
    /// Capture timestamp, whole seconds since the epoch
    pub timestamp_secs: i64,
    /// Microsecond part of the capture timestamp
    pub timestamp_micros: u32,
}

/// A captured link-layer frame: metadata plus an owned copy of the
/// captured bytes.
///
/// The buffer is copied at construction, so the capture source may
/// reuse its own buffer as soon as the constructor returns. Only the
/// first `capture_len` bytes are retained; decoding never sees more.
#[derive(Debug, Clone)]
pub struct Frame {
    metadata: FrameMetadata,
    bytes: Vec<u8>,
}

impl Frame {
    /// Copy a raw capture buffer into an owned frame.
    ///
    /// Fails if the buffer holds fewer than `metadata.capture_len`
    /// bytes.
    pub fn copied_from(metadata: FrameMetadata, raw: &[u8]) -> Result<Self, FrameError> {
        let capture_len = metadata.capture_len as usize;
        if raw.len() < capture_len {
            return Err(FrameError::ShortBuffer {
                capture_len,
                actual: raw.len(),
            });
        }

        Ok(Self {
            metadata,
            bytes: raw[..capture_len].to_vec(),
        })
    }

    pub fn metadata(&self) -> &FrameMetadata {
        &self.metadata
    }

    /// The captured bytes, exactly `capture_len` long.
    pub fn captured(&self) -> &[u8] {
        &self.bytes
    }
}
