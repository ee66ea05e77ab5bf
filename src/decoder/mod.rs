//! Frame decoding module.
//!
//! Responsible for turning raw captured bytes into typed header views
//! (SRP); detection rules live elsewhere.

mod frame_decoder;

pub use frame_decoder::FrameDecoder;
