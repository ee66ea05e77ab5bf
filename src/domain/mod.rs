//! Domain models for frame analysis.
//!
//! Core value types shared by the pipeline, independent of capture
//! and reporting concerns.

mod decoded;
mod events;
mod frame;

pub use decoded::{
    ArpView, DecodedFrame, DecodedView, EthernetView, Ipv4TcpView, TcpFlags, ARP_OP_REPLY,
    ARP_OP_REQUEST, ETHERTYPE_ARP, ETHERTYPE_IPV4,
};
pub use events::Signal;
pub use frame::{Frame, FrameMetadata};
