//! Typed views over decoded protocol headers.
//!
//! A view is derived from one frame by the decoder, lives for one
//! classification pass and is never mutated.

use std::net::Ipv4Addr;

use macaddr::MacAddr6;

/// Ethernet type selecting the IPv4 path.
pub const ETHERTYPE_IPV4: u16 = 0x0800;
/// Ethernet type selecting the ARP path.
pub const ETHERTYPE_ARP: u16 = 0x0806;

/// ARP operation code for a request.
pub const ARP_OP_REQUEST: u16 = 1;
/// ARP operation code for a reply.
pub const ARP_OP_REPLY: u16 = 2;

/// Fields of the 14-byte Ethernet header.
#[derive(Debug, Clone, Copy)]
pub struct EthernetView {
    pub dst_mac: MacAddr6,
    pub src_mac: MacAddr6,
    pub ethertype: u16,
}

/// Fields read from the ARP body following the Ethernet header.
#[derive(Debug, Clone, Copy)]
pub struct ArpView {
    pub sender_hw: MacAddr6,
    pub target_hw: MacAddr6,
    pub sender_proto: Ipv4Addr,
    pub target_proto: Ipv4Addr,
    pub operation: u16,
}

impl ArpView {
    /// Returns true if this is an ARP reply.
    pub fn is_reply(&self) -> bool {
        self.operation == ARP_OP_REPLY
    }
}

/// The TCP control bits the detection rules look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpFlags {
    pub urg: bool,
    pub psh: bool,
    pub fin: bool,
}

/// Fields read from the IPv4 and TCP headers.
#[derive(Debug, Clone, Copy)]
pub struct Ipv4TcpView {
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
    /// IPv4 header length in 4-byte words
    pub ihl: u8,
    pub src_port: u16,
    pub dst_port: u16,
    pub flags: TcpFlags,
    /// TCP header length in 4-byte words
    pub data_offset: u8,
    /// Byte offset of the TCP payload within the frame
    pub payload_offset: usize,
}

/// The protocol branch a frame decoded into.
#[derive(Debug, Clone, Copy)]
pub enum DecodedView {
    Arp(ArpView),
    Ipv4Tcp(Ipv4TcpView),
    /// Ethernet type other than ARP or IPv4; not classified, not
    /// counted.
    Unrecognized,
}

/// A fully decoded frame: the Ethernet header plus whatever the
/// ethertype selected.
#[derive(Debug, Clone, Copy)]
pub struct DecodedFrame {
    pub ethernet: EthernetView,
    pub inner: DecodedView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arp_reply_detection() {
        let view = ArpView {
            sender_hw: MacAddr6::new(0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff),
            target_hw: MacAddr6::new(0x11, 0x22, 0x33, 0x44, 0x55, 0x66),
            sender_proto: Ipv4Addr::new(192, 168, 1, 50),
            target_proto: Ipv4Addr::new(192, 168, 1, 1),
            operation: ARP_OP_REPLY,
        };
        assert!(view.is_reply());

        let request = ArpView {
            operation: ARP_OP_REQUEST,
            ..view
        };
        assert!(!request.is_reply());
    }
}
