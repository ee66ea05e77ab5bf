//! Layered frame decoder.
//!
//! Walks Ethernet -> {ARP | IPv4 -> TCP} using the declared
//! header-length fields. Every field read is bounds-checked against
//! the captured prefix before access; running out of bytes yields a
//! `DecodeError::Truncated` for that layer, never an out-of-range
//! read.

use std::net::Ipv4Addr;

use macaddr::MacAddr6;

use crate::domain::{
    ArpView, DecodedFrame, DecodedView, EthernetView, Frame, Ipv4TcpView, TcpFlags, ETHERTYPE_ARP,
    ETHERTYPE_IPV4,
};
use crate::error::{DecodeError, Layer};

/// Ethernet header: two 6-byte MACs plus the 2-byte type field.
const ETHERNET_HEADER_LEN: usize = 14;

/// ARP body: sender and target hardware addresses (6 bytes each),
/// sender and target protocol addresses (4 bytes each), 2-byte
/// operation code.
const ARP_BODY_LEN: usize = 22;

/// IPv4 source/destination addresses sit at fixed offsets 12..20
/// within the header.
const IPV4_FIXED_FIELDS_LEN: usize = 20;

/// TCP fields of interest end at the flags byte (offset 13).
const TCP_FIXED_FIELDS_LEN: usize = 14;

const TCP_FLAG_FIN: u8 = 0x01;
const TCP_FLAG_PSH: u8 = 0x08;
const TCP_FLAG_URG: u8 = 0x20;

/// Stateless decoder for captured frames.
pub struct FrameDecoder;

impl FrameDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode a frame down to the deepest layer the rules need.
    ///
    /// An ethertype other than ARP or IPv4 yields
    /// `DecodedView::Unrecognized` rather than an error.
    pub fn decode(&self, frame: &Frame) -> Result<DecodedFrame, DecodeError> {
        let data = frame.captured();
        let ethernet = self.decode_ethernet(data)?;

        let inner = match ethernet.ethertype {
            ETHERTYPE_ARP => DecodedView::Arp(self.decode_arp(data)?),
            ETHERTYPE_IPV4 => DecodedView::Ipv4Tcp(self.decode_ipv4_tcp(data)?),
            _ => DecodedView::Unrecognized,
        };

        Ok(DecodedFrame { ethernet, inner })
    }

    fn decode_ethernet(&self, data: &[u8]) -> Result<EthernetView, DecodeError> {
        check_len(data, Layer::Ethernet, ETHERNET_HEADER_LEN)?;

        Ok(EthernetView {
            dst_mac: mac_at(data, 0),
            src_mac: mac_at(data, 6),
            ethertype: be_u16(data, 12),
        })
    }

    fn decode_arp(&self, data: &[u8]) -> Result<ArpView, DecodeError> {
        check_len(data, Layer::Arp, ETHERNET_HEADER_LEN + ARP_BODY_LEN)?;
        let base = ETHERNET_HEADER_LEN;

        Ok(ArpView {
            sender_hw: mac_at(data, base),
            target_hw: mac_at(data, base + 6),
            sender_proto: ipv4_at(data, base + 12),
            target_proto: ipv4_at(data, base + 16),
            operation: be_u16(data, base + 20),
        })
    }

    fn decode_ipv4_tcp(&self, data: &[u8]) -> Result<Ipv4TcpView, DecodeError> {
        let ip_start = ETHERNET_HEADER_LEN;
        check_len(data, Layer::Ipv4, ip_start + IPV4_FIXED_FIELDS_LEN)?;

        // Low nibble of the first header byte is the header length in
        // 4-byte words.
        let ihl = data[ip_start] & 0x0f;
        let src_addr = ipv4_at(data, ip_start + 12);
        let dst_addr = ipv4_at(data, ip_start + 16);

        let tcp_start = ip_start + 4 * ihl as usize;
        check_len(data, Layer::Tcp, tcp_start + TCP_FIXED_FIELDS_LEN)?;

        let src_port = be_u16(data, tcp_start);
        let dst_port = be_u16(data, tcp_start + 2);
        let data_offset = data[tcp_start + 12] >> 4;
        let flag_bits = data[tcp_start + 13];

        Ok(Ipv4TcpView {
            src_addr,
            dst_addr,
            ihl,
            src_port,
            dst_port,
            flags: TcpFlags {
                urg: flag_bits & TCP_FLAG_URG != 0,
                psh: flag_bits & TCP_FLAG_PSH != 0,
                fin: flag_bits & TCP_FLAG_FIN != 0,
            },
            data_offset,
            payload_offset: tcp_start + 4 * data_offset as usize,
        })
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_len(data: &[u8], layer: Layer, needed: usize) -> Result<(), DecodeError> {
    if data.len() < needed {
        return Err(DecodeError::Truncated {
            layer,
            needed,
            captured: data.len(),
        });
    }
    Ok(())
}

fn be_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([data[offset], data[offset + 1]])
}

fn mac_at(data: &[u8], offset: usize) -> MacAddr6 {
    MacAddr6::new(
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
        data[offset + 4],
        data[offset + 5],
    )
}

fn ipv4_at(data: &[u8], offset: usize) -> Ipv4Addr {
    Ipv4Addr::new(
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    )
}
